//! Naming helpers for orchestrators that store or serve the artifacts.

use chklst_types::ReportPeriod;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    Deployments,
    Statistics,
}

impl ReportKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportKind::Deployments => "deployments",
            ReportKind::Statistics => "statistics",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportFormat {
    /// `.xlsx` workbook.
    Spreadsheet,
    /// `.pdf` document.
    Document,
}

impl ReportFormat {
    pub const ALL: [ReportFormat; 2] = [ReportFormat::Spreadsheet, ReportFormat::Document];

    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Spreadsheet => "xlsx",
            ReportFormat::Document => "pdf",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ReportFormat::Spreadsheet => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ReportFormat::Document => "application/pdf",
        }
    }
}

/// `{kind}_{year}_{month:02}.{ext}`, e.g. `deployments_2025_03.pdf`.
pub fn artifact_file_name(kind: ReportKind, format: ReportFormat, period: ReportPeriod) -> String {
    format!(
        "{}_{}_{:02}.{}",
        kind,
        period.year(),
        period.month(),
        format.extension()
    )
}
