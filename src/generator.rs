// src/generator.rs
use crate::artifact::ReportFormat;
use crate::clock::{Clock, SystemClock};
use crate::config::ReportConfig;
use chklst_normalize::normalize;
use chklst_render_pdf::{ChartRasterizer, DocumentRenderer};
use chklst_render_xlsx::SpreadsheetRenderer;
use chklst_types::{Diagnostics, RawRecord, ReportError, ReportPeriod, ReportTheme, StatisticsMapping};
use std::sync::Arc;

/// The report entry points: normalizes raw deployment records and hands
/// them to the spreadsheet or document renderer.
///
/// A generator holds no per-call state, so one instance can serve any number
/// of concurrent render calls.
pub struct ReportGenerator {
    spreadsheet: SpreadsheetRenderer,
    document: DocumentRenderer,
    clock: Arc<dyn Clock>,
}

impl Default for ReportGenerator {
    fn default() -> Self {
        ReportGeneratorBuilder::new().build()
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn builder() -> ReportGeneratorBuilder {
        ReportGeneratorBuilder::new()
    }

    /// Renders the monthly deployment report.
    ///
    /// Records are validated first; a malformed timestamp fails the whole
    /// call before any rendering starts.
    pub fn render_deployments(
        &self,
        format: ReportFormat,
        records: &[RawRecord],
        period: ReportPeriod,
    ) -> Result<Vec<u8>, ReportError> {
        let table = normalize(records)?;
        let generated_at = self.clock.now();
        log::info!(
            "Generating {} deployment report for {} ({} records)",
            format.extension(),
            period.label(),
            table.len()
        );
        let bytes = match format {
            ReportFormat::Spreadsheet => {
                self.spreadsheet.render_deployments(&table, period, generated_at)?
            }
            ReportFormat::Document => self.document.render_deployments(&table, period, generated_at)?,
        };
        Ok(bytes)
    }

    /// Renders the statistics report. Statistics need no normalization and
    /// are rendered in insertion order.
    pub fn render_statistics(
        &self,
        format: ReportFormat,
        stats: &StatisticsMapping,
        period: ReportPeriod,
    ) -> Result<Vec<u8>, ReportError> {
        let generated_at = self.clock.now();
        log::info!(
            "Generating {} statistics report for {} ({} entries)",
            format.extension(),
            period.label(),
            stats.len()
        );
        let bytes = match format {
            ReportFormat::Spreadsheet => {
                self.spreadsheet.render_statistics(stats, period, generated_at)?
            }
            ReportFormat::Document => self.document.render_statistics(stats, period, generated_at)?,
        };
        Ok(bytes)
    }
}

/// A builder for creating a [`ReportGenerator`].
pub struct ReportGeneratorBuilder {
    config: ReportConfig,
    clock: Arc<dyn Clock>,
    diagnostics: Option<Arc<dyn Diagnostics>>,
    rasterizer: Option<Arc<dyn ChartRasterizer>>,
}

impl Default for ReportGeneratorBuilder {
    fn default() -> Self {
        Self {
            config: ReportConfig::default(),
            clock: Arc::new(SystemClock),
            diagnostics: None,
            rasterizer: None,
        }
    }
}

impl ReportGeneratorBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Replaces theme and renderer settings wholesale.
    pub fn with_config(mut self, config: ReportConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_theme(mut self, theme: ReportTheme) -> Self {
        self.config.theme = theme;
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Receives non-fatal degradations such as a chart that could not be drawn.
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    pub fn with_chart_rasterizer(mut self, rasterizer: Arc<dyn ChartRasterizer>) -> Self {
        self.rasterizer = Some(rasterizer);
        self
    }

    pub fn build(self) -> ReportGenerator {
        let ReportConfig {
            theme,
            spreadsheet,
            document,
        } = self.config;
        let theme = Arc::new(theme);

        let mut document_renderer = DocumentRenderer::new(Arc::clone(&theme), document);
        if let Some(diagnostics) = self.diagnostics {
            document_renderer = document_renderer.with_diagnostics(diagnostics);
        }
        if let Some(rasterizer) = self.rasterizer {
            document_renderer = document_renderer.with_chart_rasterizer(rasterizer);
        }

        ReportGenerator {
            spreadsheet: SpreadsheetRenderer::new(theme, spreadsheet),
            document: document_renderer,
            clock: self.clock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chklst_types::DataFormatError;
    use chrono::NaiveDate;
    use serde_json::json;

    fn fixed_generator() -> ReportGenerator {
        let at = NaiveDate::from_ymd_opt(2025, 4, 1)
            .and_then(|d| d.and_hms_opt(9, 30, 0))
            .unwrap();
        ReportGenerator::builder().with_clock(FixedClock(at)).build()
    }

    fn record(value: serde_json::Value) -> RawRecord {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn malformed_timestamp_fails_before_rendering() {
        let generator = fixed_generator();
        let period = ReportPeriod::new(3, 2025).unwrap();
        let records = vec![record(json!({"id": 1, "timestamp": "last tuesday"}))];

        for format in ReportFormat::ALL {
            let err = generator
                .render_deployments(format, &records, period)
                .unwrap_err();
            match err {
                ReportError::DataFormat(DataFormatError { field, .. }) => {
                    assert_eq!(field, "timestamp")
                }
                other => panic!("expected a data format error, got {other:?}"),
            }
        }
    }

    #[test]
    fn both_formats_produce_their_magic_bytes() {
        let generator = fixed_generator();
        let period = ReportPeriod::new(3, 2025).unwrap();
        let records = vec![record(json!({"id": 1, "environment": "prod"}))];

        let xlsx = generator
            .render_deployments(ReportFormat::Spreadsheet, &records, period)
            .unwrap();
        assert!(xlsx.starts_with(b"PK"));
        let pdf = generator
            .render_deployments(ReportFormat::Document, &records, period)
            .unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn fixed_clock_makes_output_repeatable() {
        let generator = fixed_generator();
        let period = ReportPeriod::new(3, 2025).unwrap();
        let mut stats = StatisticsMapping::new();
        stats.insert("total_deployments", 12_i64);

        for format in ReportFormat::ALL {
            let first = generator.render_statistics(format, &stats, period).unwrap();
            let second = generator.render_statistics(format, &stats, period).unwrap();
            assert_eq!(first, second, "{format:?} output differs between calls");
        }
    }
}
