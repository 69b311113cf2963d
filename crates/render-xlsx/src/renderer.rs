use crate::formats::SheetFormats;
use crate::settings::SpreadsheetSettings;
use chklst_normalize::breakdown;
use chklst_types::{
    DeploymentTable, RenderError, ReportPeriod, ReportTheme, Scalar, StatisticsMapping,
    TIMESTAMP_FORMAT,
};
use chrono::{Datelike, NaiveDateTime, Timelike};
use rust_xlsxwriter::{DocProperties, ExcelDateTime, Format, Workbook, Worksheet, XlsxError};
use std::sync::Arc;

/// Zero-based row of the column header on the data sheet.
const HEADER_ROW: u32 = 3;
/// Zero-based row of the first statistics entry.
const STATISTICS_FIRST_ROW: u32 = 2;

/// Builds `.xlsx` workbooks for the deployment and statistics reports.
///
/// Holds only read-only configuration, so one instance can serve concurrent
/// render calls.
#[derive(Debug, Clone)]
pub struct SpreadsheetRenderer {
    theme: Arc<ReportTheme>,
    settings: SpreadsheetSettings,
}

impl SpreadsheetRenderer {
    pub fn new(theme: Arc<ReportTheme>, settings: SpreadsheetSettings) -> Self {
        Self { theme, settings }
    }

    pub fn settings(&self) -> &SpreadsheetSettings {
        &self.settings
    }

    /// Renders the deployment workbook: the data sheet followed by the
    /// summary sheet.
    pub fn render_deployments(
        &self,
        table: &DeploymentTable,
        period: ReportPeriod,
        generated_at: NaiveDateTime,
    ) -> Result<Vec<u8>, RenderError> {
        let title = format!("Deployment Report - {}", period.label());
        let formats = SheetFormats::new(&self.theme);
        let mut workbook = Workbook::new();
        workbook.set_properties(&document_properties(&title, generated_at)?);

        let sheet_name = format!("Deployments {}", period.code());
        let data_sheet = workbook
            .add_worksheet()
            .set_name(&sheet_name)
            .map_err(RenderError::spreadsheet)?;
        self.write_data_sheet(data_sheet, &formats, table, &title, generated_at)
            .map_err(RenderError::spreadsheet)?;

        let summary_sheet = workbook
            .add_worksheet()
            .set_name("Summary")
            .map_err(RenderError::spreadsheet)?;
        self.write_summary_sheet(summary_sheet, &formats, table, period, generated_at)
            .map_err(RenderError::spreadsheet)?;

        let bytes = workbook.save_to_buffer().map_err(RenderError::spreadsheet)?;
        log::debug!(
            "Rendered deployment workbook for {}: {} records, {} bytes",
            period.code(),
            table.len(),
            bytes.len()
        );
        Ok(bytes)
    }

    /// Renders the single-sheet statistics workbook.
    pub fn render_statistics(
        &self,
        stats: &StatisticsMapping,
        period: ReportPeriod,
        generated_at: NaiveDateTime,
    ) -> Result<Vec<u8>, RenderError> {
        let title = format!("Deployment Statistics - {}", period.label());
        let formats = SheetFormats::new(&self.theme);
        let mut workbook = Workbook::new();
        workbook.set_properties(&document_properties(&title, generated_at)?);

        let sheet = workbook
            .add_worksheet()
            .set_name("Statistics")
            .map_err(RenderError::spreadsheet)?;
        self.write_statistics_sheet(sheet, &formats, stats, &title)
            .map_err(RenderError::spreadsheet)?;

        let bytes = workbook.save_to_buffer().map_err(RenderError::spreadsheet)?;
        log::debug!(
            "Rendered statistics workbook for {}: {} entries, {} bytes",
            period.code(),
            stats.len(),
            bytes.len()
        );
        Ok(bytes)
    }

    fn write_data_sheet(
        &self,
        sheet: &mut Worksheet,
        formats: &SheetFormats,
        table: &DeploymentTable,
        title: &str,
        generated_at: NaiveDateTime,
    ) -> Result<(), XlsxError> {
        let width = table.columns.len() as u16;
        if width > 1 {
            sheet.merge_range(0, 0, 0, width - 1, title, &formats.title)?;
        } else {
            sheet.write_string_with_format(0, 0, title, &formats.title)?;
        }
        let generated = format!("Generated: {}", generated_at.format(TIMESTAMP_FORMAT));
        sheet.write_string_with_format(1, 0, &generated, &formats.metadata)?;

        let mut longest: Vec<usize> = Vec::with_capacity(table.columns.len());
        for (col, header) in table.headers().into_iter().enumerate() {
            sheet.write_string_with_format(HEADER_ROW, col as u16, header, &formats.header)?;
            longest.push(header.chars().count());
        }
        // Column A also holds the title and the generation line.
        if let Some(first) = longest.first_mut() {
            *first = (*first)
                .max(title.chars().count())
                .max(generated.chars().count());
        }

        for (index, row) in table.rows().enumerate() {
            let row_num = HEADER_ROW + 1 + index as u32;
            for (col, value) in row.iter().enumerate() {
                write_scalar(sheet, row_num, col as u16, value.as_ref(), &formats.cell)?;
                let len = value.as_ref().map_or(0, |v| v.to_string().chars().count());
                if len > longest[col] {
                    longest[col] = len;
                }
            }
        }

        for (col, len) in longest.into_iter().enumerate() {
            sheet.set_column_width(col as u16, self.settings.fitted_width(len))?;
        }
        sheet.set_freeze_panes(HEADER_ROW + 1, 0)?;
        Ok(())
    }

    fn write_summary_sheet(
        &self,
        sheet: &mut Worksheet,
        formats: &SheetFormats,
        table: &DeploymentTable,
        period: ReportPeriod,
        generated_at: NaiveDateTime,
    ) -> Result<(), XlsxError> {
        sheet.write_string_with_format(0, 0, "Metric", &formats.label)?;
        sheet.write_string_with_format(0, 1, "Value", &formats.label)?;

        sheet.write_string_with_format(1, 0, "Total Deployments", &formats.label)?;
        sheet.write_number(1, 1, table.len() as f64)?;
        sheet.write_string_with_format(2, 0, "Report Period", &formats.label)?;
        sheet.write_string(2, 1, period.label())?;
        sheet.write_string_with_format(3, 0, "Generated", &formats.label)?;
        sheet.write_string(3, 1, generated_at.format(TIMESTAMP_FORMAT).to_string())?;

        if !table.is_empty() {
            sheet.write_string_with_format(5, 0, "Deployments by Environment", &formats.label)?;
            for (index, (label, count)) in breakdown(&table.records).iter().enumerate() {
                let row = 6 + index as u32;
                sheet.write_string_with_format(row, 0, label, &formats.label)?;
                sheet.write_number(row, 1, count as f64)?;
            }
        }

        sheet.set_column_width(0, self.settings.label_column_width)?;
        sheet.set_column_width(1, self.settings.value_column_width)?;
        Ok(())
    }

    fn write_statistics_sheet(
        &self,
        sheet: &mut Worksheet,
        formats: &SheetFormats,
        stats: &StatisticsMapping,
        title: &str,
    ) -> Result<(), XlsxError> {
        sheet.merge_range(0, 0, 0, 1, title, &formats.title)?;
        for (index, (label, value)) in stats.display_rows().into_iter().enumerate() {
            let row = STATISTICS_FIRST_ROW + index as u32;
            sheet.write_string_with_format(row, 0, label, &formats.label)?;
            sheet.write_string_with_format(row, 1, value, &formats.plain)?;
        }
        sheet.set_column_width(0, self.settings.label_column_width)?;
        sheet.set_column_width(1, self.settings.value_column_width)?;
        Ok(())
    }
}

fn write_scalar(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: Option<&Scalar>,
    format: &Format,
) -> Result<(), XlsxError> {
    match value {
        None => sheet.write_blank(row, col, format)?,
        Some(Scalar::Bool(b)) => sheet.write_boolean_with_format(row, col, *b, format)?,
        Some(Scalar::Number(n)) => match n.as_f64() {
            Some(f) => sheet.write_number_with_format(row, col, f, format)?,
            None => sheet.write_string_with_format(row, col, n.to_string(), format)?,
        },
        Some(Scalar::Text(s)) => sheet.write_string_with_format(row, col, s, format)?,
    };
    Ok(())
}

/// Title and creation date. Pinning the creation date to the generation
/// timestamp keeps repeated renders byte-identical.
fn document_properties(
    title: &str,
    generated_at: NaiveDateTime,
) -> Result<DocProperties, RenderError> {
    let created = ExcelDateTime::from_ymd(
        generated_at.year() as u16,
        generated_at.month() as u8,
        generated_at.day() as u8,
    )
    .and_then(|date| {
        date.and_hms(
            generated_at.hour() as u16,
            generated_at.minute() as u8,
            generated_at.second(),
        )
    })
    .map_err(RenderError::spreadsheet)?;

    Ok(DocProperties::new()
        .set_title(title)
        .set_creation_datetime(&created))
}
