use crate::chart::{ChartRasterizer, PieChart, PieRasterizer};
use crate::layout::LayoutEngine;
use crate::metrics::FontFace;
use crate::model::{Block, Figure, Paragraph, ReportDocument, Table, TableStyle};
use crate::settings::DocumentSettings;
use crate::writer::{DocumentInfo, PdfWriter};
use chklst_normalize::breakdown;
use chklst_types::{
    CategoryBreakdown, Column, DeploymentRecord, DeploymentTable, Diagnostics, LogDiagnostics,
    RenderError, ReportPeriod, ReportTheme, StatisticsMapping, TIMESTAMP_FORMAT,
};
use chrono::NaiveDateTime;
use std::sync::Arc;

const POINTS_PER_INCH: f32 = 72.0;
const DETAIL_HEADERS: [&str; 6] = [
    "Jira ID",
    "Project",
    "Component",
    "Environment",
    "Developer",
    "Date",
];
const DETAIL_WIDTHS_IN: [f32; 6] = [0.8, 1.3, 1.3, 1.0, 1.0, 0.7];

fn inches(values: &[f32]) -> Vec<f32> {
    values.iter().map(|v| v * POINTS_PER_INCH).collect()
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Builds paginated PDF reports.
///
/// Composition (what goes on the page) and serialization are separate
/// steps: `compose_*` returns the flow document, `render_*` lays it out and
/// writes it.
pub struct DocumentRenderer {
    theme: Arc<ReportTheme>,
    settings: DocumentSettings,
    diagnostics: Arc<dyn Diagnostics>,
    rasterizer: Arc<dyn ChartRasterizer>,
}

impl DocumentRenderer {
    pub fn new(theme: Arc<ReportTheme>, settings: DocumentSettings) -> Self {
        Self {
            theme,
            settings,
            diagnostics: Arc::new(LogDiagnostics),
            rasterizer: Arc::new(PieRasterizer::default()),
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn with_chart_rasterizer(mut self, rasterizer: Arc<dyn ChartRasterizer>) -> Self {
        self.rasterizer = rasterizer;
        self
    }

    pub fn settings(&self) -> &DocumentSettings {
        &self.settings
    }

    pub fn render_deployments(
        &self,
        table: &DeploymentTable,
        period: ReportPeriod,
        generated_at: NaiveDateTime,
    ) -> Result<Vec<u8>, RenderError> {
        let document = self.compose_deployments(table, period, generated_at);
        self.render(&document, generated_at)
    }

    pub fn render_statistics(
        &self,
        stats: &StatisticsMapping,
        period: ReportPeriod,
        generated_at: NaiveDateTime,
    ) -> Result<Vec<u8>, RenderError> {
        let document = self.compose_statistics(stats, period);
        self.render(&document, generated_at)
    }

    /// Lays out and serializes a composed document.
    pub fn render(
        &self,
        document: &ReportDocument,
        generated_at: NaiveDateTime,
    ) -> Result<Vec<u8>, RenderError> {
        let engine = LayoutEngine::new(self.settings.page_width, self.settings.page_height);
        let pages = engine.layout(document)?;

        let mut writer = PdfWriter::new(self.settings.page_width, self.settings.page_height);
        writer.begin_document(&pages)?;
        for page in &pages {
            writer.render_page(page)?;
        }
        let bytes = writer.finish(&DocumentInfo {
            title: document.title.clone(),
            created: generated_at,
        })?;
        log::debug!(
            "Rendered '{}': {} pages, {} bytes",
            document.title,
            pages.len(),
            bytes.len()
        );
        Ok(bytes)
    }

    pub fn compose_deployments(
        &self,
        table: &DeploymentTable,
        period: ReportPeriod,
        generated_at: NaiveDateTime,
    ) -> ReportDocument {
        let title = format!("Deployment Report - {}", period.label());
        let mut doc = ReportDocument::new(title.clone(), self.settings.deployment_margin);
        let counts = breakdown(&table.records);

        doc.push(Block::Paragraph(self.title(&title)));
        doc.push(Block::Spacer(12.0));
        doc.push(Block::Paragraph(self.body(format!(
            "Generated: {}",
            generated_at.format(TIMESTAMP_FORMAT)
        ))));
        doc.push(Block::Spacer(20.0));

        doc.push(Block::Paragraph(self.heading("Summary")));
        doc.push(Block::Table(self.summary_table(table.len(), period, &counts)));
        doc.push(Block::Spacer(30.0));

        if table.is_empty() {
            doc.push(Block::Paragraph(
                self.body("No deployments found for this period."),
            ));
            return doc;
        }

        doc.push(Block::Paragraph(self.heading("Deployment Details")));
        doc.push(Block::Spacer(12.0));
        doc.push(Block::Table(self.detail_table(&table.records)));
        let limit = self.settings.detail_row_limit;
        if table.len() > limit {
            doc.push(Block::Spacer(12.0));
            let mut note = self.body(format!(
                "Note: Showing first {} of {} deployments",
                limit,
                table.len()
            ));
            note.face = FontFace::Oblique;
            doc.push(Block::Paragraph(note));
        }

        doc.push(Block::PageBreak);
        doc.push(Block::Paragraph(self.heading("Deployment Trends")));
        doc.push(Block::Spacer(12.0));
        let chart_title = format!("Deployments by Environment - {}", period.label());
        match self.rasterizer.rasterize(&chart_title, &counts, &self.theme) {
            Ok(chart) => doc.push(Block::Figure(self.figure(chart))),
            Err(e) => self
                .diagnostics
                .warn("chart", &format!("Omitting '{}': {}", chart_title, e)),
        }
        doc
    }

    pub fn compose_statistics(
        &self,
        stats: &StatisticsMapping,
        period: ReportPeriod,
    ) -> ReportDocument {
        let title = format!("Deployment Statistics - {}", period.label());
        let mut doc = ReportDocument::new(title.clone(), self.settings.statistics_margin);
        doc.push(Block::Paragraph(self.title(&title)));
        doc.push(Block::Spacer(20.0));

        let sizes = &self.theme.font_sizes;
        doc.push(Block::Table(Table {
            column_widths: inches(&[4.0, 2.0]),
            header: vec!["Metric".into(), "Value".into()],
            rows: stats
                .display_rows()
                .map(|(label, value)| vec![label, value])
                .collect(),
            style: TableStyle {
                header_size: sizes.statistics_header,
                header_bottom_padding: 8.0,
                row_bands: self.theme.row_bands.clone(),
                grid_width: 1.0,
                ..self.table_style()
            },
        }));
        doc
    }

    fn title(&self, text: &str) -> Paragraph {
        Paragraph::new(
            text,
            FontFace::Bold,
            self.theme.font_sizes.title,
            self.theme.brand,
        )
        .centered()
        .space_after(30.0)
    }

    fn heading(&self, text: &str) -> Paragraph {
        Paragraph::new(
            text,
            FontFace::Bold,
            self.theme.font_sizes.heading,
            self.theme.brand,
        )
        .space_after(12.0)
    }

    fn body(&self, text: impl Into<String>) -> Paragraph {
        Paragraph::new(
            text,
            FontFace::Regular,
            self.theme.font_sizes.body,
            self.theme.text,
        )
    }

    fn table_style(&self) -> TableStyle {
        let sizes = &self.theme.font_sizes;
        TableStyle {
            header_face: FontFace::Bold,
            header_size: sizes.summary_header,
            header_fill: self.theme.brand,
            header_text: self.theme.header_text,
            header_bottom_padding: 0.0,
            body_face: FontFace::Regular,
            body_size: sizes.body,
            body_text: self.theme.text,
            row_bands: Vec::new(),
            grid_color: self.theme.grid,
            grid_width: 1.0,
            padding: 4.0,
        }
    }

    fn summary_table(
        &self,
        total: usize,
        period: ReportPeriod,
        counts: &CategoryBreakdown,
    ) -> Table {
        // The total doubles as the styled first row.
        let mut rows = vec![vec!["Report Period".to_string(), period.label()]];
        if total > 0 {
            rows.push(vec![String::new(), String::new()]);
            rows.push(vec!["Environment Breakdown".to_string(), String::new()]);
            rows.extend(
                counts
                    .iter()
                    .map(|(label, count)| vec![format!("  {label}"), count.to_string()]),
            );
        }
        Table {
            column_widths: inches(&[3.0, 2.0]),
            header: vec!["Total Deployments".into(), total.to_string()],
            rows,
            style: TableStyle {
                header_bottom_padding: 8.0,
                ..self.table_style()
            },
        }
    }

    fn detail_row(&self, record: &DeploymentRecord) -> Vec<String> {
        let s = &self.settings;
        vec![
            record.text(Column::JiraId),
            truncate(&record.text(Column::Project), s.project_max_chars),
            truncate(&record.text(Column::Component), s.component_max_chars),
            record.text(Column::Environment),
            truncate(&record.text(Column::Developer), s.developer_max_chars),
            record
                .timestamp
                .map(|ts| ts.format("%m/%d").to_string())
                .unwrap_or_default(),
        ]
    }

    fn detail_table(&self, records: &[DeploymentRecord]) -> Table {
        let sizes = &self.theme.font_sizes;
        Table {
            column_widths: inches(&DETAIL_WIDTHS_IN),
            header: DETAIL_HEADERS.iter().map(|h| h.to_string()).collect(),
            rows: records
                .iter()
                .take(self.settings.detail_row_limit)
                .map(|r| self.detail_row(r))
                .collect(),
            style: TableStyle {
                header_size: sizes.detail_header,
                header_bottom_padding: 4.0,
                body_size: sizes.detail_body,
                row_bands: self.theme.row_bands.clone(),
                grid_width: 0.5,
                padding: 3.0,
                ..self.table_style()
            },
        }
    }

    fn figure(&self, chart: PieChart) -> Figure {
        let sizes = &self.theme.font_sizes;
        Figure {
            chart: Arc::new(chart),
            width: self.settings.chart_width,
            height: self.settings.chart_height,
            title_face: FontFace::Bold,
            title_size: sizes.chart_title,
            label_size: sizes.chart_label,
            text_color: self.theme.text,
        }
    }
}
