//! Visual constants shared by both renderers.
//!
//! A theme is built once (defaults or a JSON override), wrapped in an `Arc`
//! and only ever read afterwards.

use crate::color::Color;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ReportTheme {
    /// Header fills, titles and headings.
    pub brand: Color,
    /// Text drawn on top of `brand`.
    pub header_text: Color,
    /// Body text.
    pub text: Color,
    /// Table grid lines.
    pub grid: Color,
    /// Alternating table row backgrounds, applied in order.
    pub row_bands: Vec<Color>,
    /// Pie wedge colors, applied in category order and cycled.
    pub chart_palette: Vec<Color>,
    pub font_sizes: FontSizes,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FontSizes {
    pub title: f32,
    pub heading: f32,
    pub body: f32,
    pub summary_header: f32,
    pub detail_header: f32,
    pub detail_body: f32,
    pub statistics_header: f32,
    pub chart_title: f32,
    pub chart_label: f32,
    pub sheet_title: f64,
    pub sheet_metadata: f64,
    pub sheet_header: f64,
}

impl Default for ReportTheme {
    fn default() -> Self {
        Self {
            brand: Color::rgb(0x36, 0x60, 0x92),
            header_text: Color::WHITE,
            text: Color::BLACK,
            grid: Color::gray(0x80),
            row_bands: vec![Color::WHITE, Color::gray(0xf0)],
            chart_palette: vec![
                Color::rgb(0x36, 0x60, 0x92),
                Color::rgb(0x4a, 0x7b, 0xa7),
                Color::rgb(0x64, 0x96, 0xc8),
                Color::rgb(0x7e, 0xb0, 0xdb),
                Color::rgb(0x98, 0xca, 0xee),
            ],
            font_sizes: FontSizes::default(),
        }
    }
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            title: 18.0,
            heading: 14.0,
            body: 10.0,
            summary_header: 11.0,
            detail_header: 9.0,
            detail_body: 8.0,
            statistics_header: 12.0,
            chart_title: 14.0,
            chart_label: 10.0,
            sheet_title: 14.0,
            sheet_metadata: 10.0,
            sheet_header: 11.0,
        }
    }
}

impl ReportTheme {
    /// Palette color for the `index`-th category.
    pub fn chart_color(&self, index: usize) -> Color {
        if self.chart_palette.is_empty() {
            return self.brand;
        }
        self.chart_palette[index % self.chart_palette.len()]
    }

    /// Background for the `index`-th body row of a banded table.
    pub fn row_band(&self, index: usize) -> Option<Color> {
        if self.row_bands.is_empty() {
            return None;
        }
        Some(self.row_bands[index % self.row_bands.len()])
    }
}
