//! Pie chart of the category breakdown.
//!
//! The wedge fill is drawn by plotters into an RGB bitmap; the title, category
//! labels and percentages are left to the page as vector text, positioned
//! from the wedge geometry returned alongside the bitmap.

use chklst_types::{CategoryBreakdown, Color, ReportTheme};
use image::RgbImage;
use plotters::element::Pie;
use plotters::prelude::*;
use std::f64::consts::TAU;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("no categories to chart")]
    NoData,
    #[error("chart rasterization failed: {0}")]
    Raster(String),
}

/// One category's slice. Angles are radians measured counter-clockwise from
/// 12 o'clock.
#[derive(Debug, Clone, PartialEq)]
pub struct Wedge {
    pub label: String,
    pub count: usize,
    pub fraction: f64,
    pub color: Color,
    pub start: f64,
    pub sweep: f64,
}

impl Wedge {
    pub fn mid_angle(&self) -> f64 {
        self.start + self.sweep / 2.0
    }

    /// Unit vector from the pie center toward the middle of the wedge, with
    /// `y` pointing up.
    pub fn direction(&self) -> (f64, f64) {
        let angle = self.mid_angle();
        (-angle.sin(), angle.cos())
    }

    /// Share of the whole, one decimal place: `"62.5%"`.
    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.fraction * 100.0)
    }
}

/// A rendered chart: the wedge bitmap plus the geometry needed to annotate it.
#[derive(Debug, Clone)]
pub struct PieChart {
    pub title: String,
    pub wedges: Vec<Wedge>,
    pub image: RgbImage,
}

/// Produces the chart embedded in the trends section.
pub trait ChartRasterizer: Send + Sync {
    fn rasterize(
        &self,
        title: &str,
        breakdown: &CategoryBreakdown,
        theme: &ReportTheme,
    ) -> Result<PieChart, ChartError>;
}

/// Lays out one wedge per category in label order, coloring from the theme
/// palette.
pub fn pie_wedges(
    breakdown: &CategoryBreakdown,
    theme: &ReportTheme,
) -> Result<Vec<Wedge>, ChartError> {
    let total = breakdown.total();
    if total == 0 {
        return Err(ChartError::NoData);
    }
    let mut start = 0.0;
    let wedges = breakdown
        .iter()
        .enumerate()
        .map(|(index, (label, count))| {
            let fraction = count as f64 / total as f64;
            let wedge = Wedge {
                label: label.to_string(),
                count,
                fraction,
                color: theme.chart_color(index),
                start,
                sweep: fraction * TAU,
            };
            start += wedge.sweep;
            wedge
        })
        .collect();
    Ok(wedges)
}

/// Default rasterizer: plotters' `Pie` element drawn onto an in-memory
/// bitmap.
#[derive(Debug, Clone, Copy)]
pub struct PieRasterizer {
    /// Edge length of the bitmap in pixels.
    pub size: u32,
}

impl Default for PieRasterizer {
    fn default() -> Self {
        Self { size: 600 }
    }
}

fn raster_error(e: impl std::fmt::Display) -> ChartError {
    ChartError::Raster(e.to_string())
}

impl ChartRasterizer for PieRasterizer {
    fn rasterize(
        &self,
        title: &str,
        breakdown: &CategoryBreakdown,
        theme: &ReportTheme,
    ) -> Result<PieChart, ChartError> {
        if self.size == 0 {
            return Err(ChartError::Raster("raster size must be positive".into()));
        }
        let wedges = pie_wedges(breakdown, theme)?;

        // Plotters sweeps clockwise on screen, so the wedges go in reversed to
        // keep the counter-clockwise layout starting from 12 o'clock.
        let sizes: Vec<f64> = wedges.iter().rev().map(|w| w.count as f64).collect();
        let colors: Vec<RGBColor> = wedges
            .iter()
            .rev()
            .map(|w| RGBColor(w.color.r, w.color.g, w.color.b))
            .collect();
        let labels = vec![""; wedges.len()];
        let half = (self.size / 2) as i32;
        let center = (half, half);
        let radius = f64::from(half) - 1.0;

        let mut buffer = vec![255u8; self.size as usize * self.size as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (self.size, self.size))
                .into_drawing_area();
            root.fill(&WHITE).map_err(raster_error)?;
            let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
            pie.start_angle(-90.0);
            root.draw(&pie).map_err(raster_error)?;
            root.present().map_err(raster_error)?;
        }
        let image = RgbImage::from_raw(self.size, self.size, buffer)
            .ok_or_else(|| ChartError::Raster("bitmap buffer size mismatch".into()))?;

        log::debug!(
            "Rasterized pie chart with {} wedges at {}px",
            wedges.len(),
            self.size
        );
        Ok(PieChart {
            title: title.to_string(),
            wedges,
            image,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breakdown(entries: &[(&str, usize)]) -> CategoryBreakdown {
        let mut b = CategoryBreakdown::new();
        for (label, count) in entries {
            for _ in 0..*count {
                b.increment(label);
            }
        }
        b
    }

    #[test]
    fn wedges_follow_label_order_and_cover_the_circle() {
        let theme = ReportTheme::default();
        let wedges = pie_wedges(&breakdown(&[("prod", 5), ("dev", 3)]), &theme).unwrap();
        assert_eq!(wedges[0].label, "dev");
        assert_eq!(wedges[0].percent_label(), "37.5%");
        assert_eq!(wedges[1].percent_label(), "62.5%");
        assert_eq!(wedges[0].color, theme.chart_color(0));
        assert_eq!(wedges[0].start, 0.0);
        let end = wedges[1].start + wedges[1].sweep;
        assert!((end - TAU).abs() < 1e-9);
    }

    #[test]
    fn first_wedge_starts_at_twelve_and_turns_left() {
        let theme = ReportTheme::default();
        let wedges = pie_wedges(&breakdown(&[("a", 1), ("b", 3)]), &theme).unwrap();
        // A quarter wedge from 12 o'clock counter-clockwise points up-left.
        let (dx, dy) = wedges[0].direction();
        assert!(dx < 0.0 && dy > 0.0);
    }

    #[test]
    fn raster_colors_match_wedges() {
        let theme = ReportTheme::default();
        let raster = PieRasterizer { size: 100 };
        let chart = raster
            .rasterize("t", &breakdown(&[("a", 1), ("b", 3)]), &theme)
            .unwrap();
        let a = theme.chart_color(0);
        let b = theme.chart_color(1);
        // Upper-left quadrant belongs to the first wedge, lower-right to the second.
        assert_eq!(chart.image.get_pixel(30, 30).0, [a.r, a.g, a.b]);
        assert_eq!(chart.image.get_pixel(70, 70).0, [b.r, b.g, b.b]);
        assert_eq!(chart.image.get_pixel(0, 0).0, [255, 255, 255]);
    }

    #[test]
    fn single_category_fills_the_disc() {
        let theme = ReportTheme::default();
        let chart = PieRasterizer { size: 60 }
            .rasterize("t", &breakdown(&[("prod", 4)]), &theme)
            .unwrap();
        let c = theme.chart_color(0);
        assert_eq!(chart.image.dimensions(), (60, 60));
        assert_eq!(chart.image.get_pixel(30, 10).0, [c.r, c.g, c.b]);
        assert_eq!(chart.image.get_pixel(30, 50).0, [c.r, c.g, c.b]);
    }

    #[test]
    fn zero_size_is_a_raster_error() {
        let result = PieRasterizer { size: 0 }.rasterize(
            "t",
            &breakdown(&[("prod", 1)]),
            &ReportTheme::default(),
        );
        assert!(matches!(result, Err(ChartError::Raster(_))));
    }

    #[test]
    fn empty_breakdown_is_an_error() {
        let raster = PieRasterizer::default();
        let result = raster.rasterize("t", &CategoryBreakdown::new(), &ReportTheme::default());
        assert!(matches!(result, Err(ChartError::NoData)));
    }
}
