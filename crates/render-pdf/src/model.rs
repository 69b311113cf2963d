//! The flow document a report is composed into before layout.

use crate::chart::PieChart;
use crate::metrics::FontFace;
use chklst_types::Color;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub text: String,
    pub face: FontFace,
    pub size: f32,
    pub color: Color,
    pub align: TextAlign,
    /// Vertical space left below the paragraph.
    pub space_after: f32,
}

impl Paragraph {
    pub fn new(text: impl Into<String>, face: FontFace, size: f32, color: Color) -> Self {
        Self {
            text: text.into(),
            face,
            size,
            color,
            align: TextAlign::Left,
            space_after: 0.0,
        }
    }

    pub fn centered(mut self) -> Self {
        self.align = TextAlign::Center;
        self
    }

    pub fn space_after(mut self, space: f32) -> Self {
        self.space_after = space;
        self
    }

    /// Distance between consecutive baselines.
    pub fn leading(&self) -> f32 {
        self.size * 1.2
    }
}

/// Visual treatment of a [`Table`].
#[derive(Debug, Clone, PartialEq)]
pub struct TableStyle {
    pub header_face: FontFace,
    pub header_size: f32,
    pub header_fill: Color,
    pub header_text: Color,
    /// Extra padding under header text.
    pub header_bottom_padding: f32,
    pub body_face: FontFace,
    pub body_size: f32,
    pub body_text: Color,
    /// Body row backgrounds, cycled. Empty means no fill.
    pub row_bands: Vec<Color>,
    pub grid_color: Color,
    pub grid_width: f32,
    pub padding: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub column_widths: Vec<f32>,
    /// First row, styled as a header and repeated at the top of every page
    /// the table continues onto.
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub style: TableStyle,
}

impl Table {
    pub fn width(&self) -> f32 {
        self.column_widths.iter().sum()
    }

    pub fn header_height(&self) -> f32 {
        self.style.header_size + 2.0 * self.style.padding + self.style.header_bottom_padding
    }

    pub fn row_height(&self) -> f32 {
        self.style.body_size + 2.0 * self.style.padding
    }
}

/// A chart placed at a fixed size.
#[derive(Debug, Clone)]
pub struct Figure {
    pub chart: Arc<PieChart>,
    pub width: f32,
    pub height: f32,
    pub title_face: FontFace,
    pub title_size: f32,
    pub label_size: f32,
    pub text_color: Color,
}

#[derive(Debug, Clone)]
pub enum Block {
    Paragraph(Paragraph),
    Spacer(f32),
    Table(Table),
    Figure(Figure),
    PageBreak,
}

/// A composed report: metadata plus the blocks to flow onto pages.
#[derive(Debug, Clone)]
pub struct ReportDocument {
    pub title: String,
    pub margin: f32,
    pub blocks: Vec<Block>,
}

impl ReportDocument {
    pub fn new(title: impl Into<String>, margin: f32) -> Self {
        Self {
            title: title.into(),
            margin,
            blocks: Vec::new(),
        }
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Table(t) => Some(t),
            _ => None,
        })
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Paragraph(p) => Some(p),
            _ => None,
        })
    }

    pub fn has_figure(&self) -> bool {
        self.blocks.iter().any(|b| matches!(b, Block::Figure(_)))
    }
}
