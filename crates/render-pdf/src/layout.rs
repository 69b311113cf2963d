//! Flow layout: places document blocks onto fixed-size pages.
//!
//! Coordinates are in points with the origin at the top-left corner of the
//! page and `y` growing downward; the writer flips them into PDF space.

use crate::chart::PieChart;
use crate::metrics::FontFace;
use crate::model::{Block, Figure, Paragraph, ReportDocument, Table, TextAlign};
use chklst_types::{Color, RenderError};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct PositionedElement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub element: LayoutElement,
}

#[derive(Debug, Clone)]
pub enum LayoutElement {
    Text(TextElement),
    Rectangle(RectElement),
    Image(ImageElement),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    pub content: String,
    pub face: FontFace,
    pub size: f32,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RectElement {
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

#[derive(Debug, Clone)]
pub struct ImageElement {
    pub chart: Arc<PieChart>,
}

#[derive(Debug, Clone, Default)]
pub struct Page {
    pub elements: Vec<PositionedElement>,
}

impl Page {
    pub fn texts(&self) -> impl Iterator<Item = &TextElement> {
        self.elements.iter().filter_map(|el| match &el.element {
            LayoutElement::Text(t) => Some(t),
            _ => None,
        })
    }

    pub fn has_image(&self) -> bool {
        self.elements
            .iter()
            .any(|el| matches!(el.element, LayoutElement::Image(_)))
    }
}

/// Breaks `text` into lines no wider than `max_width`, splitting on
/// whitespace. A single word wider than the line gets a line of its own.
pub fn wrap_text(text: &str, face: FontFace, size: f32, max_width: f32) -> Vec<String> {
    let space = face.text_width(" ", size);
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_width = 0.0;
        for word in paragraph.split_whitespace() {
            let word_width = face.text_width(word, size);
            if !line.is_empty() && line_width + space + word_width > max_width {
                lines.push(std::mem::take(&mut line));
                line_width = 0.0;
            }
            if !line.is_empty() {
                line.push(' ');
                line_width += space;
            }
            line.push_str(word);
            line_width += word_width;
        }
        lines.push(line);
    }
    lines
}

pub struct LayoutEngine {
    page_width: f32,
    page_height: f32,
}

impl LayoutEngine {
    pub fn new(page_width: f32, page_height: f32) -> Self {
        Self {
            page_width,
            page_height,
        }
    }

    pub fn layout(&self, document: &ReportDocument) -> Result<Vec<Page>, RenderError> {
        let margin = document.margin;
        if 2.0 * margin >= self.page_width.min(self.page_height) {
            return Err(RenderError::Layout(format!(
                "margin {margin}pt leaves no room on a {}x{}pt page",
                self.page_width, self.page_height
            )));
        }
        let mut ctx = LayoutContext::new(self.page_width, self.page_height, margin);
        for block in &document.blocks {
            match block {
                Block::Paragraph(p) => ctx.layout_paragraph(p)?,
                Block::Spacer(h) => ctx.layout_spacer(*h),
                Block::Table(t) => ctx.layout_table(t)?,
                Block::Figure(f) => ctx.layout_figure(f)?,
                Block::PageBreak => ctx.page_break(),
            }
        }
        let pages = ctx.finish();
        log::debug!("Laid out '{}' onto {} pages", document.title, pages.len());
        Ok(pages)
    }
}

struct LayoutContext {
    pages: Vec<Page>,
    current: Vec<PositionedElement>,
    cursor_y: f32,
    left: f32,
    top: f32,
    bottom: f32,
    content_width: f32,
}

impl LayoutContext {
    fn new(page_width: f32, page_height: f32, margin: f32) -> Self {
        Self {
            pages: Vec::new(),
            current: Vec::new(),
            cursor_y: margin,
            left: margin,
            top: margin,
            bottom: page_height - margin,
            content_width: page_width - 2.0 * margin,
        }
    }

    fn finish(mut self) -> Vec<Page> {
        self.new_page();
        self.pages
    }

    fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    fn new_page(&mut self) {
        let elements = std::mem::take(&mut self.current);
        self.pages.push(Page { elements });
        self.cursor_y = self.top;
    }

    fn page_break(&mut self) {
        if !self.is_empty() {
            self.new_page();
        }
    }

    /// Starts a new page unless `height` fits below the cursor.
    fn ensure(&mut self, height: f32) -> Result<(), RenderError> {
        if height > self.bottom - self.top {
            return Err(RenderError::Layout(format!(
                "element of height {height}pt does not fit on a page"
            )));
        }
        if self.cursor_y + height > self.bottom && !self.is_empty() {
            self.new_page();
        }
        Ok(())
    }

    fn push(&mut self, x: f32, y: f32, width: f32, height: f32, element: LayoutElement) {
        self.current.push(PositionedElement {
            x,
            y,
            width,
            height,
            element,
        });
    }

    fn push_text(&mut self, x: f32, y: f32, text: TextElement) {
        let width = text.face.text_width(&text.content, text.size);
        let height = text.size;
        self.push(x, y, width, height, LayoutElement::Text(text));
    }

    fn layout_spacer(&mut self, height: f32) {
        if self.cursor_y + height > self.bottom {
            self.new_page();
        } else {
            self.cursor_y += height;
        }
    }

    fn layout_paragraph(&mut self, paragraph: &Paragraph) -> Result<(), RenderError> {
        let leading = paragraph.leading();
        for line in wrap_text(
            &paragraph.text,
            paragraph.face,
            paragraph.size,
            self.content_width,
        ) {
            self.ensure(leading)?;
            let width = paragraph.face.text_width(&line, paragraph.size);
            let x = match paragraph.align {
                TextAlign::Left => self.left,
                TextAlign::Center => self.left + (self.content_width - width) / 2.0,
            };
            let y = self.cursor_y + (leading - paragraph.size) / 2.0;
            self.push_text(
                x,
                y,
                TextElement {
                    content: line,
                    face: paragraph.face,
                    size: paragraph.size,
                    color: paragraph.color,
                },
            );
            self.cursor_y += leading;
        }
        self.cursor_y = (self.cursor_y + paragraph.space_after).min(self.bottom);
        Ok(())
    }

    fn layout_table(&mut self, table: &Table) -> Result<(), RenderError> {
        let x = self.left + ((self.content_width - table.width()) / 2.0).max(0.0);
        let header_height = table.header_height();
        let row_height = table.row_height();
        let has_header = !table.header.is_empty();

        if has_header {
            let first_row = if table.rows.is_empty() { 0.0 } else { row_height };
            self.ensure(header_height + first_row)?;
            self.draw_header(table, x);
        }
        for (index, row) in table.rows.iter().enumerate() {
            if self.cursor_y + row_height > self.bottom {
                self.ensure(row_height)?;
                if has_header {
                    self.draw_header(table, x);
                }
            }
            let style = &table.style;
            let band = if style.row_bands.is_empty() {
                None
            } else {
                Some(style.row_bands[index % style.row_bands.len()])
            };
            self.draw_row(
                table,
                x,
                row,
                row_height,
                band,
                TextElement {
                    content: String::new(),
                    face: style.body_face,
                    size: style.body_size,
                    color: style.body_text,
                },
            );
        }
        Ok(())
    }

    fn draw_header(&mut self, table: &Table, x: f32) {
        let style = &table.style;
        self.draw_row(
            table,
            x,
            &table.header,
            table.header_height(),
            Some(style.header_fill),
            TextElement {
                content: String::new(),
                face: style.header_face,
                size: style.header_size,
                color: style.header_text,
            },
        );
    }

    /// Draws one row of cells at the cursor and advances past it. `text`
    /// carries the font and color; its content is replaced per cell.
    fn draw_row(
        &mut self,
        table: &Table,
        x: f32,
        cells: &[String],
        height: f32,
        fill: Option<Color>,
        text: TextElement,
    ) {
        let style = &table.style;
        let stroke = Some(Stroke {
            color: style.grid_color,
            width: style.grid_width,
        });
        let y = self.cursor_y;
        let mut cell_x = x;
        for (col, width) in table.column_widths.iter().enumerate() {
            self.push(
                cell_x,
                y,
                *width,
                height,
                LayoutElement::Rectangle(RectElement { fill, stroke }),
            );
            if let Some(content) = cells.get(col).filter(|c| !c.is_empty()) {
                self.push_text(
                    cell_x + style.padding,
                    y + style.padding,
                    TextElement {
                        content: content.clone(),
                        ..text.clone()
                    },
                );
            }
            cell_x += width;
        }
        self.cursor_y += height;
    }

    fn layout_figure(&mut self, figure: &Figure) -> Result<(), RenderError> {
        self.ensure(figure.height)?;
        let x0 = self.left + ((self.content_width - figure.width) / 2.0).max(0.0);
        let y0 = self.cursor_y;
        let chart = &figure.chart;

        let title_width = figure.title_face.text_width(&chart.title, figure.title_size);
        self.push_text(
            x0 + (figure.width - title_width) / 2.0,
            y0,
            TextElement {
                content: chart.title.clone(),
                face: figure.title_face,
                size: figure.title_size,
                color: figure.text_color,
            },
        );

        let area_top = y0 + figure.title_size * 1.6;
        let area_height = figure.height - (area_top - y0);
        let diameter = figure.width.min(area_height) * 0.75;
        let radius = diameter / 2.0;
        let cx = x0 + figure.width / 2.0;
        let cy = area_top + area_height / 2.0;

        self.push(
            cx - radius,
            cy - radius,
            diameter,
            diameter,
            LayoutElement::Image(ImageElement {
                chart: Arc::clone(chart),
            }),
        );

        let size = figure.label_size;
        for wedge in &chart.wedges {
            let (ux, uy) = wedge.direction();
            let (ux, uy) = (ux as f32, uy as f32);

            let label_width = FontFace::Regular.text_width(&wedge.label, size);
            let lx = cx + ux * radius * 1.12;
            let ly = cy - uy * radius * 1.12;
            let label_x = if ux < 0.0 { lx - label_width } else { lx };
            self.push_text(
                label_x,
                ly - size / 2.0,
                TextElement {
                    content: wedge.label.clone(),
                    face: FontFace::Regular,
                    size,
                    color: figure.text_color,
                },
            );

            let percent = wedge.percent_label();
            let percent_width = FontFace::Regular.text_width(&percent, size);
            let px = cx + ux * radius * 0.6;
            let py = cy - uy * radius * 0.6;
            self.push_text(
                px - percent_width / 2.0,
                py - size / 2.0,
                TextElement {
                    content: percent,
                    face: FontFace::Regular,
                    size,
                    color: figure.text_color,
                },
            );
        }

        self.cursor_y = y0 + figure.height;
        Ok(())
    }
}
