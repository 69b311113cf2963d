//! Serializes laid-out pages with `lopdf`.
//!
//! Every page shares one resources dictionary holding the three Helvetica
//! faces and any chart images. Content and image streams are
//! zlib-compressed.

use crate::chart::PieChart;
use crate::layout::{ImageElement, LayoutElement, Page, PositionedElement, RectElement, TextElement};
use crate::metrics::{FontFace, to_win_ansi};
use chklst_types::{Color, RenderError};
use chrono::NaiveDateTime;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use std::io::Write;
use std::sync::Arc;

const PRODUCER: &str = "chklst-reports";

/// Metadata written to the document information dictionary.
#[derive(Debug, Clone)]
pub struct DocumentInfo {
    pub title: String,
    pub created: NaiveDateTime,
}

fn pdf_error(e: lopdf::Error) -> RenderError {
    RenderError::pdf(e.to_string())
}

fn compress(data: &[u8]) -> Result<Vec<u8>, RenderError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// An in-memory PDF writer. Builds the object graph page by page and
/// serializes it on [`finish`](PdfWriter::finish).
pub struct PdfWriter {
    document: Document,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
    resources_id: ObjectId,
    images: Vec<(Arc<PieChart>, String)>,
    page_width: f32,
    page_height: f32,
}

impl PdfWriter {
    pub fn new(page_width: f32, page_height: f32) -> Self {
        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();
        let resources_id = document.new_object_id();
        Self {
            document,
            pages_id,
            page_ids: Vec::new(),
            resources_id,
            images: Vec::new(),
            page_width,
            page_height,
        }
    }

    /// Registers fonts and every image referenced by `pages`, and sets up the
    /// page tree and catalog.
    pub fn begin_document(&mut self, pages: &[Page]) -> Result<(), RenderError> {
        let mut fonts = Dictionary::new();
        for face in FontFace::ALL {
            let font_id = self.document.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => face.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(face.resource_name(), font_id);
        }

        let mut xobjects = Dictionary::new();
        for element in pages.iter().flat_map(|p| p.elements.iter()) {
            if let LayoutElement::Image(ImageElement { chart }) = &element.element {
                if self.images.iter().any(|(known, _)| Arc::ptr_eq(known, chart)) {
                    continue;
                }
                let name = format!("Im{}", self.images.len() + 1);
                let image_id = self.add_image(chart)?;
                xobjects.set(name.as_bytes(), image_id);
                self.images.push((Arc::clone(chart), name));
            }
        }

        let mut resources = dictionary! { "Font" => fonts };
        if !xobjects.is_empty() {
            resources.set("XObject", xobjects);
        }
        self.document
            .objects
            .insert(self.resources_id, Object::Dictionary(resources));

        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![],
            "Count" => 0,
        };
        self.document
            .objects
            .insert(self.pages_id, Object::Dictionary(pages_dict));

        let catalog_id = self
            .document
            .add_object(dictionary! { "Type" => "Catalog", "Pages" => self.pages_id });
        self.document.trailer.set("Root", catalog_id);
        Ok(())
    }

    fn add_image(&mut self, chart: &PieChart) -> Result<ObjectId, RenderError> {
        let (width, height) = chart.image.dimensions();
        let data = compress(chart.image.as_raw())?;
        let stream = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => i64::from(width),
                "Height" => i64::from(height),
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => "FlateDecode",
            },
            data,
        );
        Ok(self.document.add_object(stream))
    }

    pub fn render_page(&mut self, page: &Page) -> Result<(), RenderError> {
        let mut page_ctx = PageContext::new(self.page_height, &self.images);
        for element in &page.elements {
            page_ctx.draw_element(element);
        }
        let content = page_ctx.finish();

        let compressed = compress(&content.encode().map_err(pdf_error)?)?;
        let content_stream = Stream::new(dictionary! { "Filter" => "FlateDecode" }, compressed);
        let content_id = self.document.add_object(content_stream);

        let page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), self.page_width.into(), self.page_height.into()],
            "Contents" => content_id,
            "Resources" => self.resources_id,
        };
        let page_id = self.document.add_object(page_dict);
        self.page_ids.push(page_id);
        Ok(())
    }

    pub fn finish(mut self, info: &DocumentInfo) -> Result<Vec<u8>, RenderError> {
        if let Some(Object::Dictionary(pages_dict)) = self.document.objects.get_mut(&self.pages_id) {
            let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::from(*id)).collect();
            pages_dict.set("Kids", kids);
            pages_dict.set("Count", self.page_ids.len() as i64);
        }

        let info_id = self.document.add_object(dictionary! {
            "Title" => Object::string_literal(to_win_ansi(&info.title)),
            "Producer" => Object::string_literal(PRODUCER),
            "CreationDate" => Object::string_literal(
                format!("D:{}", info.created.format("%Y%m%d%H%M%S"))
            ),
        });
        self.document.trailer.set("Info", info_id);

        let mut buffer = Vec::new();
        self.document.save_to(&mut buffer)?;
        Ok(buffer)
    }
}

struct PageContext<'a> {
    page_height: f32,
    images: &'a [(Arc<PieChart>, String)],
    content: Content,
    state: PageRenderState,
}

#[derive(Default, Clone)]
struct PageRenderState {
    font: Option<(FontFace, f32)>,
    fill_color: Option<Color>,
}

impl<'a> PageContext<'a> {
    fn new(page_height: f32, images: &'a [(Arc<PieChart>, String)]) -> Self {
        Self {
            page_height,
            images,
            content: Content { operations: vec![] },
            state: PageRenderState::default(),
        }
    }

    fn finish(self) -> Content {
        self.content
    }

    fn op(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    fn draw_element(&mut self, el: &PositionedElement) {
        match &el.element {
            LayoutElement::Text(text) => self.draw_text(text, el),
            LayoutElement::Rectangle(rect) => self.draw_rect(rect, el),
            LayoutElement::Image(image) => self.draw_image(image, el),
        }
    }

    fn set_fill_color(&mut self, color: Color) {
        if self.state.fill_color != Some(color) {
            let [r, g, b] = color.to_unit_rgb();
            self.op("rg", vec![r.into(), g.into(), b.into()]);
            self.state.fill_color = Some(color);
        }
    }

    fn set_font(&mut self, face: FontFace, size: f32) {
        if self.state.font != Some((face, size)) {
            self.op("Tf", vec![face.resource_name().into(), size.into()]);
            self.state.font = Some((face, size));
        }
    }

    fn draw_rect(&mut self, rect: &RectElement, el: &PositionedElement) {
        let y = self.page_height - (el.y + el.height);
        if let Some(fill) = rect.fill {
            self.set_fill_color(fill);
            self.op("re", vec![el.x.into(), y.into(), el.width.into(), el.height.into()]);
            self.op("f", vec![]);
        }
        if let Some(stroke) = rect.stroke {
            let [r, g, b] = stroke.color.to_unit_rgb();
            self.op("w", vec![stroke.width.into()]);
            self.op("RG", vec![r.into(), g.into(), b.into()]);
            self.op("re", vec![el.x.into(), y.into(), el.width.into(), el.height.into()]);
            self.op("S", vec![]);
        }
    }

    fn draw_text(&mut self, text: &TextElement, el: &PositionedElement) {
        if text.content.trim().is_empty() {
            return;
        }
        self.op("BT", vec![]);
        self.set_font(text.face, text.size);
        self.set_fill_color(text.color);
        let baseline_y = el.y + text.size * 0.8;
        let pdf_y = self.page_height - baseline_y;
        self.op("Td", vec![el.x.into(), pdf_y.into()]);
        self.op("Tj", vec![Object::string_literal(to_win_ansi(&text.content))]);
        self.op("ET", vec![]);
    }

    fn draw_image(&mut self, image: &ImageElement, el: &PositionedElement) {
        let Some(name) = self
            .images
            .iter()
            .find(|(chart, _)| Arc::ptr_eq(chart, &image.chart))
            .map(|(_, name)| name.clone())
        else {
            log::warn!("Image on page was not registered with the document; skipping");
            return;
        };
        let y = self.page_height - (el.y + el.height);
        self.op("q", vec![]);
        self.op(
            "cm",
            vec![
                el.width.into(),
                0.into(),
                0.into(),
                el.height.into(),
                el.x.into(),
                y.into(),
            ],
        );
        self.op("Do", vec![name.as_str().into()]);
        self.op("Q", vec![]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn info() -> DocumentInfo {
        DocumentInfo {
            title: "Test".into(),
            created: NaiveDate::from_ymd_opt(2025, 1, 2)
                .and_then(|d| d.and_hms_opt(3, 4, 5))
                .unwrap(),
        }
    }

    fn text_page(content: &str) -> Page {
        Page {
            elements: vec![PositionedElement {
                x: 30.0,
                y: 30.0,
                width: 50.0,
                height: 10.0,
                element: LayoutElement::Text(TextElement {
                    content: content.into(),
                    face: FontFace::Bold,
                    size: 10.0,
                    color: Color::BLACK,
                }),
            }],
        }
    }

    fn write(pages: &[Page]) -> Vec<u8> {
        let mut writer = PdfWriter::new(612.0, 792.0);
        writer.begin_document(pages).unwrap();
        for page in pages {
            writer.render_page(page).unwrap();
        }
        writer.finish(&info()).unwrap()
    }

    #[test]
    fn writes_loadable_document_with_all_pages() {
        let pages = vec![text_page("first"), text_page("second")];
        let bytes = write(&pages);
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
        let text = doc.extract_text(&[2]).unwrap();
        assert!(text.contains("second"));
    }

    #[test]
    fn info_dictionary_carries_title_and_creation_date() {
        let bytes = write(&[text_page("x")]);
        let doc = Document::load_mem(&bytes).unwrap();
        let info_ref = doc.trailer.get(b"Info").and_then(|o| o.as_reference()).unwrap();
        let info = doc.get_dictionary(info_ref).unwrap();
        assert_eq!(info.get(b"Title").and_then(|o| o.as_str()).unwrap(), b"Test");
        assert_eq!(
            info.get(b"CreationDate").and_then(|o| o.as_str()).unwrap(),
            b"D:20250102030405"
        );
    }

    #[test]
    fn output_is_deterministic() {
        let pages = vec![text_page("same")];
        assert_eq!(write(&pages), write(&pages));
    }
}
