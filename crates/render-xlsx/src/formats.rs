//! Cell formats derived from the report theme.

use chklst_types::{Color, ReportTheme};
use rust_xlsxwriter::{Color as XlsxColor, Format, FormatAlign, FormatBorder};

fn xlsx_color(color: Color) -> XlsxColor {
    XlsxColor::RGB(color.to_rgb_u32())
}

/// Every format a report workbook uses, built once per render.
pub(crate) struct SheetFormats {
    pub title: Format,
    pub metadata: Format,
    pub header: Format,
    pub cell: Format,
    pub label: Format,
    pub plain: Format,
}

impl SheetFormats {
    pub fn new(theme: &ReportTheme) -> Self {
        let sizes = &theme.font_sizes;
        Self {
            title: Format::new()
                .set_bold()
                .set_font_size(sizes.sheet_title)
                .set_align(FormatAlign::Center),
            metadata: Format::new()
                .set_italic()
                .set_font_size(sizes.sheet_metadata),
            header: Format::new()
                .set_bold()
                .set_font_size(sizes.sheet_header)
                .set_font_color(xlsx_color(theme.header_text))
                .set_background_color(xlsx_color(theme.brand))
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_border(FormatBorder::Thin),
            cell: Format::new()
                .set_align(FormatAlign::VerticalCenter)
                .set_border(FormatBorder::Thin),
            label: Format::new().set_bold(),
            plain: Format::new(),
        }
    }
}
