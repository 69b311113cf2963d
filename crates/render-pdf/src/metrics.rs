//! Base-14 Helvetica faces and their advance widths.
//!
//! Widths are in 1/1000 em, taken from the standard Adobe font metrics and
//! indexed by WinAnsi code point.

/// One of the three Helvetica faces a report uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontFace {
    #[default]
    Regular,
    Bold,
    Oblique,
}

impl FontFace {
    pub const ALL: [FontFace; 3] = [FontFace::Regular, FontFace::Bold, FontFace::Oblique];

    /// Name of the font in the shared page resources.
    pub fn resource_name(self) -> &'static str {
        match self {
            FontFace::Regular => "F1",
            FontFace::Bold => "F2",
            FontFace::Oblique => "F3",
        }
    }

    pub fn base_font(self) -> &'static str {
        match self {
            FontFace::Regular => "Helvetica",
            FontFace::Bold => "Helvetica-Bold",
            FontFace::Oblique => "Helvetica-Oblique",
        }
    }

    /// Advance width of `c` in 1/1000 em. Oblique shares the regular widths.
    pub fn glyph_width(self, c: char) -> u16 {
        let (ascii, latin1) = match self {
            FontFace::Bold => (&BOLD_ASCII, &BOLD_LATIN1),
            FontFace::Regular | FontFace::Oblique => (&REGULAR_ASCII, &REGULAR_LATIN1),
        };
        match c as u32 {
            code @ 32..=126 => ascii[(code - 32) as usize],
            code @ 160..=255 => latin1[(code - 160) as usize],
            _ => ascii[(u32::from(b'?') - 32) as usize],
        }
    }

    /// Width of `text` set at `size` points.
    pub fn text_width(self, text: &str, size: f32) -> f32 {
        let units: u32 = text.chars().map(|c| u32::from(self.glyph_width(c))).sum();
        units as f32 * size / 1000.0
    }
}

/// Encodes `text` for a WinAnsi base-14 font. Anything outside Latin-1
/// becomes `?`.
pub fn to_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| if (c as u32) <= 255 { c as u8 } else { b'?' })
        .collect()
}

#[rustfmt::skip]
const REGULAR_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const REGULAR_LATIN1: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

#[rustfmt::skip]
const BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

#[rustfmt::skip]
const BOLD_LATIN1: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278,
    611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_widths() {
        assert_eq!(FontFace::Regular.glyph_width(' '), 278);
        assert_eq!(FontFace::Regular.glyph_width('W'), 944);
        assert_eq!(FontFace::Regular.glyph_width('~'), 584);
        assert_eq!(FontFace::Bold.glyph_width('a'), 556);
        assert_eq!(FontFace::Bold.glyph_width('b'), 611);
        assert_eq!(FontFace::Regular.glyph_width('é'), 556);
        assert_eq!(FontFace::Oblique.glyph_width('m'), FontFace::Regular.glyph_width('m'));
    }

    #[test]
    fn text_width_scales_with_size() {
        let w10 = FontFace::Regular.text_width("Summary", 10.0);
        let w20 = FontFace::Regular.text_width("Summary", 20.0);
        assert!((w20 - 2.0 * w10).abs() < 1e-3);
        assert!(FontFace::Bold.text_width("Summary", 10.0) > w10);
    }

    #[test]
    fn win_ansi_replaces_wide_characters() {
        assert_eq!(to_win_ansi("café"), vec![b'c', b'a', b'f', 0xe9]);
        assert_eq!(to_win_ansi("日本"), b"??".to_vec());
    }
}
