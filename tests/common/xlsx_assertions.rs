use calamine::{Data, DataType, Range};
use std::io::Read;

/// Cell contents as display text; empty cells read as "".
pub fn cell_text(range: &Range<Data>, row: u32, col: u32) -> String {
    match range.get_value((row, col)) {
        None | Some(Data::Empty) => String::new(),
        Some(Data::Float(f)) if f.fract() == 0.0 => format!("{}", *f as i64),
        Some(other) => other.to_string(),
    }
}

pub fn cell_number(range: &Range<Data>, row: u32, col: u32) -> Option<f64> {
    range.get_value((row, col)).and_then(|data| data.as_f64())
}

/// Raw XML of one part inside the workbook zip, e.g. `xl/workbook.xml`.
pub fn zip_part(bytes: &[u8], name: &str) -> Result<String, Box<dyn std::error::Error>> {
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes))?;
    let mut part = archive.by_name(name)?;
    let mut xml = String::new();
    part.read_to_string(&mut xml)?;
    Ok(xml)
}

/// Assert a cell's display text
#[macro_export]
macro_rules! assert_cell_text {
    ($range:expr, ($row:expr, $col:expr), $text:expr) => {
        assert_eq!(
            $crate::common::xlsx_assertions::cell_text(&$range, $row, $col),
            $text,
            "unexpected text at row {} col {}",
            $row,
            $col
        );
    };
}
