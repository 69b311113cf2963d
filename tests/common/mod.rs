pub mod fixtures;
pub mod pdf_assertions;
pub mod xlsx_assertions;

use calamine::{Data, Range, Reader, Xlsx, open_workbook_from_rs};
use chklst_reports::{FixedClock, ReportGenerator, ReportGeneratorBuilder};
use chrono::{NaiveDate, NaiveDateTime};
use lopdf::Document as LopdfDocument;
use std::io::Cursor;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// The instant every test generator reports as "now".
pub fn generated_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 4, 1)
        .and_then(|d| d.and_hms_opt(9, 30, 0))
        .expect("valid fixed timestamp")
}

/// Builder preloaded with the fixed test clock.
pub fn fixed_builder() -> ReportGeneratorBuilder {
    ReportGenerator::builder().with_clock(FixedClock(generated_at()))
}

pub fn fixed_generator() -> ReportGenerator {
    fixed_builder().build()
}

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Text of one page, 1-based.
    pub fn page_text(&self, page: u32) -> String {
        self.doc.extract_text(&[page]).unwrap_or_default()
    }

    /// Save PDF to a file for manual debugging
    #[allow(dead_code)]
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

/// Wrapper around a generated workbook, read back with calamine.
pub struct GeneratedXlsx {
    pub bytes: Vec<u8>,
    pub workbook: Xlsx<Cursor<Vec<u8>>>,
}

impl GeneratedXlsx {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let workbook = open_workbook_from_rs(Cursor::new(bytes.clone()))?;
        Ok(Self { bytes, workbook })
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    pub fn sheet(&mut self, name: &str) -> Result<Range<Data>, Box<dyn std::error::Error>> {
        Ok(self.workbook.worksheet_range(name)?)
    }
}
