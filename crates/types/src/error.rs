//! The error taxonomy shared by every stage of report rendering.

use thiserror::Error;

/// Boxed source error carried by [`RenderError`] variants.
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A field value that could not be interpreted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid value for '{field}': {value:?} ({reason})")]
pub struct DataFormatError {
    pub field: String,
    pub value: String,
    pub reason: String,
}

impl DataFormatError {
    pub fn new(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Failure while building or serializing an output artifact.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Spreadsheet serialization error: {0}")]
    Spreadsheet(#[source] BoxedCause),
    #[error("PDF generation error: {0}")]
    Pdf(#[source] BoxedCause),
    #[error("Layout error: {0}")]
    Layout(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    pub fn spreadsheet(cause: impl Into<BoxedCause>) -> Self {
        RenderError::Spreadsheet(cause.into())
    }

    pub fn pdf(cause: impl Into<BoxedCause>) -> Self {
        RenderError::Pdf(cause.into())
    }
}

/// The error returned by the report entry points.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error(transparent)]
    DataFormat(#[from] DataFormatError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn data_format_error_names_field_and_value() {
        let err = DataFormatError::new("timestamp", "not-a-date", "expected ISO-8601");
        let msg = err.to_string();
        assert!(msg.contains("timestamp"));
        assert!(msg.contains("not-a-date"));
    }

    #[test]
    fn render_error_keeps_its_cause() {
        let io = std::io::Error::other("disk gone");
        let err = RenderError::pdf(io);
        assert!(err.source().is_some());
        let report: ReportError = err.into();
        assert!(report.to_string().contains("disk gone"));
    }
}
