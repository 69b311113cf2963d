use serde::Deserialize;

/// Layout knobs for generated workbooks.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SpreadsheetSettings {
    /// Upper bound for auto-fitted data columns, in character units.
    pub max_column_width: f64,
    /// Added to the longest value when auto-fitting a column.
    pub column_padding: f64,
    /// Width of the label column on the summary and statistics sheets.
    pub label_column_width: f64,
    /// Width of the value column on the summary and statistics sheets.
    pub value_column_width: f64,
}

impl Default for SpreadsheetSettings {
    fn default() -> Self {
        Self {
            max_column_width: 50.0,
            column_padding: 2.0,
            label_column_width: 30.0,
            value_column_width: 20.0,
        }
    }
}

impl SpreadsheetSettings {
    /// Width for a column whose longest rendered value has `len` characters.
    pub fn fitted_width(&self, len: usize) -> f64 {
        (len as f64 + self.column_padding).min(self.max_column_width)
    }
}
