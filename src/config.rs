use crate::error::ConfigError;
use chklst_render_pdf::DocumentSettings;
use chklst_render_xlsx::SpreadsheetSettings;
use chklst_types::ReportTheme;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Everything tunable about report output. Every section and field is
/// optional in the JSON form; omitted values keep their defaults.
///
/// ```json
/// {
///   "theme": { "brand": "#1f4e79", "font-sizes": { "title": 20 } },
///   "spreadsheet": { "max-column-width": 60 },
///   "document": { "detail-row-limit": 100 }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ReportConfig {
    pub theme: ReportTheme,
    pub spreadsheet: SpreadsheetSettings,
    pub document: DocumentSettings,
}

impl ReportConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded report config from {}", path.display());
        Self::from_json(&json)
    }
}
