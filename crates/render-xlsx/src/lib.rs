//! Spreadsheet (`.xlsx`) rendering of deployment and statistics reports.

mod formats;
pub mod renderer;
pub mod settings;

pub use renderer::SpreadsheetRenderer;
pub use settings::SpreadsheetSettings;
