//! Monthly deployment reports as `.xlsx` workbooks and paginated PDFs.
//!
//! ```no_run
//! use chklst_reports::{ReportFormat, ReportGenerator, ReportPeriod, StatisticsMapping};
//!
//! let generator = ReportGenerator::new();
//! let period = ReportPeriod::new(3, 2025)?;
//! let mut stats = StatisticsMapping::new();
//! stats.insert("total_deployments", 12_i64);
//! let pdf = generator.render_statistics(ReportFormat::Document, &stats, period)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod artifact;
pub mod clock;
pub mod config;
pub mod error;
pub mod generator;

pub use artifact::{ReportFormat, ReportKind, artifact_file_name};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::ReportConfig;
pub use error::ConfigError;
pub use generator::{ReportGenerator, ReportGeneratorBuilder};

pub use chklst_normalize::{breakdown, normalize};
pub use chklst_render_pdf::{ChartError, ChartRasterizer, DocumentSettings, PieChart};
pub use chklst_render_xlsx::SpreadsheetSettings;
pub use chklst_types::{
    CategoryBreakdown, Color, DataFormatError, DeploymentTable, Diagnostics, LogDiagnostics,
    RawRecord, RenderError, ReportError, ReportPeriod, ReportTheme, StatisticsMapping,
};
