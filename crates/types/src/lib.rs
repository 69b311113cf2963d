//! Foundation types for deployment report rendering.
//!
//! Everything here is plain data: records before and after validation, the
//! reporting period, statistics mappings, category counts, the visual theme
//! and the error taxonomy. The normalizer and both renderers build on it.

pub mod breakdown;
pub mod color;
pub mod diagnostics;
pub mod error;
pub mod period;
pub mod record;
pub mod scalar;
pub mod stats;
pub mod theme;

pub use breakdown::{CategoryBreakdown, UNKNOWN_CATEGORY};
pub use color::Color;
pub use diagnostics::{Diagnostics, LogDiagnostics};
pub use error::{BoxedCause, DataFormatError, RenderError, ReportError};
pub use period::ReportPeriod;
pub use record::{Column, DeploymentRecord, DeploymentTable, RawRecord, TIMESTAMP_FORMAT};
pub use scalar::Scalar;
pub use stats::{StatisticsMapping, title_case};
pub use theme::{FontSizes, ReportTheme};
