//! Paginated PDF rendering of deployment and statistics reports.
//!
//! A report is first composed into a [`ReportDocument`] of flow blocks, laid
//! out onto US Letter pages by [`LayoutEngine`], and serialized by
//! [`PdfWriter`] using the base-14 Helvetica family.

pub mod chart;
pub mod layout;
pub mod metrics;
pub mod model;
pub mod renderer;
pub mod settings;
pub mod writer;

pub use chart::{ChartError, ChartRasterizer, PieChart, PieRasterizer, Wedge};
pub use layout::{LayoutEngine, Page};
pub use metrics::FontFace;
pub use model::{Block, ReportDocument};
pub use renderer::DocumentRenderer;
pub use settings::DocumentSettings;
pub use writer::{DocumentInfo, PdfWriter};
