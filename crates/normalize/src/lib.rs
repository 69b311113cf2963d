//! Validation of loosely-typed deployment records and the shared
//! count-by-category helper.
//!
//! Both renderers consume the [`DeploymentTable`](chklst_types::DeploymentTable)
//! produced here and derive category counts through [`breakdown`], so the
//! two output formats cannot disagree on totals or labels.

pub mod aggregate;
pub mod normalizer;
pub mod timestamp;

pub use aggregate::{breakdown, category_of};
pub use normalizer::{normalize, normalize_record, resolve_columns};
pub use timestamp::{parse_timestamp, timestamp_from_json};
