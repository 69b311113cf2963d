//! Count-by-category shared by every output format.

use chklst_types::{CategoryBreakdown, DeploymentRecord, UNKNOWN_CATEGORY};
use std::borrow::Cow;

/// The category a record is counted under: its environment, or
/// [`UNKNOWN_CATEGORY`] when that is missing or blank.
pub fn category_of(record: &DeploymentRecord) -> Cow<'_, str> {
    match &record.environment {
        Some(env) if !env.is_blank() => match env.as_str() {
            Some(s) => Cow::Borrowed(s),
            None => Cow::Owned(env.to_string()),
        },
        _ => Cow::Borrowed(UNKNOWN_CATEGORY),
    }
}

/// Groups records by environment. The counts always sum to `records.len()`.
pub fn breakdown(records: &[DeploymentRecord]) -> CategoryBreakdown {
    let mut counts = CategoryBreakdown::new();
    for record in records {
        counts.increment(&category_of(record));
    }
    counts
}
