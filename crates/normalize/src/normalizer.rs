//! Projection of raw records onto the canonical column schema.

use crate::timestamp::timestamp_from_json;
use chklst_types::{Column, DataFormatError, DeploymentRecord, DeploymentTable, RawRecord, Scalar};
use std::collections::BTreeSet;

/// First pass: the canonical columns whose key appears in at least one
/// record, in canonical order. Empty input resolves to every column.
pub fn resolve_columns(raw: &[RawRecord]) -> Vec<Column> {
    if raw.is_empty() {
        return Column::ALL.to_vec();
    }
    let present: BTreeSet<Column> = raw
        .iter()
        .flat_map(|record| record.keys())
        .filter_map(|key| Column::from_key(key))
        .collect();
    present.into_iter().collect()
}

/// Validates one raw record. Unrecognized keys are ignored.
pub fn normalize_record(raw: &RawRecord) -> Result<DeploymentRecord, DataFormatError> {
    let mut record = DeploymentRecord::default();
    for column in Column::ALL {
        let Some(value) = raw.get(column.key()) else {
            continue;
        };
        if column == Column::Timestamp {
            record.timestamp = timestamp_from_json(value)?;
            continue;
        }
        let scalar = Scalar::from_json(value).map_err(|v| {
            DataFormatError::new(column.key(), v.to_string(), "expected a string, number or boolean")
        })?;
        if let Some(slot) = record.scalar_slot_mut(column) {
            *slot = scalar;
        }
    }
    Ok(record)
}

/// Second pass: resolves the column set and validates every record.
///
/// Fails on the first malformed value; no partial table is returned.
pub fn normalize(raw: &[RawRecord]) -> Result<DeploymentTable, DataFormatError> {
    let columns = resolve_columns(raw);
    let records = raw
        .iter()
        .map(normalize_record)
        .collect::<Result<Vec<_>, _>>()?;
    log::debug!(
        "Normalized {} records onto {} columns",
        records.len(),
        columns.len()
    );
    Ok(DeploymentTable { columns, records })
}
