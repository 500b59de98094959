//! Snapshot codec for the course list
//!
//! A snapshot is the whole ordered ledger as a JSON array of
//! `{ "id", "course", "credits", "grade" }` objects.

use crate::core::models::CourseRecord;
use crate::warn;
use std::collections::HashSet;
use thiserror::Error;

/// Errors raised while encoding or decoding a snapshot
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The payload is not valid snapshot JSON
    #[error("invalid course list snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serialize records into snapshot text
///
/// # Errors
/// Returns an error if serialization fails
pub fn encode(records: &[CourseRecord]) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(records)?)
}

/// Parse snapshot text back into ordered records
///
/// Only the first record for each id is kept; later ones are logged and
/// dropped.
///
/// # Errors
/// Returns an error if the text is not a JSON array of course objects
pub fn decode(text: &str) -> Result<Vec<CourseRecord>, SnapshotError> {
    let mut records: Vec<CourseRecord> = serde_json::from_str(text)?;

    let mut seen = HashSet::with_capacity(records.len());
    records.retain(|record| {
        let first = seen.insert(record.id);
        if !first {
            warn!(
                "Dropping stored course '{}': id {} is already in use",
                record.name, record.id
            );
        }
        first
    });

    Ok(records)
}
