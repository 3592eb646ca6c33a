//! On-disk persistence of a named reference index bundle.
//!
//! `serde` plus `bincode` back a single opaque blob per reference set, preserving the
//! "preprocess once, query many times" contract without re-deriving the tables on load.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::error::ReadmapError;
use crate::index::{PersistedRecord, ReferenceSet};

/// Persist every reference in `refs` to `path` as a single `bincode`-encoded blob.
pub fn save(path: impl AsRef<Path>, refs: &ReferenceSet) -> Result<(), ReadmapError> {
    let records = refs.to_records();
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    bincode::serialize_into(writer, &records)?;
    Ok(())
}

/// Load a previously-persisted reference set, validating table-shape invariants on the way in
/// (`SearchError::CorruptIndex` rather than a panic on a truncated or malformed blob).
pub fn load(path: impl AsRef<Path>) -> Result<ReferenceSet, ReadmapError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let records: Vec<(String, PersistedRecord)> = bincode::deserialize_from(reader)?;
    Ok(ReferenceSet::from_records(records)?)
}
