//! Snapshot schema definitions for enveye.
//!
//! This crate defines the structure of the snapshot artifact written by the
//! collector and consumed by baseline-diff tooling.

pub mod snapshot;
pub mod validation;

pub use snapshot::{
    EnvironmentContext, FileEntry, FileRecord, OsInfo, ScanError, Snapshot, NOT_SET,
    SCAN_ERROR_KEY,
};
pub use validation::{read_snapshot, snapshot_warnings};
