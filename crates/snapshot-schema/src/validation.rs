//! Snapshot loading and failure reporting.

use crate::snapshot::{FileEntry, Snapshot};
use enveye_common::{Error, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Load a snapshot file into the typed model.
pub fn read_snapshot(path: &Path) -> Result<Snapshot> {
    let file = File::open(path)?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| Error::InvalidSnapshot(format!("{}: {}", path.display(), e)))
}

/// Contained failures recorded inside a snapshot, one line each.
///
/// Covers unreadable files, a stopped folder scan and failed service queries.
/// None of these make the snapshot invalid.
pub fn snapshot_warnings(snapshot: &Snapshot) -> Vec<String> {
    let ctx = &snapshot.environment_context;
    let mut warnings = Vec::new();

    for (path, entry) in &ctx.app_folder_files {
        match entry {
            FileEntry::Record(record) if record.is_digest_error() => {
                warnings.push(format!("{}: {}", path, record.sha256));
            }
            FileEntry::Record(_) => {}
            FileEntry::ScanError(err) => {
                warnings.push(format!("folder scan failed: {}", err.message));
            }
        }
    }

    for (service, status) in &ctx.required_services_status {
        if status.starts_with("error: ") {
            warnings.push(format!("service {}: {}", service, status));
        }
    }

    warnings
}
