//! Snapshot persistence.

use anyhow::{Context, Result};
use enveye_snapshot_schema::Snapshot;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Write the snapshot as indented JSON, creating or truncating `path`.
pub fn write_snapshot(snapshot: &Snapshot, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create snapshot file {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, snapshot).context("Failed to serialize snapshot")?;
    writer.write_all(b"\n")?;
    writer
        .flush()
        .with_context(|| format!("Failed to write snapshot file {}", path.display()))?;

    debug!("Snapshot written to {}", path.display());
    Ok(())
}
