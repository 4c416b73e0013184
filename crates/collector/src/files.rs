//! File-integrity scan of the application folder.
//!
//! Only files whose extension is in [`INCLUDED_EXTENSIONS`] are recorded.
//! A file that cannot be hashed keeps its record with an `error: ...`
//! digest. A walk failure stops the walk; records gathered before it are
//! kept and the failure is added under [`SCAN_ERROR_KEY`]. No file key can
//! clash with that key since every recorded name carries an extension.

use chrono::{DateTime, Local};
use enveye_common::{hash, Timestamp};
use enveye_snapshot_schema::{FileEntry, FileRecord, ScanError, SCAN_ERROR_KEY};
use std::collections::BTreeMap;
use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Extensions (with leading dot, case-sensitive) eligible for the inventory.
pub const INCLUDED_EXTENSIONS: [&str; 6] = [".dll", ".so", ".dylib", ".config", ".json", ".xml"];

/// Walk `root` and record every matching file, keyed by its path relative to `root`.
pub fn scan_app_folder(root: &Path) -> BTreeMap<String, FileEntry> {
    let entries = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .map(|entry| {
            entry
                .map(|e| e.into_path())
                .map_err(|e| e.to_string())
        });
    collect_records(root, entries)
}

fn collect_records<I>(root: &Path, entries: I) -> BTreeMap<String, FileEntry>
where
    I: IntoIterator<Item = Result<PathBuf, String>>,
{
    let mut results = BTreeMap::new();

    for entry in entries {
        let path = match entry {
            Ok(path) => path,
            Err(message) => {
                record_walk_error(&mut results, message);
                break;
            }
        };

        if !has_included_extension(&path) {
            continue;
        }

        let metadata = match fs::symlink_metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) => {
                record_walk_error(&mut results, format!("{}: {}", path.display(), e));
                break;
            }
        };
        if metadata.is_dir() {
            continue;
        }

        let key = relative_key(root, &path);
        debug!("Hashing {}", key);
        results.insert(key, FileEntry::Record(file_record(&path, &metadata)));
    }

    results
}

fn record_walk_error(results: &mut BTreeMap<String, FileEntry>, message: String) {
    warn!("Folder scan stopped: {}", message);
    results.insert(
        SCAN_ERROR_KEY.to_string(),
        FileEntry::ScanError(ScanError { message }),
    );
}

fn file_record(path: &Path, metadata: &Metadata) -> FileRecord {
    let modified = metadata
        .modified()
        .map(|t| Timestamp::from_datetime(DateTime::<Local>::from(t)).to_rfc3339())
        .unwrap_or_default();
    let sha256 = hash::sha256_file(path).unwrap_or_else(|e| format!("error: {}", e));

    FileRecord {
        modified,
        sha256,
        size_bytes: metadata.len(),
    }
}

/// Suffix of the final path component starting at its last dot.
fn extension(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_string_lossy();
    name.rfind('.').map(|idx| name[idx..].to_string())
}

fn has_included_extension(path: &Path) -> bool {
    extension(path).is_some_and(|ext| INCLUDED_EXTENSIONS.contains(&ext.as_str()))
}

fn relative_key(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    if rel.as_os_str().is_empty() {
        ".".to_string()
    } else {
        rel.to_string_lossy().into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_extension_rules() {
        assert!(has_included_extension(Path::new("a/lib.dll")));
        assert!(has_included_extension(Path::new("app.exe.config")));
        assert!(has_included_extension(Path::new(".json")));
        assert!(!has_included_extension(Path::new("LIB.DLL")));
        assert!(!has_included_extension(Path::new("readme.txt")));
        assert!(!has_included_extension(Path::new("Makefile")));
        assert!(!has_included_extension(Path::new("archive.so.1")));
    }

    #[test]
    fn test_scan_selects_by_extension() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("lib.dll"), b"0123456789").unwrap();
        std::fs::write(dir.path().join("readme.txt"), b"ignored").unwrap();

        let files = scan_app_folder(dir.path());
        assert_eq!(files.len(), 1);
        let record = files["lib.dll"].as_record().unwrap();
        assert_eq!(record.size_bytes, 10);
        assert_eq!(record.sha256, hash::sha256_bytes(b"0123456789"));
        assert!(DateTime::parse_from_rfc3339(&record.modified).is_ok());
    }

    #[test]
    fn test_nested_keys_are_relative() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("bin").join("x64");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("native.so"), b"elf").unwrap();
        // Directories never become records, even with a matching suffix.
        std::fs::create_dir_all(dir.path().join("settings.json")).unwrap();

        let files = scan_app_folder(dir.path());
        let expected = Path::new("bin").join("x64").join("native.so");
        assert_eq!(files.len(), 1);
        assert!(files.contains_key(&*expected.to_string_lossy()));
    }

    #[test]
    fn test_identical_content_identical_digest() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("a.xml"), b"<same/>").unwrap();
        std::fs::write(dir.path().join("sub").join("b.config"), b"<same/>").unwrap();

        let files = scan_app_folder(dir.path());
        let a = files["a.xml"].as_record().unwrap();
        let b_key = Path::new("sub").join("b.config");
        let b = files[&*b_key.to_string_lossy()].as_record().unwrap();
        assert_eq!(a.sha256, b.sha256);
    }

    #[test]
    fn test_missing_root_is_single_error_entry() {
        let dir = tempdir().unwrap();
        let files = scan_app_folder(&dir.path().join("does-not-exist"));

        assert_eq!(files.len(), 1);
        assert!(matches!(files[SCAN_ERROR_KEY], FileEntry::ScanError(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_file_keeps_siblings() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("good.json"), b"{}").unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("broken.dylib"))
            .unwrap();

        let files = scan_app_folder(dir.path());
        assert_eq!(files.len(), 2);
        let broken = files["broken.dylib"].as_record().unwrap();
        assert!(broken.is_digest_error());
        let good = files["good.json"].as_record().unwrap();
        assert_eq!(good.sha256, hash::sha256_bytes(b"{}"));
    }

    #[cfg(unix)]
    #[test]
    fn test_excluded_unreadable_file_is_invisible() {
        let dir = tempdir().unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("broken.txt"))
            .unwrap();

        assert!(scan_app_folder(dir.path()).is_empty());
    }

    #[test]
    fn test_walk_error_keeps_partial_records() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("first.dll");
        let later = dir.path().join("later.dll");
        std::fs::write(&first, b"one").unwrap();
        std::fs::write(&later, b"two").unwrap();

        let entries = vec![
            Ok(dir.path().to_path_buf()),
            Ok(first),
            Err("permission denied".to_string()),
            Ok(later),
        ];
        let files = collect_records(dir.path(), entries);

        assert_eq!(files.len(), 2);
        assert!(files["first.dll"].as_record().is_some());
        assert_eq!(
            files[SCAN_ERROR_KEY],
            FileEntry::ScanError(ScanError {
                message: "permission denied".to_string()
            })
        );
        assert!(!files.contains_key("later.dll"));
    }
}
