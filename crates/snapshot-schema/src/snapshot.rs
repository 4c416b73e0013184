//! Snapshot types.
//!
//! Field order follows the key order of the serialized document so the
//! written JSON is stable across runs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Value reported for an allow-listed environment variable that is unset.
pub const NOT_SET: &str = "Not Set";

/// Key of the synthetic file-inventory entry describing a walk failure.
pub const SCAN_ERROR_KEY: &str = "error";

/// The single artifact produced per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Base name of the scanned application folder.
    pub application_name: String,
    /// Caller-supplied application type, e.g. "desktop" or "web".
    pub application_type: String,
    pub environment_context: EnvironmentContext,
    /// Creation time, RFC 3339.
    pub timestamp: String,
}

/// Collected host facts, one field per collection step.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EnvironmentContext {
    /// File inventory keyed by path relative to the application folder.
    pub app_folder_files: BTreeMap<String, FileEntry>,
    pub critical_environment_variables: BTreeMap<String, String>,
    pub os_info: OsInfo,
    /// Service name to status text as reported by the service manager.
    pub required_services_status: BTreeMap<String, String>,
}

/// Static host identity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OsInfo {
    pub architecture: String,
    pub name: String,
}

/// One value in the file inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FileEntry {
    Record(FileRecord),
    ScanError(ScanError),
}

impl FileEntry {
    pub fn as_record(&self) -> Option<&FileRecord> {
        match self {
            FileEntry::Record(record) => Some(record),
            FileEntry::ScanError(_) => None,
        }
    }
}

/// Size, modification time and digest of one matched file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Last modification time, RFC 3339.
    pub modified: String,
    /// Hex SHA-256 of the content, or `error: ...` when it could not be read.
    pub sha256: String,
    pub size_bytes: u64,
}

impl FileRecord {
    /// Whether the digest slot holds an error message instead of a hash.
    pub fn is_digest_error(&self) -> bool {
        self.sha256.starts_with("error: ")
    }
}

/// Directory walk failure recorded in place of (or next to) file records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanError {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Snapshot {
        let mut ctx = EnvironmentContext {
            os_info: OsInfo {
                architecture: "x86_64".to_string(),
                name: "linux".to_string(),
            },
            ..Default::default()
        };
        ctx.app_folder_files.insert(
            "lib.dll".to_string(),
            FileEntry::Record(FileRecord {
                modified: "2024-01-01T00:00:00Z".to_string(),
                sha256: "ab".repeat(32),
                size_bytes: 10,
            }),
        );
        ctx.critical_environment_variables
            .insert("APP_ENV".to_string(), NOT_SET.to_string());
        ctx.required_services_status
            .insert("nginx".to_string(), "active".to_string());

        Snapshot {
            application_name: "app".to_string(),
            application_type: "web".to_string(),
            environment_context: ctx,
            timestamp: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_environment_context_has_four_keys() {
        let value = serde_json::to_value(sample()).unwrap();
        let ctx = value["environment_context"].as_object().unwrap();
        let keys: Vec<&str> = ctx.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "app_folder_files",
                "critical_environment_variables",
                "os_info",
                "required_services_status"
            ]
        );
        assert_eq!(value["environment_context"]["app_folder_files"]["lib.dll"]["size_bytes"], 10);
    }

    #[test]
    fn test_scan_error_entry_shape() {
        let entry = FileEntry::ScanError(ScanError {
            message: "no such file".to_string(),
        });
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "no such file" }));

        let parsed: FileEntry = serde_json::from_value(json).unwrap();
        assert!(parsed.as_record().is_none());
    }

    #[test]
    fn test_record_entry_parses_as_record() {
        let json = serde_json::json!({
            "modified": "2024-01-01T00:00:00Z",
            "sha256": "error: permission denied",
            "size_bytes": 3
        });
        let parsed: FileEntry = serde_json::from_value(json).unwrap();
        let record = parsed.as_record().unwrap();
        assert!(record.is_digest_error());
        assert_eq!(record.size_bytes, 3);
    }
}
