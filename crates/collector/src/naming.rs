//! Snapshot file naming and output path resolution.

use enveye_common::{Error, OsType, Result, Timestamp};
use std::path::{Path, PathBuf};

/// `{hostname}_{app}_{osTag}_{YYYYMMDDThhmmss}[_{LABEL}].json`
pub fn snapshot_file_name(
    hostname: &str,
    app_name: &str,
    os_type: OsType,
    captured_at: &Timestamp,
    label: Option<&str>,
) -> String {
    let label_suffix = match label {
        Some(label) if !label.is_empty() => format!("_{}", label.to_uppercase()),
        _ => String::new(),
    };
    format!(
        "{}_{}_{}_{}{}.json",
        hostname,
        app_name,
        os_type.tag(),
        captured_at.to_file_stamp(),
        label_suffix
    )
}

/// Where the snapshot goes.
///
/// An absolute `output` is used as-is, a relative one is joined to
/// `base_dir`, and without `output` the derived `file_name` is placed in
/// `base_dir`.
pub fn resolve_output_path(base_dir: &Path, output: Option<&Path>, file_name: &str) -> PathBuf {
    match output {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => base_dir.join(path),
        None => base_dir.join(file_name),
    }
}

/// Directory containing the running executable.
pub fn executable_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().map_err(|e| Error::ExecutableLocation(e.to_string()))?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| Error::ExecutableLocation(format!("{} has no parent", exe.display())))
}

/// Final component of the application folder path.
pub fn application_name(app_folder: &Path) -> String {
    if let Some(name) = app_folder.file_name() {
        return name.to_string_lossy().into_owned();
    }
    // "." or "..": fall back to the resolved directory's own name
    app_folder
        .canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| app_folder.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn stamp() -> Timestamp {
        Timestamp::from_datetime(Local.with_ymd_and_hms(2025, 1, 31, 23, 59, 1).unwrap())
    }

    #[test]
    fn test_file_name_layout() {
        let name = snapshot_file_name("web-01", "shop", OsType::Linux, &stamp(), None);
        assert_eq!(name, "web-01_shop_LIN_20250131T235901.json");

        let generic = snapshot_file_name("h", "a", OsType::Unknown, &stamp(), Some(""));
        assert_eq!(generic, "h_a_GEN_20250131T235901.json");
    }

    #[test]
    fn test_label_only_changes_suffix() {
        let plain = snapshot_file_name("web-01", "shop", OsType::Windows, &stamp(), None);
        let labelled =
            snapshot_file_name("web-01", "shop", OsType::Windows, &stamp(), Some("good"));

        assert_eq!(labelled, "web-01_shop_WIN_20250131T235901_GOOD.json");
        assert_eq!(
            plain.trim_end_matches(".json"),
            labelled.trim_end_matches("_GOOD.json")
        );
    }

    #[test]
    fn test_resolve_output_path() {
        let base = std::env::temp_dir().join("enveye-bin");
        let absolute = std::env::temp_dir().join("elsewhere").join("snap.json");

        assert_eq!(
            resolve_output_path(&base, Some(&absolute), "derived.json"),
            absolute
        );
        assert_eq!(
            resolve_output_path(&base, Some(Path::new("out/snap.json")), "derived.json"),
            base.join("out/snap.json")
        );
        assert_eq!(
            resolve_output_path(&base, None, "derived.json"),
            base.join("derived.json")
        );
    }

    #[test]
    fn test_application_name() {
        assert_eq!(application_name(Path::new("/srv/apps/shop")), "shop");
        assert_eq!(application_name(Path::new("/srv/apps/shop/")), "shop");

        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        let expected = dir
            .path()
            .canonicalize()
            .unwrap()
            .file_name()
            .unwrap()
            .to_string_lossy()
            .into_owned();
        assert_eq!(application_name(&dir.path().join("sub").join("..")), expected);
    }

    #[test]
    fn test_executable_dir_exists() {
        assert!(executable_dir().unwrap().is_dir());
    }
}
