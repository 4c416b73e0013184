//! Host identity and environment variable readings.

use enveye_snapshot_schema::{OsInfo, NOT_SET};
use std::collections::BTreeMap;
use tracing::debug;

/// Environment variables recorded in every snapshot.
pub const CRITICAL_ENV_VARS: [&str; 2] = ["APP_ENV", "ENVIRONMENT"];

/// OS family and CPU architecture of the running build.
pub fn os_info() -> OsInfo {
    OsInfo {
        architecture: std::env::consts::ARCH.to_string(),
        name: std::env::consts::OS.to_string(),
    }
}

/// Values of [`CRITICAL_ENV_VARS`].
pub fn critical_environment_variables() -> BTreeMap<String, String> {
    read_env_variables(&CRITICAL_ENV_VARS)
}

/// Read each variable, reporting unset ones as [`NOT_SET`].
pub fn read_env_variables(keys: &[&str]) -> BTreeMap<String, String> {
    keys.iter()
        .map(|key| {
            let value = std::env::var_os(key)
                .map(|v| v.to_string_lossy().into_owned())
                .unwrap_or_else(|| NOT_SET.to_string());
            (key.to_string(), value)
        })
        .collect()
}

/// Local host name, or "unknown" when the system cannot report one.
pub fn hostname() -> String {
    host_name_or_unknown(::hostname::get().map(|h| h.to_string_lossy().into_owned()))
}

fn host_name_or_unknown(name: std::io::Result<String>) -> String {
    match name {
        Ok(name) if !name.trim().is_empty() => name.trim().to_string(),
        Ok(_) => {
            debug!("host name is empty");
            "unknown".to_string()
        }
        Err(e) => {
            debug!("host name unavailable: {}", e);
            "unknown".to_string()
        }
    }
}
