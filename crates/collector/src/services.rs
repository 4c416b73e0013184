//! Service status probing through the host's native service manager.
//!
//! One [`ServiceManager`] implementation exists per platform family and is
//! picked once at startup by [`service_manager_for`]. Every query result is
//! plain text: whatever the service manager printed, or an `error: ...` line.
//! A failing query never affects the others.

use crate::executor::Executor;
use async_trait::async_trait;
use enveye_common::OsType;
use std::collections::BTreeMap;
use tracing::debug;

/// Status reported for every service on a platform without a known manager.
pub const UNSUPPORTED_PLATFORM: &str = "unsupported platform";

/// Capability: query a service's run state by name.
#[async_trait]
pub trait ServiceManager: Send + Sync {
    /// Short name of the underlying tool.
    fn name(&self) -> &'static str;

    /// Services checked on every run for this platform.
    fn default_services(&self) -> &'static [&'static str];

    /// Program and arguments that report the status of `service`.
    /// `None` when the platform has no service manager to ask.
    fn status_command(&self, _service: &str) -> Option<(&'static str, Vec<String>)> {
        None
    }

    /// Whether `service` can be handed to [`Self::status_command`] as-is.
    fn accepts_name(&self, _service: &str) -> bool {
        true
    }

    /// Status text for `service`.
    async fn status(&self, executor: &dyn Executor, service: &str) -> String {
        if !self.accepts_name(service) {
            return "error: invalid service name".to_string();
        }
        let Some((program, args)) = self.status_command(service) else {
            return UNSUPPORTED_PLATFORM.to_string();
        };

        match executor.execute(program, &args).await {
            Ok(output) if output.success() => output.combined().trim().to_string(),
            Ok(output) => {
                let exit = match output.exit_code {
                    Some(code) => format!("exit status {}", code),
                    None => "terminated by signal".to_string(),
                };
                let combined = output.combined();
                let detail = combined.trim();
                if detail.is_empty() {
                    format!("error: {}", exit)
                } else {
                    format!("error: {} ({})", exit, detail)
                }
            }
            Err(e) => format!("error: {}", e),
        }
    }
}

/// systemd, queried with `systemctl is-active`.
pub struct Systemd;

#[async_trait]
impl ServiceManager for Systemd {
    fn name(&self) -> &'static str {
        "systemctl"
    }

    fn default_services(&self) -> &'static [&'static str] {
        &[
            "nginx",
            "apache2",
            "mysql",
            "mariadb",
            "postgresql",
            "mongodb",
            "redis",
            "docker",
            "sshd",
            "systemd-journald",
        ]
    }

    fn status_command(&self, service: &str) -> Option<(&'static str, Vec<String>)> {
        Some(("systemctl", vec!["is-active".to_string(), service.to_string()]))
    }
}

/// launchd, queried with `launchctl list`.
pub struct Launchd;

#[async_trait]
impl ServiceManager for Launchd {
    fn name(&self) -> &'static str {
        "launchctl"
    }

    fn default_services(&self) -> &'static [&'static str] {
        &[
            "homebrew.mxcl.nginx",
            "homebrew.mxcl.postgresql",
            "homebrew.mxcl.mongodb-community",
            "com.apple.sshd",
        ]
    }

    fn status_command(&self, service: &str) -> Option<(&'static str, Vec<String>)> {
        Some(("launchctl", vec!["list".to_string(), service.to_string()]))
    }
}

/// Windows Service Control Manager, queried through PowerShell `Get-Service`.
pub struct WindowsScm;

#[async_trait]
impl ServiceManager for WindowsScm {
    fn name(&self) -> &'static str {
        "powershell"
    }

    fn default_services(&self) -> &'static [&'static str] {
        &[
            "W3SVC",
            "MSSQL$SQLEXPRESS",
            "MongoDB",
            "RabbitMQ",
            "AppHostSvc",
            "WinRM",
        ]
    }

    // The name is embedded in a PowerShell command line.
    fn accepts_name(&self, service: &str) -> bool {
        is_safe_service_name(service)
    }

    fn status_command(&self, service: &str) -> Option<(&'static str, Vec<String>)> {
        // Single quotes keep `$` in names like MSSQL$SQLEXPRESS literal.
        Some((
            "powershell",
            vec![
                "-NoProfile".to_string(),
                "-NonInteractive".to_string(),
                "-Command".to_string(),
                format!(
                    "Get-Service -Name '{}' | Select-Object -ExpandProperty Status",
                    service
                ),
            ],
        ))
    }
}

/// Fallback for platforms without a known service manager.
pub struct Unsupported;

#[async_trait]
impl ServiceManager for Unsupported {
    fn name(&self) -> &'static str {
        "none"
    }

    fn default_services(&self) -> &'static [&'static str] {
        &[]
    }
}

/// Select the service manager for a platform family.
pub fn service_manager_for(os_type: OsType) -> Box<dyn ServiceManager> {
    match os_type {
        OsType::Linux => Box::new(Systemd),
        OsType::MacOs => Box::new(Launchd),
        OsType::Windows => Box::new(WindowsScm),
        OsType::Unknown => Box::new(Unsupported),
    }
}

/// Split a comma-separated service list, trimming items and dropping empty ones.
pub fn parse_extra_services(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Platform defaults followed by caller-supplied extras.
pub fn required_services(manager: &dyn ServiceManager, extras: &[String]) -> Vec<String> {
    manager
        .default_services()
        .iter()
        .map(|s| s.to_string())
        .chain(extras.iter().cloned())
        .collect()
}

/// Query every service in turn.
pub async fn collect_service_statuses(
    manager: &dyn ServiceManager,
    executor: &dyn Executor,
    services: &[String],
) -> BTreeMap<String, String> {
    let mut statuses = BTreeMap::new();
    for service in services {
        if statuses.contains_key(service) {
            continue;
        }
        let status = manager.status(executor, service).await;
        debug!("{} {}: {}", manager.name(), service, status);
        statuses.insert(service.clone(), status);
    }
    statuses
}

/// Validate that a service name can be quoted into a PowerShell command.
fn is_safe_service_name(name: &str) -> bool {
    // Allow alphanumeric, dash, underscore, dot, @ and $
    name.chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | '@' | '$'))
        && !name.is_empty()
        && !name.starts_with('-')
        && name.len() < 256
}
