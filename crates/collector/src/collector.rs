//! Snapshot assembly.

use crate::executor::{Executor, LocalExecutor};
use crate::services::{self, ServiceManager};
use crate::{environment, files, naming};
use anyhow::Result;
use enveye_common::{Error, OsType, Timestamp};
use enveye_snapshot_schema::{EnvironmentContext, Snapshot};
use std::path::PathBuf;
use tracing::info;

/// Collector configuration.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    pub app_folder: PathBuf,
    pub app_type: String,
    /// Services checked in addition to the platform defaults.
    pub extra_services: Vec<String>,
    pub os_type: OsType,
}

/// A finished snapshot plus the facts needed to name and upload it.
#[derive(Debug, Clone)]
pub struct Collection {
    pub snapshot: Snapshot,
    pub hostname: String,
    pub captured_at: Timestamp,
    pub os_type: OsType,
}

impl Collection {
    /// Derived snapshot file name, see [`naming::snapshot_file_name`].
    pub fn file_name(&self, label: Option<&str>) -> String {
        naming::snapshot_file_name(
            &self.hostname,
            &self.snapshot.application_name,
            self.os_type,
            &self.captured_at,
            label,
        )
    }
}

/// The main collector.
pub struct Collector {
    config: CollectorConfig,
    executor: Box<dyn Executor>,
    service_manager: Box<dyn ServiceManager>,
}

impl Collector {
    /// Create a collector that runs its queries on the local host.
    pub fn new(config: CollectorConfig) -> Result<Self> {
        Self::with_executor(config, Box::new(LocalExecutor::new()))
    }

    /// Create a collector with a custom executor.
    pub fn with_executor(config: CollectorConfig, executor: Box<dyn Executor>) -> Result<Self> {
        if config.app_folder.as_os_str().is_empty() {
            return Err(Error::MissingInput("--app-folder".to_string()).into());
        }
        if config.app_type.trim().is_empty() {
            return Err(Error::MissingInput("--app-type".to_string()).into());
        }

        let service_manager = services::service_manager_for(config.os_type);
        Ok(Self {
            config,
            executor,
            service_manager,
        })
    }

    /// Gather every section once and assemble the snapshot.
    pub async fn collect(&self) -> Collection {
        let captured_at = Timestamp::now();
        info!(
            "Starting collection for {} ({})",
            self.config.app_folder.display(),
            self.config.os_type
        );

        let hostname = environment::hostname();

        info!("Collecting OS and environment information...");
        let os_info = environment::os_info();
        let critical_environment_variables = environment::critical_environment_variables();

        info!("Scanning application folder...");
        let app_folder_files = files::scan_app_folder(&self.config.app_folder);
        info!("Recorded {} file entries", app_folder_files.len());

        info!("Checking service status via {}...", self.service_manager.name());
        let required =
            services::required_services(self.service_manager.as_ref(), &self.config.extra_services);
        let required_services_status = services::collect_service_statuses(
            self.service_manager.as_ref(),
            self.executor.as_ref(),
            &required,
        )
        .await;

        let snapshot = Snapshot {
            application_name: naming::application_name(&self.config.app_folder),
            application_type: self.config.app_type.clone(),
            environment_context: EnvironmentContext {
                app_folder_files,
                critical_environment_variables,
                os_info,
                required_services_status,
            },
            timestamp: captured_at.to_rfc3339(),
        };

        Collection {
            snapshot,
            hostname,
            captured_at,
            os_type: self.config.os_type,
        }
    }
}
