//! Command executor used for service queries.

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

/// Captured result of one program invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Stdout followed by stderr.
    pub fn combined(&self) -> String {
        format!("{}{}", self.stdout, self.stderr)
    }
}

/// Trait for program execution.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Run `program` with `args` and wait for it to exit.
    ///
    /// An `Err` means the program could not be started at all.
    async fn execute(&self, program: &str, args: &[String]) -> Result<CommandOutput>;
}

/// Runs programs directly on the local host, without a shell.
pub struct LocalExecutor;

impl LocalExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Executor for LocalExecutor {
    async fn execute(&self, program: &str, args: &[String]) -> Result<CommandOutput> {
        debug!("Local exec: {} {:?}", program, args);

        let output = Command::new(program)
            .args(args)
            .output()
            .await
            .with_context(|| format!("Failed to execute {}", program))?;

        Ok(CommandOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}
