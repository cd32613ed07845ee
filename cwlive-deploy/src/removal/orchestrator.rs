//! Stack removal dispatch.

use super::intent::{RemovalRequest, RemovalTarget};
use crate::errors::RemovalError;
use crate::logging::LogFile;
use crate::manager::{DeploymentManager, DeploymentOptions};
use cwlive::utils::{filesystem_safe_timestamp, Timestamp};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Returns `<cache_dir>/deploy/logs/remove-stacks-<stage>-<ts>.log`.
#[must_use]
pub fn removal_log_path(cache_dir: &Path, stage: &str, at: &Timestamp) -> PathBuf {
    cache_dir
        .join("deploy")
        .join("logs")
        .join(format!("remove-stacks-{stage}-{}.log", filesystem_safe_timestamp(at)))
}

/// Executes validated removal requests against a deployment manager.
#[derive(Debug)]
pub struct RemovalOrchestrator<'a, M: ?Sized> {
    manager: &'a M,
    log_file: LogFile,
    cache_dir: PathBuf,
    region: String,
}

impl<'a, M: DeploymentManager + ?Sized> RemovalOrchestrator<'a, M> {
    /// Creates an orchestrator.
    #[must_use]
    pub fn new(
        manager: &'a M,
        log_file: LogFile,
        cache_dir: impl Into<PathBuf>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            manager,
            log_file,
            cache_dir: cache_dir.into(),
            region: region.into(),
        }
    }

    /// Removes the requested stacks.
    ///
    /// The log file path is set before the first AWS call. Returns the
    /// log file path on success.
    pub async fn remove(&self, request: &RemovalRequest, at: &Timestamp) -> Result<PathBuf, RemovalError> {
        let log_path = removal_log_path(&self.cache_dir, &request.stage, at);
        self.log_file.set_path(&log_path)?;
        info!("Logging to: {}", log_path.display());

        self.manager.initialize_aws().await?;

        let options = DeploymentOptions::new(&request.stage, &self.region);
        match request.target {
            RemovalTarget::All => {
                info!(stage = %request.stage, "Removing ALL stacks for stage: {}", request.stage);
                warn!("This will remove all infrastructure and data!");
                self.manager.remove_all_stacks(&options).await?;
            }
            RemovalTarget::Single(stack) => {
                info!(stage = %request.stage, stack = %stack, "Removing {stack} stack for stage: {}", request.stage);
                self.manager.remove_stack(stack, &options).await?;
            }
        }

        info!("Stack removal completed successfully!");
        Ok(log_path)
    }
}
