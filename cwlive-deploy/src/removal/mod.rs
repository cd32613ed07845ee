//! Stack removal.
//!
//! This module provides:
//! - Pure intent resolution from flags or prompt answers
//! - The interactive wizard behind a [`Prompter`] seam
//! - The orchestrator that dispatches to a [`DeploymentManager`]

mod intent;
mod orchestrator;
mod prompt;

pub use intent::{
    should_run_interactive, RemovalFlags, RemovalRequest, RemovalScope, RemovalTarget, USAGE,
};
pub use orchestrator::{removal_log_path, RemovalOrchestrator};
pub use prompt::{prompt_removal, DialoguerPrompter, Prompter};

use crate::config::DeployConfig;
use crate::errors::RemovalError;
use crate::logging::LogFile;
use crate::manager::DeploymentManager;
use std::path::PathBuf;

/// Resolves the removal request and runs it.
///
/// Validation and prompting finish before the deployment manager is
/// touched, so a rejected request makes no AWS call.
pub async fn remove_stacks<M, P>(
    flags: &RemovalFlags,
    no_args: bool,
    config: &DeployConfig,
    manager: &M,
    prompter: &P,
    log_file: LogFile,
) -> Result<PathBuf, RemovalError>
where
    M: DeploymentManager + ?Sized,
    P: Prompter + ?Sized,
{
    let request = if should_run_interactive(flags, no_args) {
        prompt_removal(prompter, &config.stages)?
    } else {
        RemovalRequest::from_flags(flags)?
    };

    RemovalOrchestrator::new(manager, log_file, &config.cache_dir, &config.region)
        .remove(&request, &cwlive::utils::now_utc())
        .await
}
