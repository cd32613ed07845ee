//! `remove-stacks` binary.

use clap::Parser;
use cwlive_deploy::cli::Cli;
use cwlive_deploy::logging::{init_tracing, LogFile};
use cwlive_deploy::removal::{remove_stacks, DialoguerPrompter};
use cwlive_deploy::{CloudFormationDeploymentManager, DeployConfig};
use std::process::ExitCode;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let no_args = std::env::args_os().len() == 1;
    let cli = Cli::parse();

    let config = match DeployConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let log_file = LogFile::new();
    if let Err(e) = init_tracing(&config.log_level, log_file.clone()) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    let manager = CloudFormationDeploymentManager::new(&config.region, &config.stack_prefix);
    match remove_stacks(&cli.flags(), no_args, &config, &manager, &DialoguerPrompter, log_file).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e.summary());
            if let Some(hint) = e.hint() {
                info!("{hint}");
            }
            ExitCode::FAILURE
        }
    }
}
