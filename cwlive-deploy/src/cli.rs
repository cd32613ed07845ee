//! Command-line interface of `remove-stacks`.

use crate::removal::RemovalFlags;
use crate::stack::StackType;
use clap::Parser;

/// Remove CloudFormation stacks for CloudWatch Live
#[derive(Debug, Parser)]
#[command(name = "remove-stacks")]
pub struct Cli {
    /// Deployment stage (dev, prod)
    #[arg(long)]
    pub stage: Option<String>,

    /// Specific stack type to remove (e.g., Shared, CWL)
    #[arg(long, value_enum, ignore_case = true)]
    pub stack: Option<StackType>,

    /// Remove all stacks (use with caution!)
    #[arg(long)]
    pub all: bool,

    /// Run interactive removal wizard
    #[arg(long)]
    pub interactive: bool,
}

impl Cli {
    /// Returns the parsed flags.
    #[must_use]
    pub fn flags(&self) -> RemovalFlags {
        RemovalFlags {
            stage: self.stage.clone(),
            stack: self.stack,
            all: self.all,
            interactive: self.interactive,
        }
    }
}
