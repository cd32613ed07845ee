//! Interactive removal wizard.

use super::intent::{RemovalRequest, RemovalScope};
use crate::errors::RemovalError;
use crate::stack::StackType;
use tracing::info;

/// Asks the operator to pick one item from a list.
#[cfg_attr(test, mockall::automock)]
pub trait Prompter {
    /// Returns the index of the chosen item.
    fn select(&self, prompt: &str, items: &[String], default: usize) -> Result<usize, RemovalError>;
}

/// Terminal prompter built on `dialoguer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn select(&self, prompt: &str, items: &[String], default: usize) -> Result<usize, RemovalError> {
        dialoguer::Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact()
            .map_err(|e| RemovalError::Prompt(e.to_string()))
    }
}

const SCOPE_ALL: &str = "Remove ALL stacks (complete teardown)";
const SCOPE_SINGLE: &str = "Remove a specific stack";

/// Runs the wizard: stage, then scope, then the stack when removing one.
///
/// The stage list comes from configuration; `dev` is preselected when present.
pub fn prompt_removal<P: Prompter + ?Sized>(
    prompter: &P,
    stages: &[String],
) -> Result<RemovalRequest, RemovalError> {
    info!("CloudWatch Live - Stack Removal");

    if stages.is_empty() {
        return Err(RemovalError::Prompt("No stages configured".to_string()));
    }
    let default_stage = stages.iter().position(|s| s == "dev").unwrap_or(0);
    let stage_index = prompter.select("Select stage to remove stacks from:", stages, default_stage)?;
    let stage = pick(stages, stage_index)?.clone();

    let scopes = [SCOPE_ALL.to_string(), SCOPE_SINGLE.to_string()];
    let scope = match prompter.select("What would you like to remove?", &scopes, 0)? {
        0 => RemovalScope::All,
        1 => RemovalScope::Single,
        other => return Err(RemovalError::Prompt(format!("Invalid selection {other}"))),
    };

    let stack = match scope {
        RemovalScope::All => None,
        RemovalScope::Single => {
            let names: Vec<String> = StackType::ALL.iter().map(ToString::to_string).collect();
            let index = prompter.select("Select stack to remove:", &names, 0)?;
            Some(*pick(&StackType::ALL, index)?)
        }
    };

    RemovalRequest::from_answers(stage, scope, stack).map_err(RemovalError::from)
}

fn pick<T>(items: &[T], index: usize) -> Result<&T, RemovalError> {
    items
        .get(index)
        .ok_or_else(|| RemovalError::Prompt(format!("Invalid selection {index}")))
}
