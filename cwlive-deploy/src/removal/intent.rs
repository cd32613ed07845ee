//! Removal intent resolution.
//!
//! Pure functions turning flags or prompt answers into a validated
//! [`RemovalRequest`]. Nothing here touches AWS.

use crate::stack::StackType;
use cwlive::errors::ValidationError;

/// Usage line shown with flag validation errors.
pub const USAGE: &str = "Usage: remove-stacks --stage dev [--stack Shared | --all]";

/// Raw command-line flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemovalFlags {
    /// `--stage`
    pub stage: Option<String>,
    /// `--stack`
    pub stack: Option<StackType>,
    /// `--all`
    pub all: bool,
    /// `--interactive`
    pub interactive: bool,
}

/// What to remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalTarget {
    /// Every stack of the stage.
    All,
    /// A single stack.
    Single(StackType),
}

/// Removal scope chosen interactively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalScope {
    /// Complete teardown.
    All,
    /// One stack.
    Single,
}

/// A validated removal request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalRequest {
    /// Deployment stage.
    pub stage: String,
    /// What to remove.
    pub target: RemovalTarget,
}

/// Returns true when removal should run the prompt wizard.
///
/// `no_args` is true when the program was started without any argument.
#[must_use]
pub fn should_run_interactive(flags: &RemovalFlags, no_args: bool) -> bool {
    flags.interactive || no_args
}

impl RemovalRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(stage: impl Into<String>, target: RemovalTarget) -> Self {
        Self {
            stage: stage.into(),
            target,
        }
    }

    /// Validates flag-mode input.
    ///
    /// Exactly one of `--stack` or `--all` must be given, with `--stage`.
    pub fn from_flags(flags: &RemovalFlags) -> Result<Self, ValidationError> {
        let stage = flags
            .stage
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ValidationError::new("Error: --stage is required").with_hint(USAGE))?;

        let target = match (flags.stack, flags.all) {
            (Some(stack), false) => RemovalTarget::Single(stack),
            (None, true) => RemovalTarget::All,
            (Some(_), true) => {
                return Err(ValidationError::new("Error: --stack and --all cannot be used together").with_hint(USAGE))
            }
            (None, false) => {
                return Err(ValidationError::new("Error: Must specify either --stack or --all").with_hint(USAGE))
            }
        };

        Ok(Self::new(stage, target))
    }

    /// Builds a request from interactive answers.
    pub fn from_answers(
        stage: impl Into<String>,
        scope: RemovalScope,
        stack: Option<StackType>,
    ) -> Result<Self, ValidationError> {
        let target = match (scope, stack) {
            (RemovalScope::All, _) => RemovalTarget::All,
            (RemovalScope::Single, Some(stack)) => RemovalTarget::Single(stack),
            (RemovalScope::Single, None) => {
                return Err(ValidationError::new("Error: Must specify either --stack or --all"))
            }
        };
        Ok(Self::new(stage, target))
    }
}
