//! Mutable execution context for one pipeline run.

use super::Stash;

/// The context for one resolver run.
///
/// Passed by reference to each step in a fixed order, so only one step
/// touches it at a time.
#[derive(Debug, Clone)]
pub struct PipelineContext {
    /// Resolver name (e.g. `createCWLUser`).
    resolver: String,
    /// The GraphQL field arguments.
    arguments: serde_json::Value,
    /// Scratch space shared across steps.
    pub stash: Stash,
    /// Result of the previous step, visible to the next step only.
    prev_result: Option<serde_json::Value>,
}

impl PipelineContext {
    /// Creates a context for a resolver invocation.
    #[must_use]
    pub fn new(resolver: impl Into<String>, arguments: serde_json::Value) -> Self {
        Self {
            resolver: resolver.into(),
            arguments,
            stash: Stash::new(),
            prev_result: None,
        }
    }

    /// Sets the initial stash.
    #[must_use]
    pub fn with_stash(mut self, stash: Stash) -> Self {
        self.stash = stash;
        self
    }

    /// Returns the resolver name.
    #[must_use]
    pub fn resolver(&self) -> &str {
        &self.resolver
    }

    /// Returns all arguments.
    #[must_use]
    pub fn arguments(&self) -> &serde_json::Value {
        &self.arguments
    }

    /// Returns a single named argument.
    #[must_use]
    pub fn argument(&self, name: &str) -> Option<&serde_json::Value> {
        self.arguments.get(name)
    }

    /// Returns the previous step's result.
    #[must_use]
    pub fn prev_result(&self) -> Option<&serde_json::Value> {
        self.prev_result.as_ref()
    }

    /// Replaces the previous-step result, returning the old one.
    pub(crate) fn set_prev_result(&mut self, result: serde_json::Value) -> Option<serde_json::Value> {
        self.prev_result.replace(result)
    }

    /// Consumes the context, returning the last step's result.
    #[must_use]
    pub fn into_result(self) -> Option<serde_json::Value> {
        self.prev_result
    }
}
