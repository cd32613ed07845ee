//! Per-run stash.

use std::collections::HashMap;

/// Key-value scratch space shared across the steps of one pipeline run.
///
/// Values are kept as raw JSON so that readers can tell a boolean `true`
/// apart from other truthy values. The stash is owned by the
/// [`PipelineContext`](super::PipelineContext) and dropped with it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stash {
    data: HashMap<String, serde_json::Value>,
}

impl Stash {
    /// Creates an empty stash.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets a value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.data.get(key)
    }

    /// Returns true only if the value is exactly the JSON boolean `true`.
    ///
    /// Missing keys, `false`, strings, numbers and `null` all return false.
    #[must_use]
    pub fn is_true(&self, key: &str) -> bool {
        matches!(self.data.get(key), Some(serde_json::Value::Bool(true)))
    }

    /// Checks if a key exists.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Sets a value, returning the previous one.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: serde_json::Value,
    ) -> Option<serde_json::Value> {
        self.data.insert(key.into(), value)
    }

    /// Removes a value.
    pub fn remove(&mut self, key: &str) -> Option<serde_json::Value> {
        self.data.remove(key)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the stash is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns a copy of all entries.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        self.data.clone()
    }
}
