//! Step status reported by a pipeline run.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a pipeline step finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// The data source was invoked and the response handler accepted the result.
    Completed,
    /// The request handler returned `no-op`; no data source was invoked.
    Skipped,
    /// The invocation failed but the response handler absorbed the error.
    Recovered,
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::Skipped => write!(f, "skipped"),
            Self::Recovered => write!(f, "recovered"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_status_display() {
        assert_eq!(StepStatus::Completed.to_string(), "completed");
        assert_eq!(StepStatus::Skipped.to_string(), "skipped");
        assert_eq!(StepStatus::Recovered.to_string(), "recovered");
    }

    #[test]
    fn test_step_status_serialization() {
        let json = serde_json::to_string(&StepStatus::Recovered).unwrap();
        assert_eq!(json, "\"recovered\"");
    }
}
