//! Error types for deployment tooling.

use cwlive::errors::ValidationError;
use thiserror::Error;

/// Classification of a storage call failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageErrorKind {
    /// The bucket does not exist (`NotFound` / `NoSuchBucket`).
    NotFound,
    /// Any other failure.
    Other,
}

/// Error returned by a [`BucketStore`](crate::bucket::BucketStore) call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct StorageError {
    /// Error classification.
    pub kind: StorageErrorKind,
    /// Message reported by the service.
    pub message: String,
}

impl StorageError {
    /// Creates a not-found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: StorageErrorKind::NotFound,
            message: message.into(),
        }
    }

    /// Creates an unclassified error.
    #[must_use]
    pub fn other(message: impl Into<String>) -> Self {
        Self {
            kind: StorageErrorKind::Other,
            message: message.into(),
        }
    }

    /// Returns true for not-found errors.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind == StorageErrorKind::NotFound
    }
}

/// Errors returned by the bucket ensurer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BucketError {
    /// The existence probe failed with something other than not-found.
    #[error("Error checking bucket {bucket}: {source}")]
    Probe {
        /// Bucket name.
        bucket: String,
        /// Underlying error.
        source: StorageError,
    },

    /// Bucket creation failed.
    #[error("Failed to create bucket {bucket}: {source}")]
    Create {
        /// Bucket name.
        bucket: String,
        /// Underlying error.
        source: StorageError,
    },

    /// The bucket was created but never became visible.
    #[error("Bucket {bucket} was created but is not yet available after {attempts} attempts: {last}")]
    PollTimeout {
        /// Bucket name.
        bucket: String,
        /// Probes made.
        attempts: usize,
        /// Error of the last probe.
        last: StorageError,
    },
}

/// Errors returned by a [`DeploymentManager`](crate::manager::DeploymentManager).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeployError {
    /// AWS clients were used before `initialize_aws`.
    #[error("AWS clients are not initialized")]
    NotInitialized,

    /// An AWS call failed.
    #[error("AWS call failed for stack {stack}: {message}")]
    Aws {
        /// Stack name.
        stack: String,
        /// SDK error message.
        message: String,
    },

    /// CloudFormation reported `DELETE_FAILED`.
    #[error("Stack {stack} failed to delete: {reason}")]
    DeleteFailed {
        /// Stack name.
        stack: String,
        /// Status reason.
        reason: String,
    },

    /// The stack did not reach a terminal state in time.
    #[error("Timed out waiting for stack {stack} to delete (last status {status})")]
    Timeout {
        /// Stack name.
        stack: String,
        /// Last observed status.
        status: String,
    },
}

/// Errors returned by stack removal.
#[derive(Debug, Error)]
pub enum RemovalError {
    /// The removal request was malformed or contradictory.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Interactive prompting failed.
    #[error("Prompt failed: {0}")]
    Prompt(String),

    /// A deployment call failed.
    #[error("{0}")]
    Deploy(#[from] DeployError),

    /// The log file could not be opened.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RemovalError {
    /// Returns the usage hint for validation errors.
    #[must_use]
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Validation(err) => err.hint.as_deref(),
            _ => None,
        }
    }

    /// Returns the line reported to the operator.
    ///
    /// Validation messages are shown as-is; other failures are prefixed.
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Self::Validation(err) => err.to_string(),
            _ => format!("Stack removal failed: {self}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_kinds() {
        assert!(StorageError::not_found("NotFound").is_not_found());
        assert!(!StorageError::other("AccessDenied").is_not_found());
    }

    #[test]
    fn test_poll_timeout_message_carries_last_error() {
        let err = BucketError::PollTimeout {
            bucket: "cwl-assets".to_string(),
            attempts: 5,
            last: StorageError::not_found("NotFound"),
        };
        assert_eq!(
            err.to_string(),
            "Bucket cwl-assets was created but is not yet available after 5 attempts: NotFound"
        );
    }

    #[test]
    fn test_removal_error_hint() {
        let err: RemovalError = ValidationError::new("--stage is required")
            .with_hint("Usage: remove-stacks --stage dev")
            .into();
        assert_eq!(err.hint(), Some("Usage: remove-stacks --stage dev"));
        assert!(RemovalError::Prompt("closed".to_string()).hint().is_none());
    }

    #[test]
    fn test_summary_prefixes_only_removal_failures() {
        let err: RemovalError = ValidationError::new("Error: --stage is required").into();
        assert_eq!(err.summary(), "Error: --stage is required");

        let err: RemovalError = DeployError::DeleteFailed {
            stack: "cwl-s3-dev".to_string(),
            reason: "Bucket not empty".to_string(),
        }
        .into();
        assert_eq!(err.summary(), "Stack removal failed: Stack cwl-s3-dev failed to delete: Bucket not empty");
    }
}
