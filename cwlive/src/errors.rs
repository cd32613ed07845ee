//! Error types for CloudWatch Live resolvers and API wrappers.
//!
//! Errors are tagged at the service-call boundary so downstream code can
//! switch on an explicit kind instead of probing error shapes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Resolver error type raised when Cognito user provisioning fails.
pub const COGNITO_CREATION_FAILED: &str = "CognitoCreationFailed";

/// Resolver error type raised for malformed resolver arguments.
pub const VALIDATION_ERROR: &str = "ValidationError";

/// The main error type for CloudWatch Live operations.
#[derive(Debug, Error)]
pub enum CwlError {
    /// A request was malformed or contradictory.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// A pipeline run was aborted.
    #[error("{0}")]
    Pipeline(#[from] PipelineError),

    /// An API wrapper failed.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// A service could not be reached.
    #[error("{0}")]
    Transport(#[from] TransportError),

    /// A configuration value could not be parsed.
    #[error("{0}")]
    Config(#[from] crate::config::ConfigError),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Classification of a failed data source invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvocationErrorKind {
    /// The called service ran and reported a failure.
    Upstream,
    /// The called service could not be reached.
    Transport,
}

impl std::fmt::Display for InvocationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Upstream => write!(f, "upstream"),
            Self::Transport => write!(f, "transport"),
        }
    }
}

/// Error reported by a data source for one invocation.
///
/// This is what a step's response handler sees in place of a result.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{kind} invocation error: {message}")]
pub struct InvocationError {
    /// Error classification.
    pub kind: InvocationErrorKind,
    /// Message reported by the service or transport.
    pub message: String,
    /// Upstream error type name, when the service reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
}

impl InvocationError {
    /// Creates an upstream (service-reported) error.
    #[must_use]
    pub fn upstream(message: impl Into<String>) -> Self {
        Self {
            kind: InvocationErrorKind::Upstream,
            message: message.into(),
            error_type: None,
        }
    }

    /// Creates a transport-level error.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: InvocationErrorKind::Transport,
            message: message.into(),
            error_type: None,
        }
    }

    /// Sets the upstream error type name.
    #[must_use]
    pub fn with_error_type(mut self, error_type: impl Into<String>) -> Self {
        self.error_type = Some(error_type.into());
        self
    }
}

/// Error raised by a step's request or response handler.
///
/// Mirrors the resolver error shape: a message plus an error type that
/// surfaces to the GraphQL caller.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{error_type}: {message}")]
pub struct ResolverError {
    /// The error message.
    pub message: String,
    /// The error type (e.g. `CognitoCreationFailed`).
    pub error_type: String,
}

impl ResolverError {
    /// Creates a new resolver error.
    #[must_use]
    pub fn new(message: impl Into<String>, error_type: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error_type: error_type.into(),
        }
    }

    /// Creates a `CognitoCreationFailed` error.
    #[must_use]
    pub fn cognito_creation_failed(message: impl Into<String>) -> Self {
        Self::new(message, COGNITO_CREATION_FAILED)
    }

    /// Creates a `ValidationError` resolver error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(message, VALIDATION_ERROR)
    }

    /// Returns true if this error has the given type.
    #[must_use]
    pub fn is_type(&self, error_type: &str) -> bool {
        self.error_type == error_type
    }

    /// Converts to the GraphQL error representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert("message".to_string(), serde_json::json!(self.message));
        map.insert("errorType".to_string(), serde_json::json!(self.error_type));
        map
    }
}

/// Error returned when a pipeline run does not complete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// A step raised an error and the remaining steps were not run.
    #[error("Pipeline aborted at step '{step}': {error}")]
    Aborted {
        /// The step that raised.
        step: String,
        /// The raised error.
        error: ResolverError,
    },

    /// The pipeline has no steps.
    #[error("Pipeline '{0}' has no steps")]
    Empty(String),
}

impl PipelineError {
    /// Returns the resolver error that caused the abort, if any.
    #[must_use]
    pub fn resolver_error(&self) -> Option<&ResolverError> {
        match self {
            Self::Aborted { error, .. } => Some(error),
            Self::Empty(_) => None,
        }
    }
}

/// Error raised when a request is malformed or contradictory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// The error message.
    pub message: String,
    /// Optional usage hint shown alongside the message.
    pub hint: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            hint: None,
        }
    }

    /// Sets the usage hint.
    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Error raised when a service cannot be reached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Transport error: {message}")]
pub struct TransportError {
    /// The error message.
    pub message: String,
    /// HTTP status, when a response was received.
    pub status: Option<u16>,
}

impl TransportError {
    /// Creates a new transport error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    /// Sets the HTTP status.
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }
}

/// Errors returned by the API client wrappers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The GraphQL response carried a non-empty `errors` list.
    #[error("{message}")]
    Graphql {
        /// First error message, or the wrapper's fallback.
        message: String,
    },

    /// The operation succeeded but returned no data.
    #[error("{0}")]
    MissingData(String),

    /// The response data did not match the expected shape.
    #[error("Failed to decode {operation} response: {message}")]
    Decode {
        /// The GraphQL operation name.
        operation: String,
        /// The decoder's message.
        message: String,
    },

    /// The request never produced a GraphQL response.
    #[error("{0}")]
    Transport(#[from] TransportError),
}

impl ApiError {
    /// Creates a GraphQL error.
    #[must_use]
    pub fn graphql(message: impl Into<String>) -> Self {
        Self::Graphql {
            message: message.into(),
        }
    }

    /// Returns true if this error came from the transport.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
