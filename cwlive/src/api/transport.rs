//! GraphQL transport seam.

use crate::errors::TransportError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// One GraphQL operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest {
    /// Operation name, used for logging.
    pub operation_name: String,
    /// Query or mutation document.
    pub query: String,
    /// Operation variables.
    #[serde(default)]
    pub variables: serde_json::Value,
}

impl GraphQlRequest {
    /// Creates a request without variables.
    #[must_use]
    pub fn new(operation_name: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            operation_name: operation_name.into(),
            query: query.into(),
            variables: serde_json::Value::Null,
        }
    }

    /// Sets the variables.
    #[must_use]
    pub fn with_variables(mut self, variables: serde_json::Value) -> Self {
        self.variables = variables;
        self
    }
}

/// One entry of a GraphQL `errors` list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GraphQlErrorEntry {
    /// The error message; may be absent or empty.
    #[serde(default)]
    pub message: Option<String>,
}

/// A GraphQL response envelope.
///
/// `errors` signals failure even when `data` is present.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphQlResponse {
    /// Response data.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    /// Top-level errors.
    #[serde(default)]
    pub errors: Option<Vec<GraphQlErrorEntry>>,
}

impl GraphQlResponse {
    /// Creates a successful response.
    #[must_use]
    pub fn with_data(data: serde_json::Value) -> Self {
        Self {
            data: Some(data),
            errors: None,
        }
    }

    /// Creates an error response with the given messages.
    #[must_use]
    pub fn with_errors<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            data: None,
            errors: Some(
                messages
                    .into_iter()
                    .map(|m| GraphQlErrorEntry {
                        message: Some(m.into()),
                    })
                    .collect(),
            ),
        }
    }

    /// Returns the failure message if the `errors` list is non-empty.
    ///
    /// Uses the first error's message, or `fallback` when that message is
    /// missing or empty.
    #[must_use]
    pub fn error_message(&self, fallback: &str) -> Option<String> {
        let first = self.errors.as_ref()?.first()?;
        Some(
            first
                .message
                .as_deref()
                .filter(|m| !m.is_empty())
                .unwrap_or(fallback)
                .to_string(),
        )
    }
}

/// Executes GraphQL operations.
#[async_trait]
pub trait GraphQlTransport: Send + Sync + Debug {
    /// Sends one operation and returns the response envelope.
    ///
    /// Only failures to obtain an envelope are errors; GraphQL `errors`
    /// are returned inside the response.
    async fn execute(&self, request: GraphQlRequest) -> Result<GraphQlResponse, TransportError>;
}

#[cfg(feature = "http")]
pub use http::HttpTransport;

#[cfg(feature = "http")]
mod http {
    use super::{GraphQlRequest, GraphQlResponse, GraphQlTransport};
    use crate::config::ApiConfig;
    use crate::errors::TransportError;
    use async_trait::async_trait;
    use serde_json::json;
    use tracing::debug;

    /// Posts operations to an AppSync endpoint.
    #[derive(Debug, Clone)]
    pub struct HttpTransport {
        client: reqwest::Client,
        endpoint: String,
        auth_token: Option<String>,
    }

    impl HttpTransport {
        /// Creates a transport from the API config.
        pub fn new(config: &ApiConfig) -> Result<Self, TransportError> {
            let client = reqwest::Client::builder()
                .timeout(config.timeout())
                .build()
                .map_err(|e| TransportError::new(format!("Failed to build HTTP client: {e}")))?;

            Ok(Self {
                client,
                endpoint: config.graphql_endpoint.clone(),
                auth_token: config.auth_token.clone(),
            })
        }

        /// Returns the endpoint URL.
        #[must_use]
        pub fn endpoint(&self) -> &str {
            &self.endpoint
        }
    }

    #[async_trait]
    impl GraphQlTransport for HttpTransport {
        async fn execute(&self, request: GraphQlRequest) -> Result<GraphQlResponse, TransportError> {
            debug!(operation = %request.operation_name, endpoint = %self.endpoint, "Sending GraphQL request");

            let mut builder = self.client.post(&self.endpoint).json(&json!({
                "query": request.query,
                "variables": request.variables,
                "operationName": request.operation_name,
            }));
            if let Some(token) = &self.auth_token {
                builder = builder.header(reqwest::header::AUTHORIZATION, token);
            }

            let response = builder
                .send()
                .await
                .map_err(|e| TransportError::new(e.to_string()))?;

            let status = response.status();
            if !status.is_success() && status != reqwest::StatusCode::BAD_REQUEST {
                return Err(TransportError::new(format!("Unexpected HTTP status {status}"))
                    .with_status(status.as_u16()));
            }

            response
                .json::<GraphQlResponse>()
                .await
                .map_err(|e| TransportError::new(format!("Invalid GraphQL response: {e}")).with_status(status.as_u16()))
        }
    }
}
