//! Typed GraphQL API wrappers.
//!
//! Each wrapper issues one operation through a [`GraphQlTransport`] and
//! turns a non-empty `errors` list into an [`ApiError`]. Failures are
//! logged with the wrapper name and returned unchanged.

pub mod keys;
mod organization;
pub mod queries;
mod transport;
mod user;

pub use keys::{save_client, QueryInvalidator, SaveClientOptions};
pub use organization::list_organizations;
#[cfg(feature = "http")]
pub use transport::HttpTransport;
pub use transport::{GraphQlErrorEntry, GraphQlRequest, GraphQlResponse, GraphQlTransport};
pub use user::{create_cwl_user, get_cwl_user};

use crate::errors::ApiError;
use serde::de::DeserializeOwned;
use tracing::error;

/// Executes a request and returns its `data`, or the GraphQL error.
async fn execute<T>(
    transport: &T,
    request: GraphQlRequest,
    fallback: &str,
) -> Result<Option<serde_json::Value>, ApiError>
where
    T: GraphQlTransport + ?Sized,
{
    let response = transport.execute(request).await?;
    if let Some(message) = response.error_message(fallback) {
        return Err(ApiError::graphql(message));
    }
    Ok(response.data)
}

/// Decodes one field of a response `data` object.
fn decode_field<D: DeserializeOwned>(
    operation: &str,
    data: Option<serde_json::Value>,
    field: &str,
) -> Result<Option<D>, ApiError> {
    let Some(value) = data.and_then(|mut d| d.get_mut(field).map(serde_json::Value::take)) else {
        return Ok(None);
    };
    if value.is_null() {
        return Ok(None);
    }
    serde_json::from_value(value).map(Some).map_err(|e| ApiError::Decode {
        operation: operation.to_string(),
        message: e.to_string(),
    })
}

/// Logs a wrapper failure and hands the error back.
fn log_failure(api: &str, err: ApiError) -> ApiError {
    error!(api, error = %err, "{api} error");
    err
}
