//! Data sources invoked by pipeline steps.

use crate::errors::InvocationError;
use async_trait::async_trait;
use std::fmt::Debug;
use std::future::Future;

/// A service a step can invoke (a Lambda function, a table, ...).
///
/// Implementations must classify failures with an
/// [`InvocationErrorKind`](crate::errors::InvocationErrorKind) at this
/// boundary.
#[async_trait]
pub trait DataSource: Send + Sync + Debug {
    /// Returns the data source name.
    fn name(&self) -> &str;

    /// Invokes the data source with a payload.
    async fn invoke(&self, payload: serde_json::Value) -> Result<serde_json::Value, InvocationError>;
}

/// A data source that returns its payload unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoneDataSource;

#[async_trait]
impl DataSource for NoneDataSource {
    fn name(&self) -> &str {
        "NONE"
    }

    async fn invoke(&self, payload: serde_json::Value) -> Result<serde_json::Value, InvocationError> {
        Ok(payload)
    }
}

/// An async function-based data source.
pub struct FnDataSource<F, Fut>
where
    F: Fn(serde_json::Value) -> Fut + Send + Sync,
    Fut: Future<Output = Result<serde_json::Value, InvocationError>> + Send,
{
    name: String,
    func: F,
}

impl<F, Fut> FnDataSource<F, Fut>
where
    F: Fn(serde_json::Value) -> Fut + Send + Sync,
    Fut: Future<Output = Result<serde_json::Value, InvocationError>> + Send,
{
    /// Creates a new function-based data source.
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F, Fut> Debug for FnDataSource<F, Fut>
where
    F: Fn(serde_json::Value) -> Fut + Send + Sync,
    Fut: Future<Output = Result<serde_json::Value, InvocationError>> + Send,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnDataSource").field("name", &self.name).finish()
    }
}

#[async_trait]
impl<F, Fut> DataSource for FnDataSource<F, Fut>
where
    F: Fn(serde_json::Value) -> Fut + Send + Sync,
    Fut: Future<Output = Result<serde_json::Value, InvocationError>> + Send,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn invoke(&self, payload: serde_json::Value) -> Result<serde_json::Value, InvocationError> {
        (self.func)(payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_none_data_source_echoes_payload() {
        let source = NoneDataSource;
        assert_eq!(source.name(), "NONE");
        assert_eq!(source.invoke(json!({"a": 1})).await.unwrap(), json!({"a": 1}));
    }

    #[tokio::test]
    async fn test_fn_data_source() {
        let source = FnDataSource::new("createCognitoUserFn", |payload: serde_json::Value| async move {
            if payload.get("userEmail").is_some() {
                Ok(json!({"userId": "u1"}))
            } else {
                Err(InvocationError::upstream("userEmail is required"))
            }
        });

        assert_eq!(source.name(), "createCognitoUserFn");
        assert_eq!(source.invoke(json!({"userEmail": "a@b.com"})).await.unwrap(), json!({"userId": "u1"}));
        assert_eq!(
            source.invoke(json!({})).await.unwrap_err(),
            InvocationError::upstream("userEmail is required")
        );
    }
}
