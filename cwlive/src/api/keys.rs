//! Query cache keys and post-save invalidation.

use super::user::create_cwl_user;
use super::GraphQlTransport;
use crate::core::{CreateCwlUserMutation, CwlUserInput};
use crate::errors::ApiError;
use tracing::debug;

/// Cache key root for `getCWLUser`.
pub const GET_CWL_USER_KEY: &str = "getCWLUser";

/// Cache key root for `listOrganizations`.
pub const LIST_ORGANIZATIONS_KEY: &str = "listOrganizations";

/// Key for one cached user.
#[must_use]
pub fn get_cwl_user_query_key(user_id: &str) -> Vec<String> {
    vec![GET_CWL_USER_KEY.to_string(), user_id.to_string()]
}

/// Key for the cached organization list.
#[must_use]
pub fn list_organizations_query_key() -> Vec<String> {
    vec![LIST_ORGANIZATIONS_KEY.to_string()]
}

/// A cache that can drop entries by key prefix.
pub trait QueryInvalidator: Send + Sync {
    /// Invalidates every cached query whose key starts with `key`.
    fn invalidate(&self, key: &[String]);
}

/// Options for [`save_client`].
pub struct SaveClientOptions {
    /// Whether to invalidate cached queries after a save. Defaults to true.
    pub invalidate: bool,
    /// Extra key roots to invalidate.
    pub additional_invalidation_keys: Vec<String>,
    /// Callback run after a successful save.
    pub on_success: Option<Box<dyn Fn() + Send + Sync>>,
}

impl Default for SaveClientOptions {
    fn default() -> Self {
        Self {
            invalidate: true,
            additional_invalidation_keys: Vec::new(),
            on_success: None,
        }
    }
}

impl std::fmt::Debug for SaveClientOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SaveClientOptions")
            .field("invalidate", &self.invalidate)
            .field("additional_invalidation_keys", &self.additional_invalidation_keys)
            .field("has_on_success", &self.on_success.is_some())
            .finish()
    }
}

impl SaveClientOptions {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Disables invalidation.
    #[must_use]
    pub fn without_invalidation(mut self) -> Self {
        self.invalidate = false;
        self
    }

    /// Adds an extra key root to invalidate.
    #[must_use]
    pub fn with_invalidation_key(mut self, key: impl Into<String>) -> Self {
        self.additional_invalidation_keys.push(key.into());
        self
    }

    /// Sets the success callback.
    #[must_use]
    pub fn with_on_success<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_success = Some(Box::new(callback));
        self
    }
}

/// Creates a client user, then refreshes dependent cached queries.
///
/// Nothing is invalidated and the callback does not run when the
/// mutation fails.
pub async fn save_client<T, Q>(
    transport: &T,
    invalidator: &Q,
    input: &CwlUserInput,
    options: &SaveClientOptions,
) -> Result<CreateCwlUserMutation, ApiError>
where
    T: GraphQlTransport + ?Sized,
    Q: QueryInvalidator + ?Sized,
{
    let created = create_cwl_user(transport, input).await?;

    if options.invalidate {
        invalidator.invalidate(&[GET_CWL_USER_KEY.to_string()]);
        invalidator.invalidate(&list_organizations_query_key());
        for key in &options.additional_invalidation_keys {
            invalidator.invalidate(std::slice::from_ref(key));
        }
        debug!(
            additional = options.additional_invalidation_keys.len(),
            "Invalidated cached queries after client save"
        );
    }

    if let Some(callback) = &options.on_success {
        callback();
    }

    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::GraphQlResponse;
    use crate::testing::{RecordingInvalidator, ScriptedTransport};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn created_response() -> GraphQlResponse {
        GraphQlResponse::with_data(json!({
            "createCWLUser": {
                "userId": "u1",
                "userFirstName": "A",
                "userLastName": "B",
                "userEmail": "a@b.com",
                "organizationId": "org1",
                "userRole": "client",
            }
        }))
    }

    fn input() -> CwlUserInput {
        CwlUserInput::new("a@b.com", "A", "B", "client", "org1")
    }

    #[test]
    fn test_query_keys() {
        assert_eq!(get_cwl_user_query_key("u1"), vec!["getCWLUser", "u1"]);
        assert_eq!(list_organizations_query_key(), vec!["listOrganizations"]);
    }

    #[tokio::test]
    async fn test_save_client_invalidates_and_calls_back() {
        let transport = ScriptedTransport::new().respond(created_response());
        let invalidator = RecordingInvalidator::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let options = SaveClientOptions::new()
            .with_invalidation_key("listClients")
            .with_on_success(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });

        let created = save_client(&transport, &invalidator, &input(), &options).await.unwrap();

        assert_eq!(created.create_cwl_user.unwrap().user_id, "u1");
        assert_eq!(
            invalidator.keys(),
            vec![
                vec!["getCWLUser".to_string()],
                vec!["listOrganizations".to_string()],
                vec!["listClients".to_string()],
            ]
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_save_client_without_invalidation_still_calls_back() {
        let transport = ScriptedTransport::new().respond(created_response());
        let invalidator = RecordingInvalidator::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let options = SaveClientOptions::new().without_invalidation().with_on_success(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        save_client(&transport, &invalidator, &input(), &options).await.unwrap();

        assert!(invalidator.keys().is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_save_skips_invalidation() {
        let transport = ScriptedTransport::new().respond(GraphQlResponse::with_errors(["denied"]));
        let invalidator = RecordingInvalidator::new();

        let err = save_client(&transport, &invalidator, &input(), &SaveClientOptions::new())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "denied");
        assert!(invalidator.keys().is_empty());
    }
}
