//! Test fixtures for `createCWLUser` scenarios.

use std::sync::Arc;

use serde_json::json;

use super::RecordingDataSource;
use crate::pipeline::{create_user_resolver, CreateUserDataSources, DataSource, PipelineResolver};
use crate::stages::{FnStep, PipelineStep, StepOutcome, StepRequest};

/// The mutation input used across scenarios.
///
/// `send_welcome_email` is inserted verbatim when present.
#[must_use]
pub fn user_input(send_welcome_email: Option<serde_json::Value>) -> serde_json::Value {
    let mut input = json!({
        "userEmail": "a@b.com",
        "userFirstName": "A",
        "userLastName": "B",
        "userRole": "staff",
        "organizationId": "org1",
    });
    if let (Some(flag), Some(obj)) = (send_welcome_email, input.as_object_mut()) {
        obj.insert("sendWelcomeEmail".to_string(), flag);
    }
    input
}

/// Mutation arguments wrapping [`user_input`].
#[must_use]
pub fn create_user_arguments(send_welcome_email: Option<serde_json::Value>) -> serde_json::Value {
    json!({ "input": user_input(send_welcome_email) })
}

/// The record returned by the Cognito provisioning function.
#[must_use]
pub fn cognito_user_record() -> serde_json::Value {
    json!({
        "userId": "u1",
        "userEmail": "a@b.com",
        "userFirstName": "A",
        "userLastName": "B",
    })
}

/// A persistence step that writes the previous result and returns it.
#[must_use]
pub fn passthrough_persist_step() -> Arc<dyn PipelineStep> {
    Arc::new(FnStep::new(
        "persistUser",
        |ctx| match ctx.prev_result() {
            Some(record) => StepRequest::invoke(record),
            None => Ok(StepRequest::NoOp),
        },
        |ctx, outcome| match outcome {
            StepOutcome::Succeeded(value) => Ok(value),
            _ => Ok(ctx.prev_result().cloned().unwrap_or_default()),
        },
    ))
}

/// A `createCWLUser` resolver wired to recording data sources.
#[derive(Debug)]
pub struct CreateUserFixture {
    /// The resolver under test.
    pub resolver: PipelineResolver,
    /// Cognito provisioning function.
    pub cognito: Arc<RecordingDataSource>,
    /// User table.
    pub persist: Arc<RecordingDataSource>,
    /// Notification function.
    pub welcome_email: Arc<RecordingDataSource>,
}

impl CreateUserFixture {
    /// Builds the fixture from the three recording data sources.
    #[must_use]
    pub fn new(
        cognito: RecordingDataSource,
        persist: RecordingDataSource,
        welcome_email: RecordingDataSource,
    ) -> Self {
        let cognito = Arc::new(cognito);
        let persist = Arc::new(persist);
        let welcome_email = Arc::new(welcome_email);

        let resolver = create_user_resolver(
            passthrough_persist_step(),
            CreateUserDataSources {
                cognito: cognito.clone() as Arc<dyn DataSource>,
                persist: persist.clone() as Arc<dyn DataSource>,
                welcome_email: welcome_email.clone() as Arc<dyn DataSource>,
            },
        );

        Self {
            resolver,
            cognito,
            persist,
            welcome_email,
        }
    }

    /// Builds the fixture where every call succeeds.
    #[must_use]
    pub fn succeeding() -> Self {
        Self::new(
            RecordingDataSource::returning("createCognitoUserFn", cognito_user_record()),
            RecordingDataSource::new("CWLUserTable"),
            RecordingDataSource::returning("sendWelcomeEmailFn", json!({"messageId": "m1"})),
        )
    }
}
