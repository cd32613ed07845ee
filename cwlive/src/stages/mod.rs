//! Pipeline step trait and implementations.
//!
//! A step is a pair of stateless handlers around one data source call:
//! `request` decides what to send (or `no-op`), `response` turns the
//! call's outcome into the value the next step sees as its previous
//! result.

mod create_cognito_user;
mod send_welcome_email;

pub use create_cognito_user::{CreateCognitoUserPayload, CreateCognitoUserStep, CREATE_COGNITO_USER};
pub use send_welcome_email::{SendWelcomeEmailStep, SEND_WELCOME_EMAIL, SEND_WELCOME_EMAIL_KEY};

use crate::context::PipelineContext;
use crate::errors::{InvocationError, ResolverError};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// What a step asks its data source to do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation")]
pub enum StepRequest {
    /// Invoke the data source with a payload.
    #[serde(rename = "Invoke")]
    Invoke {
        /// The invocation payload.
        payload: serde_json::Value,
    },
    /// Do not call the data source.
    #[serde(rename = "no-op")]
    NoOp,
}

impl StepRequest {
    /// Creates an invoke request from any serializable payload.
    pub fn invoke<T: Serialize>(payload: &T) -> Result<Self, ResolverError> {
        serde_json::to_value(payload)
            .map(|payload| Self::Invoke { payload })
            .map_err(|e| ResolverError::validation(format!("Failed to encode payload: {e}")))
    }

    /// Returns true for `no-op`.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        matches!(self, Self::NoOp)
    }
}

/// The outcome of a step's data source call, handed to its response handler.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// The request was `no-op`; nothing was invoked.
    Skipped,
    /// The data source returned a result.
    Succeeded(serde_json::Value),
    /// The data source reported an error.
    Failed(InvocationError),
}

impl StepOutcome {
    /// Returns the invocation result, if any.
    #[must_use]
    pub fn result(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the invocation error, if any.
    #[must_use]
    pub fn error(&self) -> Option<&InvocationError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Trait for pipeline steps.
///
/// Both handlers are synchronous transformers; the only suspension point
/// of a step is the data source call made by the resolver between them.
pub trait PipelineStep: Send + Sync + Debug {
    /// Returns the name of the step.
    fn name(&self) -> &str;

    /// Builds the data source request.
    ///
    /// An error aborts the pipeline before anything is invoked.
    fn request(&self, ctx: &mut PipelineContext) -> Result<StepRequest, ResolverError>;

    /// Converts the call outcome into this step's result.
    ///
    /// An error aborts the pipeline; the remaining steps do not run.
    fn response(
        &self,
        ctx: &PipelineContext,
        outcome: StepOutcome,
    ) -> Result<serde_json::Value, ResolverError>;
}

type RequestFn = dyn Fn(&mut PipelineContext) -> Result<StepRequest, ResolverError> + Send + Sync;
type ResponseFn =
    dyn Fn(&PipelineContext, StepOutcome) -> Result<serde_json::Value, ResolverError> + Send + Sync;

/// A step built from a pair of closures.
pub struct FnStep {
    name: String,
    request: Box<RequestFn>,
    response: Box<ResponseFn>,
}

impl FnStep {
    /// Creates a new closure-based step.
    pub fn new<Req, Res>(name: impl Into<String>, request: Req, response: Res) -> Self
    where
        Req: Fn(&mut PipelineContext) -> Result<StepRequest, ResolverError> + Send + Sync + 'static,
        Res: Fn(&PipelineContext, StepOutcome) -> Result<serde_json::Value, ResolverError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            name: name.into(),
            request: Box::new(request),
            response: Box::new(response),
        }
    }
}

impl Debug for FnStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnStep").field("name", &self.name).finish()
    }
}

impl PipelineStep for FnStep {
    fn name(&self) -> &str {
        &self.name
    }

    fn request(&self, ctx: &mut PipelineContext) -> Result<StepRequest, ResolverError> {
        (self.request)(ctx)
    }

    fn response(
        &self,
        ctx: &PipelineContext,
        outcome: StepOutcome,
    ) -> Result<serde_json::Value, ResolverError> {
        (self.response)(ctx, outcome)
    }
}
