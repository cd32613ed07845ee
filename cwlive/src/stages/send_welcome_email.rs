//! Welcome email step of the `createCWLUser` pipeline.

use super::{PipelineStep, StepOutcome, StepRequest};
use crate::context::PipelineContext;
use crate::core::UserResult;
use crate::errors::ResolverError;
use tracing::{error, warn};

/// Step name.
pub const SEND_WELCOME_EMAIL: &str = "sendWelcomeEmail";

/// Stash key holding the welcome email flag.
pub const SEND_WELCOME_EMAIL_KEY: &str = "sendWelcomeEmail";

/// Sends a welcome email when the stash flag is exactly `true`.
///
/// Email delivery never fails the mutation: invocation errors are logged
/// and the previous step's result is returned unchanged either way.
#[derive(Debug, Clone, Copy, Default)]
pub struct SendWelcomeEmailStep;

impl SendWelcomeEmailStep {
    /// Creates the step.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl PipelineStep for SendWelcomeEmailStep {
    fn name(&self) -> &str {
        SEND_WELCOME_EMAIL
    }

    fn request(&self, ctx: &mut PipelineContext) -> Result<StepRequest, ResolverError> {
        if !ctx.stash.is_true(SEND_WELCOME_EMAIL_KEY) {
            return Ok(StepRequest::NoOp);
        }

        let user = ctx
            .prev_result()
            .cloned()
            .map(serde_json::from_value::<UserResult>);

        match user {
            Some(Ok(user)) => StepRequest::invoke(&user),
            Some(Err(e)) => {
                warn!(step = SEND_WELCOME_EMAIL, error = %e, "Previous result is not a user record, skipping welcome email");
                Ok(StepRequest::NoOp)
            }
            None => {
                warn!(step = SEND_WELCOME_EMAIL, "No previous result, skipping welcome email");
                Ok(StepRequest::NoOp)
            }
        }
    }

    fn response(
        &self,
        ctx: &PipelineContext,
        outcome: StepOutcome,
    ) -> Result<serde_json::Value, ResolverError> {
        if let StepOutcome::Failed(err) = &outcome {
            error!(step = SEND_WELCOME_EMAIL, kind = %err.kind, error = %err.message, "Error sending welcome email");
        }

        Ok(ctx.prev_result().cloned().unwrap_or(serde_json::Value::Null))
    }
}
