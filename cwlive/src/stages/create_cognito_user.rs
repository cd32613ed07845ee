//! Cognito user provisioning step of the `createCWLUser` pipeline.

use super::{PipelineStep, StepOutcome, StepRequest};
use crate::context::PipelineContext;
use crate::core::CwlUserInput;
use crate::errors::ResolverError;
use serde::{Deserialize, Serialize};
use tracing::error;

/// Step name.
pub const CREATE_COGNITO_USER: &str = "createCognitoUser";

/// Payload sent to the user-provisioning function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCognitoUserPayload {
    /// Email address.
    pub user_email: String,
    /// First name.
    pub user_first_name: String,
    /// Last name.
    pub user_last_name: String,
    /// Phone number; omitted from the payload when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_phone: Option<String>,
    /// Role within the organization.
    pub user_role: String,
    /// Owning organization.
    pub organization_id: String,
    /// Whether a welcome email was requested.
    pub send_welcome_email: bool,
}

impl From<&CwlUserInput> for CreateCognitoUserPayload {
    fn from(input: &CwlUserInput) -> Self {
        Self {
            user_email: input.user_email.clone(),
            user_first_name: input.user_first_name.clone(),
            user_last_name: input.user_last_name.clone(),
            user_phone: input.user_phone.clone(),
            user_role: input.user_role.clone(),
            organization_id: input.organization_id.clone(),
            send_welcome_email: input.send_welcome_email.unwrap_or(false),
        }
    }
}

/// Creates the Cognito user before the record is persisted.
///
/// A failed invocation raises `CognitoCreationFailed`, which stops the
/// pipeline so nothing is persisted for a user Cognito does not know.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateCognitoUserStep;

impl CreateCognitoUserStep {
    /// Creates the step.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl PipelineStep for CreateCognitoUserStep {
    fn name(&self) -> &str {
        CREATE_COGNITO_USER
    }

    fn request(&self, ctx: &mut PipelineContext) -> Result<StepRequest, ResolverError> {
        let raw = ctx
            .argument("input")
            .ok_or_else(|| ResolverError::validation("Missing required argument 'input'"))?;
        let input: CwlUserInput = serde_json::from_value(raw.clone())
            .map_err(|e| ResolverError::validation(format!("Invalid user input: {e}")))?;

        StepRequest::invoke(&CreateCognitoUserPayload::from(&input))
    }

    fn response(
        &self,
        _ctx: &PipelineContext,
        outcome: StepOutcome,
    ) -> Result<serde_json::Value, ResolverError> {
        match outcome {
            StepOutcome::Failed(err) => {
                error!(step = CREATE_COGNITO_USER, kind = %err.kind, error = %err.message, "Error creating Cognito user");
                Err(ResolverError::cognito_creation_failed(err.message))
            }
            StepOutcome::Succeeded(result) => Ok(result),
            StepOutcome::Skipped => Ok(serde_json::Value::Null),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{InvocationError, COGNITO_CREATION_FAILED, VALIDATION_ERROR};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn context(input: serde_json::Value) -> PipelineContext {
        PipelineContext::new("createCWLUser", json!({ "input": input }))
    }

    #[test]
    fn test_request_passes_fields_through() {
        let mut ctx = context(json!({
            "userEmail": "a@b.com",
            "userFirstName": "A",
            "userLastName": "B",
            "userPhone": "+61400000000",
            "userRole": "staff",
            "organizationId": "org1",
            "sendWelcomeEmail": true,
        }));

        let request = CreateCognitoUserStep::new().request(&mut ctx).unwrap();
        assert_eq!(
            request,
            StepRequest::Invoke {
                payload: json!({
                    "userEmail": "a@b.com",
                    "userFirstName": "A",
                    "userLastName": "B",
                    "userPhone": "+61400000000",
                    "userRole": "staff",
                    "organizationId": "org1",
                    "sendWelcomeEmail": true,
                })
            }
        );
    }

    #[test]
    fn test_request_defaults_send_welcome_email_to_false() {
        let mut ctx = context(json!({
            "userEmail": "a@b.com",
            "userFirstName": "A",
            "userLastName": "B",
            "userRole": "staff",
            "organizationId": "org1",
        }));

        let StepRequest::Invoke { payload } = CreateCognitoUserStep::new().request(&mut ctx).unwrap() else {
            panic!("expected an invoke request");
        };
        assert_eq!(payload["sendWelcomeEmail"], json!(false));
        assert!(payload.get("userPhone").is_none());
    }

    #[test]
    fn test_request_accepts_non_boolean_welcome_flag() {
        let mut ctx = context(json!({
            "userEmail": "a@b.com",
            "userFirstName": "A",
            "userLastName": "B",
            "userRole": "staff",
            "organizationId": "org1",
            "sendWelcomeEmail": "true",
        }));

        let StepRequest::Invoke { payload } = CreateCognitoUserStep::new().request(&mut ctx).unwrap() else {
            panic!("expected an invoke request");
        };
        assert_eq!(payload["sendWelcomeEmail"], json!(false));
    }

    #[test]
    fn test_request_rejects_missing_input() {
        let mut ctx = PipelineContext::new("createCWLUser", json!({}));
        let err = CreateCognitoUserStep::new().request(&mut ctx).unwrap_err();
        assert_eq!(err.error_type, VALIDATION_ERROR);
    }

    #[test]
    fn test_request_rejects_malformed_input() {
        let mut ctx = context(json!({"userEmail": 42}));
        let err = CreateCognitoUserStep::new().request(&mut ctx).unwrap_err();
        assert!(err.is_type(VALIDATION_ERROR));
    }

    #[test]
    fn test_response_passes_result_through() {
        let ctx = context(json!({}));
        let result = json!({"userId": "u1", "userCreated": "2026-10-14T00:00:00.000Z"});

        let value = CreateCognitoUserStep::new()
            .response(&ctx, StepOutcome::Succeeded(result.clone()))
            .unwrap();
        assert_eq!(value, result);
    }

    #[test]
    fn test_response_error_raises_cognito_creation_failed() {
        let ctx = context(json!({}));
        let err = CreateCognitoUserStep::new()
            .response(
                &ctx,
                StepOutcome::Failed(InvocationError::upstream("An account with the given email already exists.")),
            )
            .unwrap_err();

        assert_eq!(err.error_type, COGNITO_CREATION_FAILED);
        assert_eq!(err.message, "An account with the given email already exists.");
    }
}
