//! User operations.

use super::queries::{CREATE_CWL_USER_MUTATION, GET_CWL_USER_QUERY};
use super::{decode_field, execute, log_failure, GraphQlRequest, GraphQlTransport};
use crate::core::{CreateCwlUserMutation, CwlUser, CwlUserInput};
use crate::errors::ApiError;
use serde_json::json;

const GET_CWL_USER: &str = "getCWLUser";

/// Fetches a user by id; `Ok(None)` when the user does not exist.
pub async fn get_cwl_user<T>(transport: &T, user_id: &str) -> Result<Option<CwlUser>, ApiError>
where
    T: GraphQlTransport + ?Sized,
{
    let request = GraphQlRequest::new("GetCWLUser", GET_CWL_USER_QUERY)
        .with_variables(json!({ "userId": user_id }));

    async {
        let data = execute(transport, request, "Failed to fetch user").await?;
        decode_field(GET_CWL_USER, data, GET_CWL_USER)
    }
    .await
    .map_err(|e| log_failure("getCWLUserAPI", e))
}

/// Creates a user and returns the mutation data.
pub async fn create_cwl_user<T>(
    transport: &T,
    input: &CwlUserInput,
) -> Result<CreateCwlUserMutation, ApiError>
where
    T: GraphQlTransport + ?Sized,
{
    let request = GraphQlRequest::new("CreateCWLUser", CREATE_CWL_USER_MUTATION)
        .with_variables(json!({ "input": input }));

    async {
        let data = execute(transport, request, "Failed to create user")
            .await?
            .ok_or_else(|| ApiError::MissingData("No data returned from createCWLUser mutation".to_string()))?;
        serde_json::from_value::<CreateCwlUserMutation>(data).map_err(|e| ApiError::Decode {
            operation: "createCWLUser".to_string(),
            message: e.to_string(),
        })
    }
    .await
    .map_err(|e| log_failure("createCWLUserAPI", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::GraphQlResponse;
    use crate::errors::TransportError;
    use crate::testing::ScriptedTransport;
    use pretty_assertions::assert_eq;

    fn user_json() -> serde_json::Value {
        json!({
            "userId": "u1",
            "userFirstName": "A",
            "userLastName": "B",
            "userEmail": "a@b.com",
            "organizationId": "org1",
            "userRole": "staff",
        })
    }

    #[tokio::test]
    async fn test_get_user_returns_record() {
        let transport = ScriptedTransport::new().respond(GraphQlResponse::with_data(json!({"getCWLUser": user_json()})));

        let user = get_cwl_user(&transport, "u1").await.unwrap().unwrap();
        assert_eq!(user.user_email, "a@b.com");

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].operation_name, "GetCWLUser");
        assert_eq!(requests[0].variables, json!({"userId": "u1"}));
    }

    #[tokio::test]
    async fn test_get_user_missing_is_none() {
        let transport = ScriptedTransport::new().respond(GraphQlResponse::with_data(json!({"getCWLUser": null})));
        assert_eq!(get_cwl_user(&transport, "u2").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_user_surfaces_first_error_message() {
        let response: GraphQlResponse =
            serde_json::from_value(json!({"data": null, "errors": [{"message": "not found"}]})).unwrap();
        let transport = ScriptedTransport::new().respond(response);

        let err = get_cwl_user(&transport, "u1").await.unwrap_err();
        assert_eq!(err, ApiError::graphql("not found"));
        assert_eq!(err.to_string(), "not found");
    }

    #[tokio::test]
    async fn test_get_user_fallback_message() {
        let response: GraphQlResponse = serde_json::from_value(json!({"errors": [{"message": null}]})).unwrap();
        let transport = ScriptedTransport::new().respond(response);

        let err = get_cwl_user(&transport, "u1").await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch user");
    }

    #[tokio::test]
    async fn test_errors_win_over_data() {
        let response = GraphQlResponse {
            data: Some(json!({"getCWLUser": user_json()})),
            ..GraphQlResponse::with_errors(["partial failure"])
        };
        let transport = ScriptedTransport::new().respond(response);

        let err = get_cwl_user(&transport, "u1").await.unwrap_err();
        assert_eq!(err.to_string(), "partial failure");
    }

    #[tokio::test]
    async fn test_transport_error_is_returned_unchanged() {
        let transport = ScriptedTransport::new().fail(TransportError::new("connection refused"));

        let err = get_cwl_user(&transport, "u1").await.unwrap_err();
        assert_eq!(err, ApiError::Transport(TransportError::new("connection refused")));
    }

    #[tokio::test]
    async fn test_create_user_returns_mutation_data() {
        let transport = ScriptedTransport::new().respond(GraphQlResponse::with_data(json!({"createCWLUser": user_json()})));
        let input = CwlUserInput::new("a@b.com", "A", "B", "staff", "org1").with_send_welcome_email(true);

        let created = create_cwl_user(&transport, &input).await.unwrap();
        assert_eq!(created.create_cwl_user.unwrap().user_id, "u1");
        assert_eq!(transport.requests()[0].variables["input"]["sendWelcomeEmail"], json!(true));
    }

    #[tokio::test]
    async fn test_create_user_without_data() {
        let transport = ScriptedTransport::new().respond(GraphQlResponse::default());
        let input = CwlUserInput::new("a@b.com", "A", "B", "staff", "org1");

        let err = create_cwl_user(&transport, &input).await.unwrap_err();
        assert_eq!(err.to_string(), "No data returned from createCWLUser mutation");
    }

    #[tokio::test]
    async fn test_create_user_fallback_message() {
        let transport = ScriptedTransport::new().respond(GraphQlResponse::with_errors([""]));
        let input = CwlUserInput::new("a@b.com", "A", "B", "staff", "org1");

        let err = create_cwl_user(&transport, &input).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to create user");
    }
}
