//! Organization operations.

use super::queries::LIST_ORGANIZATIONS_QUERY;
use super::{decode_field, execute, log_failure, GraphQlRequest, GraphQlTransport};
use crate::core::Organization;
use crate::errors::ApiError;

/// Lists all organizations; missing data yields an empty list.
pub async fn list_organizations<T>(transport: &T) -> Result<Vec<Organization>, ApiError>
where
    T: GraphQlTransport + ?Sized,
{
    let request = GraphQlRequest::new("ListOrganizations", LIST_ORGANIZATIONS_QUERY);

    async {
        let data = execute(transport, request, "Failed to fetch organizations").await?;
        let organizations: Option<Vec<Organization>> =
            decode_field("listOrganizations", data, "listOrganizations")?;
        Ok(organizations.unwrap_or_default())
    }
    .await
    .map_err(|e| log_failure("listOrganizationsAPI", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::GraphQlResponse;
    use crate::testing::ScriptedTransport;
    use serde_json::json;

    #[tokio::test]
    async fn test_list_organizations() {
        let transport = ScriptedTransport::new().respond(GraphQlResponse::with_data(json!({
            "listOrganizations": [
                {"organizationId": "org1", "organizationName": "Acme", "staffUserIds": ["u1"]},
                {"organizationId": "org2", "organizationName": "Globex"},
            ]
        })));

        let orgs = list_organizations(&transport).await.unwrap();
        assert_eq!(orgs.len(), 2);
        assert_eq!(orgs[0].staff_user_ids, Some(vec!["u1".to_string()]));
        assert_eq!(transport.requests()[0].operation_name, "ListOrganizations");
    }

    #[tokio::test]
    async fn test_missing_data_is_empty() {
        let transport = ScriptedTransport::new()
            .respond(GraphQlResponse::default())
            .respond(GraphQlResponse::with_data(json!({"listOrganizations": null})));

        assert!(list_organizations(&transport).await.unwrap().is_empty());
        assert!(list_organizations(&transport).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_errors_use_fallback() {
        let transport = ScriptedTransport::new()
            .respond(GraphQlResponse::with_errors(["Unauthorized"]))
            .respond(GraphQlResponse::with_errors([""]));

        assert_eq!(list_organizations(&transport).await.unwrap_err().to_string(), "Unauthorized");
        assert_eq!(
            list_organizations(&transport).await.unwrap_err().to_string(),
            "Failed to fetch organizations"
        );
    }

    #[tokio::test]
    async fn test_malformed_data_is_decode_error() {
        let transport = ScriptedTransport::new()
            .respond(GraphQlResponse::with_data(json!({"listOrganizations": [{"organizationId": 1}]})));

        let err = list_organizations(&transport).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }
}
