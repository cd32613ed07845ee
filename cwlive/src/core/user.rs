//! User records.

use serde::{Deserialize, Deserializer, Serialize};

/// Input of the `createCWLUser` mutation.
///
/// Also the payload source for the Cognito provisioning step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CwlUserInput {
    /// Email address; also the Cognito username.
    pub user_email: String,
    /// First name.
    pub user_first_name: String,
    /// Last name.
    pub user_last_name: String,
    /// Phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_phone: Option<String>,
    /// Job title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_title: Option<String>,
    /// Role within the organization (e.g. `staff`).
    pub user_role: String,
    /// Owning organization.
    pub organization_id: String,
    /// Whether to send a welcome email after creation.
    ///
    /// Only a JSON `true` counts as a request; any other present value
    /// reads as `false`.
    #[serde(
        default,
        deserialize_with = "lenient_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub send_welcome_email: Option<bool>,
}

fn lenient_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => None,
        Some(value) => Some(value == serde_json::Value::Bool(true)),
    })
}

impl CwlUserInput {
    /// Creates an input with the required fields.
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        role: impl Into<String>,
        organization_id: impl Into<String>,
    ) -> Self {
        Self {
            user_email: email.into(),
            user_first_name: first_name.into(),
            user_last_name: last_name.into(),
            user_phone: None,
            user_title: None,
            user_role: role.into(),
            organization_id: organization_id.into(),
            send_welcome_email: None,
        }
    }

    /// Sets the phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.user_phone = Some(phone.into());
        self
    }

    /// Sets the welcome email flag.
    #[must_use]
    pub fn with_send_welcome_email(mut self, send: bool) -> Self {
        self.send_welcome_email = Some(send);
        self
    }
}

/// The part of a created user that later pipeline steps read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResult {
    /// Email address.
    pub user_email: String,
    /// First name.
    pub user_first_name: String,
    /// Last name.
    pub user_last_name: String,
    /// Identifier assigned by Cognito.
    pub user_id: String,
}

/// A CloudWatch Live user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CwlUser {
    /// User identifier.
    pub user_id: String,
    /// Identifier of the user who added this one.
    #[serde(default)]
    pub user_added_by_id: Option<String>,
    /// Whether the privacy policy was accepted.
    #[serde(default)]
    pub privacy_policy: Option<bool>,
    /// Whether the terms and conditions were accepted.
    #[serde(default)]
    pub terms_and_conditions: Option<bool>,
    /// First name.
    pub user_first_name: String,
    /// Last name.
    pub user_last_name: String,
    /// Email address.
    pub user_email: String,
    /// Phone number.
    #[serde(default)]
    pub user_phone: Option<String>,
    /// Job title.
    #[serde(default)]
    pub user_title: Option<String>,
    /// Creation timestamp (ISO 8601).
    #[serde(default)]
    pub user_created: Option<String>,
    /// Owning organization.
    pub organization_id: String,
    /// Role within the organization.
    pub user_role: String,
    /// Client types the user belongs to.
    #[serde(default)]
    pub client_type: Option<Vec<String>>,
}

/// Data returned by the `createCWLUser` mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCwlUserMutation {
    /// The created user, if the resolver returned one.
    #[serde(rename = "createCWLUser")]
    pub create_cwl_user: Option<CwlUser>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_input_uses_graphql_field_names() {
        let input = CwlUserInput::new("a@b.com", "A", "B", "staff", "org1")
            .with_send_welcome_email(true);
        let json = serde_json::to_value(&input).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "userEmail": "a@b.com",
                "userFirstName": "A",
                "userLastName": "B",
                "userRole": "staff",
                "organizationId": "org1",
                "sendWelcomeEmail": true,
            })
        );
    }

    #[test]
    fn test_non_boolean_welcome_flag_reads_as_false() {
        for flag in [json!("true"), json!(1), json!("yes"), json!({})] {
            let input: CwlUserInput = serde_json::from_value(json!({
                "userEmail": "a@b.com",
                "userFirstName": "A",
                "userLastName": "B",
                "userRole": "staff",
                "organizationId": "org1",
                "sendWelcomeEmail": flag,
            }))
            .unwrap();
            assert_eq!(input.send_welcome_email, Some(false), "flag {flag}");
        }
    }

    #[test]
    fn test_welcome_flag_true_and_null() {
        let base = json!({
            "userEmail": "a@b.com",
            "userFirstName": "A",
            "userLastName": "B",
            "userRole": "staff",
            "organizationId": "org1",
        });
        let mut with_true = base.clone();
        with_true["sendWelcomeEmail"] = json!(true);
        let mut with_null = base;
        with_null["sendWelcomeEmail"] = serde_json::Value::Null;

        let input: CwlUserInput = serde_json::from_value(with_true).unwrap();
        assert_eq!(input.send_welcome_email, Some(true));
        let input: CwlUserInput = serde_json::from_value(with_null).unwrap();
        assert_eq!(input.send_welcome_email, None);
    }

    #[test]
    fn test_user_result_ignores_extra_fields() {
        let result: UserResult = serde_json::from_value(serde_json::json!({
            "userId": "u1",
            "userEmail": "a@b.com",
            "userFirstName": "A",
            "userLastName": "B",
            "userCreated": "2026-01-01T00:00:00.000Z",
        }))
        .unwrap();
        assert_eq!(result.user_id, "u1");
    }

    #[test]
    fn test_cwl_user_optional_fields_default() {
        let user: CwlUser = serde_json::from_value(serde_json::json!({
            "userId": "u1",
            "userFirstName": "A",
            "userLastName": "B",
            "userEmail": "a@b.com",
            "organizationId": "org1",
            "userRole": "staff",
            "userPhone": null,
        }))
        .unwrap();
        assert!(user.user_phone.is_none());
        assert!(user.client_type.is_none());
    }
}
