//! Organization records.

use serde::{Deserialize, Serialize};

/// An organization as returned by `listOrganizations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    /// Organization identifier.
    pub organization_id: String,
    /// Display name.
    pub organization_name: String,
    /// Organization type.
    #[serde(default)]
    pub organization_type: Option<String>,
    /// Creation timestamp (ISO 8601).
    #[serde(default)]
    pub organization_created: Option<String>,
    /// The main administrator.
    #[serde(default)]
    pub main_admin_user_id: Option<String>,
    /// Administrator user ids.
    #[serde(default)]
    pub admin_user_ids: Option<Vec<String>>,
    /// Staff user ids.
    #[serde(default)]
    pub staff_user_ids: Option<Vec<String>>,
}
