//! Slack identity data model and the [`IdentityClient`] capability.
//!
//! The card engine never talks to Slack directly — it goes through this
//! trait, so the whole flow runs against [`mock::MockIdentityClient`] in
//! tests and [`http::SlackClient`] in the binary.

pub mod http;
pub mod mock;

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A user's profile as returned by `users.profile.get`.
///
/// Slack leaves unset fields out or sends them as empty strings; an empty
/// string means absent everywhere below.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub real_name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image_512: String,
    #[serde(default)]
    pub image_192: String,
    #[serde(default)]
    pub image_72: String,
    /// Team-defined custom field values, keyed by field id.
    /// Slack sends `null` (or omits the key) when the user has none.
    #[serde(default)]
    pub fields: Option<HashMap<String, FieldValue>>,
}

impl UserProfile {
    /// Value for a custom field id, or `None` when unset.
    pub fn field_value(&self, field_id: &str) -> Option<&str> {
        self.fields
            .as_ref()
            .and_then(|fields| fields.get(field_id))
            .map(|field| field.value.as_str())
    }
}

/// A custom-field value on a user profile. Free-form, team-defined.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldValue {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub alt: String,
}

/// One custom-field definition from the team profile schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub id: String,
    pub label: String,
}

/// The team's custom-field schema, in team-defined order. Used only to
/// map placeholder tokens in the template to field ids in the profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamProfileSchema {
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

/// Result of an authorization check against the token store.
#[derive(Debug, Clone)]
pub enum Authorization {
    Authorized { token: String },
    /// No usable token; the caller must send the user to this URL.
    Unauthorized { authorization_url: String },
}

/// Read-only access to the identity provider.
#[async_trait]
pub trait IdentityClient: Send + Sync {
    /// Consult the token store; without a token, hand back the
    /// authorization URL instead.
    async fn check_authorization(&self) -> Result<Authorization>;

    /// Fetch the authenticated user's profile.
    async fn user_profile(&self, token: &str) -> Result<UserProfile>;

    /// Fetch the team's custom-field schema.
    async fn team_profile(&self, token: &str) -> Result<TeamProfileSchema>;

    /// Clear the stored token unconditionally. Idempotent.
    async fn revoke_session(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_deserializes_with_missing_fields() {
        let profile: UserProfile = serde_json::from_str(r#"{"display_name": "ada"}"#).unwrap();
        assert_eq!(profile.display_name, "ada");
        assert_eq!(profile.real_name, "");
        assert_eq!(profile.image_512, "");
        assert!(profile.fields.is_none());
    }

    #[test]
    fn profile_deserializes_custom_fields() {
        let json = r#"{
            "display_name": "ada",
            "fields": {
                "Xf01": {"value": "she/her", "alt": ""},
                "Xf02": {"value": "Curry", "alt": ""}
            }
        }"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.field_value("Xf01"), Some("she/her"));
        assert_eq!(profile.field_value("Xf02"), Some("Curry"));
        assert_eq!(profile.field_value("Xf99"), None);
    }

    #[test]
    fn field_value_none_when_fields_null() {
        let profile: UserProfile =
            serde_json::from_str(r#"{"display_name": "ada", "fields": null}"#).unwrap();
        assert_eq!(profile.field_value("Xf01"), None);
    }

    #[test]
    fn schema_preserves_field_order() {
        let json = r#"{
            "fields": [
                {"id": "Xf02", "label": "Favorite food"},
                {"id": "Xf01", "label": "Pronouns"}
            ]
        }"#;
        let schema: TeamProfileSchema = serde_json::from_str(json).unwrap();
        assert_eq!(schema.fields[0].label, "Favorite food");
        assert_eq!(schema.fields[1].label, "Pronouns");
    }
}
