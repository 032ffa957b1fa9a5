use std::sync::Mutex;

use async_trait::async_trait;

use super::{Authorization, IdentityClient, TeamProfileSchema, UserProfile};
use crate::error::{Error, Result};

/// A scripted identity client for tests. Holds its token in memory and
/// serves fixed profile data.
pub struct MockIdentityClient {
    token: Mutex<Option<String>>,
    authorization_url: String,
    profile: UserProfile,
    schema: TeamProfileSchema,
}

impl MockIdentityClient {
    /// Start unauthorized with the given fixture data.
    pub fn new(profile: UserProfile, schema: TeamProfileSchema) -> Self {
        Self {
            token: Mutex::new(None),
            authorization_url: "https://slack.example/oauth/authorize?client_id=mock".to_string(),
            profile,
            schema,
        }
    }

    /// Simulate a completed OAuth redirect: install a token.
    pub fn install_token(&self, token: &str) {
        *self.token.lock().unwrap() = Some(token.to_string());
    }
}

#[async_trait]
impl IdentityClient for MockIdentityClient {
    async fn check_authorization(&self) -> Result<Authorization> {
        match self.token.lock().unwrap().clone() {
            Some(token) => Ok(Authorization::Authorized { token }),
            None => Ok(Authorization::Unauthorized {
                authorization_url: self.authorization_url.clone(),
            }),
        }
    }

    async fn user_profile(&self, token: &str) -> Result<UserProfile> {
        self.require_valid(token)?;
        Ok(self.profile.clone())
    }

    async fn team_profile(&self, token: &str) -> Result<TeamProfileSchema> {
        self.require_valid(token)?;
        Ok(self.schema.clone())
    }

    async fn revoke_session(&self) -> Result<()> {
        *self.token.lock().unwrap() = None;
        Ok(())
    }
}

impl MockIdentityClient {
    /// Reject calls made with a token that was never installed, the way
    /// Slack rejects a revoked one.
    fn require_valid(&self, token: &str) -> Result<()> {
        match self.token.lock().unwrap().as_deref() {
            Some(current) if current == token => Ok(()),
            _ => Err(Error::Auth {
                message: "invalid_auth".to_string(),
            }),
        }
    }
}
