use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{Authorization, IdentityClient, TeamProfileSchema, UserProfile};
use crate::auth::{AuthStorage, PROVIDER, oauth};
use crate::config::Settings;
use crate::consts::{SLACK_API_BASE, TEAM_PROFILE_METHOD, TOKEN_ENV_VAR, USER_PROFILE_METHOD};
use crate::error::{Error, Result};

/// Slack `ok: false` codes that mean the token is unusable, as opposed
/// to any other upstream failure.
const AUTH_ERROR_CODES: &[&str] = &[
    "not_authed",
    "invalid_auth",
    "account_inactive",
    "token_revoked",
    "token_expired",
];

/// An [`IdentityClient`] backed by the Slack Web API.
pub struct SlackClient {
    auth: Arc<AuthStorage>,
    settings: Settings,
    client: reqwest::Client,
    base_url: String,
}

impl SlackClient {
    pub fn new(auth: Arc<AuthStorage>, settings: Settings) -> Self {
        Self {
            auth,
            settings,
            client: reqwest::Client::new(),
            base_url: SLACK_API_BASE.to_string(),
        }
    }

    /// Point the client at a different API base (tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Perform an authenticated GET against one API method and unwrap
    /// Slack's `{ok, error, profile}` envelope.
    async fn api_get<T: DeserializeOwned>(&self, method: &str, token: &str) -> Result<T> {
        let url = format!("{}/{}", self.base_url, method);
        debug!(%url, "slack api call");

        let resp = self.client.get(&url).bearer_auth(token).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(Error::Upstream {
                message: format!("slack api returned {status}: {text}"),
            });
        }

        let envelope: Envelope<T> = resp.json().await?;

        if !envelope.ok {
            let code = envelope.error.unwrap_or_else(|| "unknown_error".to_string());
            return Err(classify_api_error(method, &code));
        }

        envelope.profile.ok_or_else(|| Error::Upstream {
            message: format!("{method} returned ok but no profile payload"),
        })
    }
}

#[async_trait]
impl IdentityClient for SlackClient {
    async fn check_authorization(&self) -> Result<Authorization> {
        match self.auth.access_token(PROVIDER, TOKEN_ENV_VAR)? {
            Some(token) => Ok(Authorization::Authorized { token }),
            None => {
                let client_id = self.settings.client_id()?;
                let (url, _state) =
                    oauth::build_authorize_url(client_id, &self.settings.redirect_uri);
                Ok(Authorization::Unauthorized {
                    authorization_url: url,
                })
            }
        }
    }

    async fn user_profile(&self, token: &str) -> Result<UserProfile> {
        self.api_get(USER_PROFILE_METHOD, token).await
    }

    async fn team_profile(&self, token: &str) -> Result<TeamProfileSchema> {
        self.api_get(TEAM_PROFILE_METHOD, token).await
    }

    async fn revoke_session(&self) -> Result<()> {
        self.auth.remove(PROVIDER)
    }
}

/// Both `users.profile.get` and `team.profile.get` nest their payload
/// under `profile`.
#[derive(Deserialize)]
struct Envelope<T> {
    ok: bool,
    error: Option<String>,
    profile: Option<T>,
}

fn classify_api_error(method: &str, code: &str) -> Error {
    if AUTH_ERROR_CODES.contains(&code) {
        Error::Auth {
            message: format!("{method}: {code}"),
        }
    } else {
        Error::Upstream {
            message: format!("{method}: {code}"),
        }
    }
}
