//! The application surface the presentation layer calls: one method per
//! user action, over the injected identity and document capabilities.

use std::sync::Arc;

use tracing::info;

use crate::card;
use crate::error::{Error, Result};
use crate::manifest;
use crate::slack::{Authorization, IdentityClient, UserProfile};
use crate::slides::{Artifact, DocumentEditor};

/// Authorization state as seen by the presentation layer.
#[derive(Debug, Clone)]
pub enum AuthState {
    /// No usable token; the user must visit the URL and log in.
    Unauthorized { authorization_url: String },
    /// Token present; carries a fresh profile snapshot (never cached).
    Authorized { profile: UserProfile },
}

pub struct AppService {
    identity: Arc<dyn IdentityClient>,
    editor: Arc<dyn DocumentEditor>,
    template_slide_id: Option<String>,
    redirect_uri: String,
}

impl AppService {
    pub fn new(
        identity: Arc<dyn IdentityClient>,
        editor: Arc<dyn DocumentEditor>,
        template_slide_id: Option<String>,
        redirect_uri: String,
    ) -> Self {
        Self {
            identity,
            editor,
            template_slide_id,
            redirect_uri,
        }
    }

    /// Authorization check plus profile fetch. Calling this twice with
    /// no intervening login/logout returns the same state.
    pub async fn get_me(&self) -> Result<AuthState> {
        match self.identity.check_authorization().await? {
            Authorization::Unauthorized { authorization_url } => {
                Ok(AuthState::Unauthorized { authorization_url })
            }
            Authorization::Authorized { token } => {
                let profile = self.identity.user_profile(&token).await?;
                Ok(AuthState::Authorized { profile })
            }
        }
    }

    /// Clear the stored token. Idempotent.
    pub async fn logout(&self) -> Result<()> {
        self.identity.revoke_session().await
    }

    /// Duplicate the template and substitute the caller's profile into
    /// the copy. Needs an authorized session and a configured template.
    pub async fn create_card(&self) -> Result<Artifact> {
        let template_id = self
            .template_slide_id
            .as_deref()
            .ok_or_else(|| Error::Config {
                message:
                    "template_slide_id is not set; run `slidecard config set template_slide_id <id>`"
                        .to_string(),
            })?;

        let token = match self.identity.check_authorization().await? {
            Authorization::Authorized { token } => token,
            Authorization::Unauthorized { .. } => {
                return Err(Error::Auth {
                    message: "not authorized".to_string(),
                });
            }
        };

        let profile = self.identity.user_profile(&token).await?;
        let schema = self.identity.team_profile(&token).await?;

        let artifact = card::create_card(self.editor.as_ref(), template_id, &profile, &schema).await?;
        info!(url = %artifact.url, "card created");
        Ok(artifact)
    }

    /// The Slack app manifest for operator configuration.
    pub fn app_manifest(&self) -> Result<String> {
        manifest::app_manifest(&self.redirect_uri)
    }
}
