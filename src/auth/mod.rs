pub mod oauth;
pub mod storage;

pub use storage::AuthStorage;

use crate::config::Settings;
use crate::error::Result;
use storage::Credential;

/// The single identity provider this app talks to.
pub const PROVIDER: &str = "slack";

/// Complete OAuth login: exchange the authorization code and save the token.
///
/// This is the shared logic used by both the CLI `slidecard login`
/// subcommand and the `/login` REPL slash command.
///
/// Returns an error if a required secret is missing, the token exchange
/// fails, or the credential cannot be saved.
pub async fn login(storage: &AuthStorage, settings: &Settings, code: &str) -> Result<()> {
    let client_id = settings.client_id()?;
    let client_secret = settings.client_secret()?;
    let token = oauth::exchange_code(client_id, client_secret, &settings.redirect_uri, code).await?;
    storage.set(PROVIDER, Credential::OAuth(token))?;
    Ok(())
}

/// Remove the stored Slack credential. Idempotent.
///
/// Shared by the CLI `slidecard logout` subcommand and the `/logout`
/// REPL slash command.
pub fn logout(storage: &AuthStorage) -> Result<()> {
    storage.remove(PROVIDER)
}
