use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo, StateChange};
use crate::service::AuthState;

pub struct LogoutCommand;

#[async_trait]
impl Command for LogoutCommand {
    fn name(&self) -> &str {
        "/logout"
    }

    fn description(&self) -> &str {
        "log out and clear the stored token"
    }

    async fn execute(&self, info: &SessionInfo<'_>) -> CommandResult {
        if let Err(e) = info.service.logout().await {
            eprintln!("  ✗ failed to clear credentials: {e}");
            return CommandResult::Handled;
        }
        println!("  ✓ logged out");

        // Re-issue the authorization check so the session immediately
        // shows the sign-in URL again.
        if let Ok(AuthState::Unauthorized { authorization_url }) = info.service.get_me().await {
            println!("  sign in again at: {authorization_url}");
        }

        CommandResult::StateChanged(StateChange::Auth("not authenticated".to_string()))
    }
}
