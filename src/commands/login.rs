use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo, StateChange};
use crate::auth;
use crate::auth::oauth;
use crate::spinner::with_spinner;

pub struct LoginCommand;

#[async_trait]
impl Command for LoginCommand {
    fn name(&self) -> &str {
        "/login"
    }

    fn description(&self) -> &str {
        "log in to Slack via OAuth"
    }

    async fn execute(&self, info: &SessionInfo<'_>) -> CommandResult {
        let client_id = match info.settings.client_id() {
            Ok(id) => id,
            Err(e) => {
                eprintln!("  ✗ {e}");
                return CommandResult::Handled;
            }
        };

        let (url, _state) = oauth::build_authorize_url(client_id, &info.settings.redirect_uri);
        let _ = open::that(&url);

        println!("Open this URL to authorize with Slack:\n");
        println!("  {url}\n");

        print!("Paste the authorization code: ");
        if std::io::Write::flush(&mut std::io::stdout()).is_err() {
            return CommandResult::Handled;
        }

        let mut code = String::new();
        if std::io::stdin().read_line(&mut code).is_err() {
            eprintln!("  ✗ failed to read input");
            return CommandResult::Handled;
        }
        let code = code.trim();

        if code.is_empty() {
            eprintln!("  ✗ no authorization code provided");
            return CommandResult::Handled;
        }

        let result = with_spinner(
            "exchanging code for a token",
            auth::login(info.storage, info.settings, code),
        )
        .await;

        match result {
            Ok(()) => {
                println!("  ✓ logged in to Slack");
                CommandResult::StateChanged(StateChange::Auth("OAuth ✓".to_string()))
            }
            Err(e) => {
                eprintln!("  ✗ login failed: {e}");
                CommandResult::Handled
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata() {
        assert_eq!(LoginCommand.name(), "/login");
        assert!(LoginCommand.aliases().is_empty());
    }
}
