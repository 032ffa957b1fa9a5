use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo, StateChange};
use crate::service::AuthState;
use crate::spinner::with_spinner;

pub struct WhoamiCommand;

#[async_trait]
impl Command for WhoamiCommand {
    fn name(&self) -> &str {
        "/whoami"
    }

    fn aliases(&self) -> &[&str] {
        &["/me"]
    }

    fn description(&self) -> &str {
        "show who you are signed in as"
    }

    async fn execute(&self, info: &SessionInfo<'_>) -> CommandResult {
        println!("  credential    {}", info.auth_status);
        let me = with_spinner("checking authorization", info.service.get_me()).await;
        match me {
            Ok(AuthState::Authorized { profile }) => {
                let name = if profile.display_name.is_empty() {
                    &profile.real_name
                } else {
                    &profile.display_name
                };
                println!("  authorized as @{name}");
                if !profile.title.is_empty() {
                    println!("  title         {}", profile.title);
                }
                CommandResult::StateChanged(StateChange::Auth("authorized ✓".to_string()))
            }
            Ok(AuthState::Unauthorized { authorization_url }) => {
                println!("  not authenticated");
                println!("  sign in at: {authorization_url}");
                println!("  then run /login and paste the code");
                CommandResult::StateChanged(StateChange::Auth("not authenticated".to_string()))
            }
            Err(e) => {
                eprintln!("  ✗ {e}");
                CommandResult::Handled
            }
        }
    }
}
