use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo, StateChange};
use crate::error::Error;
use crate::spinner::with_spinner;

pub struct CardCommand;

#[async_trait]
impl Command for CardCommand {
    fn name(&self) -> &str {
        "/card"
    }

    fn description(&self) -> &str {
        "create your profile card and print its link"
    }

    async fn execute(&self, info: &SessionInfo<'_>) -> CommandResult {
        // One card per session. A second /card reprints the first link
        // instead of duplicating the template again.
        if let Some(url) = info.card_url {
            println!("  already created this session: {url}");
            return CommandResult::Handled;
        }

        let result = with_spinner("creating your card", info.service.create_card()).await;
        match result {
            Ok(artifact) => {
                println!("  ✓ created your card!");
                println!("  {}", artifact.url);
                CommandResult::StateChanged(StateChange::CardCreated(artifact.url))
            }
            Err(e @ Error::Config { .. }) => {
                // Recoverable: tell the operator what to set, keep the session.
                eprintln!("  ✗ {e}");
                CommandResult::Handled
            }
            Err(e @ Error::Auth { .. }) => {
                eprintln!("  ✗ {e}");
                eprintln!("  run /login first");
                CommandResult::Handled
            }
            Err(e) => {
                eprintln!("  ✗ {e}");
                CommandResult::Handled
            }
        }
    }
}
