use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo};

pub struct ManifestCommand;

#[async_trait]
impl Command for ManifestCommand {
    fn name(&self) -> &str {
        "/manifest"
    }

    fn description(&self) -> &str {
        "print the Slack app manifest"
    }

    async fn execute(&self, info: &SessionInfo<'_>) -> CommandResult {
        match info.service.app_manifest() {
            Ok(manifest) => println!("{manifest}"),
            Err(e) => eprintln!("  ✗ {e}"),
        }
        CommandResult::Handled
    }
}
