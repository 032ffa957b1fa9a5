use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo};

/// Placeholder for dispatch — the registry renders the actual help text
/// since it needs the full command list.
pub struct HelpCommand;

#[async_trait]
impl Command for HelpCommand {
    fn name(&self) -> &str {
        "/help"
    }

    fn aliases(&self) -> &[&str] {
        &["/h", "/?"]
    }

    fn description(&self) -> &str {
        "show this help"
    }

    async fn execute(&self, _info: &SessionInfo<'_>) -> CommandResult {
        CommandResult::Handled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata() {
        assert_eq!(HelpCommand.name(), "/help");
        assert!(HelpCommand.aliases().contains(&"/h"));
        assert!(HelpCommand.aliases().contains(&"/?"));
    }
}
