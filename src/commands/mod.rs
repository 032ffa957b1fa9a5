//! Built-in REPL commands prefixed with `/`.
//!
//! Commands implement the [`Command`] trait and are registered in a
//! [`CommandRegistry`]. The registry handles dispatch, alias resolution,
//! and dynamic help generation.

mod card;
mod help;
mod login;
mod logout;
mod manifest;
mod quit;
mod whoami;

use async_trait::async_trait;
use std::sync::Arc;

use crate::auth::AuthStorage;
use crate::config::Settings;
use crate::service::AppService;

/// Session info available to commands during execution.
pub struct SessionInfo<'a> {
    pub service: &'a AppService,
    pub storage: &'a AuthStorage,
    pub settings: &'a Settings,
    pub auth_status: &'a str,
    /// URL of the card created this session, if any. Card creation is
    /// one-way per session: once set, `/card` reprints it.
    pub card_url: Option<&'a str>,
}

/// A state change the REPL needs to apply after a command runs.
#[derive(Debug, Clone)]
pub enum StateChange {
    /// Auth status changed (new status string).
    Auth(String),
    /// A card was created (artifact URL).
    CardCreated(String),
}

/// What the REPL should do after a command runs.
pub enum CommandResult {
    /// Not a command.
    NotACommand,
    /// Command handled, continue the REPL loop.
    Handled,
    /// Command produced a state change the REPL must apply.
    StateChanged(StateChange),
    /// Exit the REPL.
    Quit,
}

/// A REPL command. Implement this trait to add new commands.
#[async_trait]
pub trait Command: Send + Sync {
    /// Primary name, e.g. `"/card"`.
    fn name(&self) -> &str;

    /// Alternative names, e.g. `&["/h", "/?"]`.
    fn aliases(&self) -> &[&str] {
        &[]
    }

    /// One-line description for `/help`.
    fn description(&self) -> &str;

    /// Run the command.
    async fn execute(&self, info: &SessionInfo<'_>) -> CommandResult;
}

/// Holds registered commands.
pub struct CommandRegistry {
    commands: Vec<Arc<dyn Command>>,
}

impl CommandRegistry {
    /// Create a registry with all built-in commands.
    pub fn new() -> Self {
        let commands: Vec<Arc<dyn Command>> = vec![
            Arc::new(help::HelpCommand),
            Arc::new(whoami::WhoamiCommand),
            Arc::new(card::CardCommand),
            Arc::new(manifest::ManifestCommand),
            Arc::new(login::LoginCommand),
            Arc::new(logout::LogoutCommand),
            Arc::new(quit::QuitCommand),
        ];
        Self { commands }
    }

    /// Dispatch input to a matching command, or return `NotACommand`.
    pub async fn dispatch(&self, input: &str, info: &SessionInfo<'_>) -> CommandResult {
        let cmd = input.trim();

        for command in &self.commands {
            if cmd == command.name() || command.aliases().contains(&cmd) {
                // /help is special — it needs the registry to list all commands
                if command.name() == "/help" {
                    print!("{}", self.help_text());
                    return CommandResult::Handled;
                }
                return command.execute(info).await;
            }
        }

        if cmd.starts_with('/') {
            println!("unknown command: {cmd}");
            println!("type /help for available commands");
            return CommandResult::Handled;
        }

        CommandResult::NotACommand
    }

    /// Generate help text from all registered commands.
    pub fn help_text(&self) -> String {
        let entries: Vec<(String, &str)> = self
            .commands
            .iter()
            .map(|c| (format_label(c.name(), c.aliases()), c.description()))
            .collect();

        let max_width = entries
            .iter()
            .map(|(label, _)| label.len())
            .max()
            .unwrap_or(10);

        let mut out = String::new();
        for (label, desc) in &entries {
            out.push_str(&format!("  {label:<max_width$}  {desc}\n"));
        }
        out
    }

    /// All registered command names (for testing).
    pub fn names(&self) -> Vec<&str> {
        self.commands.iter().map(|c| c.name()).collect()
    }

    /// All registered names and aliases (for duplicate detection).
    pub fn all_triggers(&self) -> Vec<&str> {
        let mut triggers = Vec::new();
        for cmd in &self.commands {
            triggers.push(cmd.name());
            triggers.extend_from_slice(cmd.aliases());
        }
        triggers
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn format_label(name: &str, aliases: &[&str]) -> String {
    if aliases.is_empty() {
        name.to_string()
    } else {
        format!("{} ({})", name, aliases.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slack::mock::MockIdentityClient;
    use crate::slack::{TeamProfileSchema, UserProfile};
    use crate::slides::mock::MockEditor;

    /// Build a leaked SessionInfo over mock capabilities; fine in tests.
    pub(crate) fn test_info() -> SessionInfo<'static> {
        let profile = UserProfile {
            display_name: "ada".to_string(),
            real_name: "Ada Lovelace".to_string(),
            title: "Analyst".to_string(),
            ..UserProfile::default()
        };
        let identity = Arc::new(MockIdentityClient::new(
            profile,
            TeamProfileSchema::default(),
        ));
        let editor = Arc::new(MockEditor::new());
        let service: &'static AppService = Box::leak(Box::new(AppService::new(
            identity,
            editor,
            Some("template-1".to_string()),
            "https://localhost/slidecard/callback".to_string(),
        )));
        let storage: &'static AuthStorage =
            Box::leak(Box::new(AuthStorage::open(":memory:").unwrap()));
        let settings: &'static Settings = Box::leak(Box::new(Settings {
            client_id: Some("client-id".to_string()),
            client_secret: Some("client-secret".to_string()),
            template_slide_id: Some("template-1".to_string()),
            google_token: None,
            redirect_uri: "https://localhost/slidecard/callback".to_string(),
        }));

        SessionInfo {
            service,
            storage,
            settings,
            auth_status: "not authenticated",
            card_url: None,
        }
    }

    #[test]
    fn all_builtins_registered() {
        let reg = CommandRegistry::new();
        let names = reg.names();
        assert!(names.contains(&"/help"));
        assert!(names.contains(&"/whoami"));
        assert!(names.contains(&"/card"));
        assert!(names.contains(&"/manifest"));
        assert!(names.contains(&"/login"));
        assert!(names.contains(&"/logout"));
        assert!(names.contains(&"/quit"));
    }

    #[test]
    fn no_duplicate_triggers() {
        let reg = CommandRegistry::new();
        let triggers = reg.all_triggers();
        let mut seen = Vec::new();
        for t in &triggers {
            assert!(!seen.contains(t), "duplicate trigger: {t}");
            seen.push(t);
        }
    }

    #[test]
    fn help_text_includes_all_commands() {
        let reg = CommandRegistry::new();
        let text = reg.help_text();
        for name in reg.names() {
            assert!(text.contains(name), "help missing: {name}");
        }
    }

    #[tokio::test]
    async fn unknown_slash_command_is_handled() {
        let reg = CommandRegistry::new();
        assert!(matches!(
            reg.dispatch("/foobar", &test_info()).await,
            CommandResult::Handled
        ));
    }

    #[tokio::test]
    async fn non_command_passes_through() {
        let reg = CommandRegistry::new();
        assert!(matches!(
            reg.dispatch("hello world", &test_info()).await,
            CommandResult::NotACommand
        ));
    }

    #[test]
    fn format_label_no_aliases() {
        assert_eq!(format_label("/whoami", &[]), "/whoami");
    }

    #[test]
    fn format_label_with_aliases() {
        assert_eq!(format_label("/help", &["/h", "/?"]), "/help (/h, /?)");
    }
}
