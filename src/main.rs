use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use slidecard::auth::storage::Credential;
use slidecard::auth::{self, AuthStorage, PROVIDER, oauth};
use slidecard::banner::{BannerInfo, print_banner, print_session_summary};
use slidecard::commands::{CommandRegistry, CommandResult, SessionInfo, StateChange};
use slidecard::config::{self, Config, Settings};
use slidecard::consts::{TOKEN_ENV_VAR, default_db_path};
use slidecard::logging::init_logger;
use slidecard::service::{AppService, AuthState};
use slidecard::slack::http::SlackClient;
use slidecard::slides::google::GoogleSlidesEditor;
use slidecard::spinner::with_spinner;

#[derive(Parser)]
#[command(
    name = "slidecard",
    version,
    about = "Turn your Slack profile into a shareable presentation card."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// SQLite database path for tokens and config (use :memory: for ephemeral)
    #[arg(short, long)]
    db: Option<PathBuf>,

    /// Verbose diagnostics
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Log in to Slack via OAuth
    Login,
    /// Log out and clear the stored token
    Logout,
    /// Create a profile card and print its link
    Card,
    /// Print the Slack app manifest for operator configuration
    Manifest,
    /// Manage configuration values
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Set a configuration value
    Set { key: String, value: String },
    /// Show a configuration value (including env fallback)
    Get { key: String },
    /// Remove a configuration value
    Unset { key: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let db_path = match &cli.db {
        Some(path) => path.clone(),
        None => {
            let path = default_db_path();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            path
        }
    };
    let db_path = db_path.to_string_lossy().into_owned();

    let config = Config::open(&db_path)?;
    let settings = Settings::load(&config)?;
    let storage = Arc::new(AuthStorage::open(&db_path)?);

    // Config management needs no clients
    if let Some(Command::Config { action }) = &cli.command {
        return handle_config(&config, action);
    }

    let identity = Arc::new(SlackClient::new(storage.clone(), settings.clone()));
    let editor = Arc::new(GoogleSlidesEditor::new(settings.google_token.clone()));
    let service = AppService::new(
        identity,
        editor,
        settings.template_slide_id.clone(),
        settings.redirect_uri.clone(),
    );

    // Handle one-shot subcommands
    if let Some(command) = &cli.command {
        match command {
            Command::Login => return handle_login(storage.as_ref(), &settings).await,
            Command::Logout => return handle_logout(storage.as_ref()),
            Command::Card => return handle_card(&service).await,
            Command::Manifest => {
                println!("{}", service.app_manifest()?);
                return Ok(());
            }
            Command::Config { .. } => unreachable!("handled above"),
        }
    }

    let mut auth_status = match storage.get(PROVIDER)? {
        Some(Credential::OAuth(_)) => "OAuth ✓".to_string(),
        Some(Credential::Token { .. }) => "token ✓".to_string(),
        None => {
            if std::env::var(TOKEN_ENV_VAR)
                .map(|t| !t.is_empty())
                .unwrap_or(false)
            {
                "token (env) ✓".to_string()
            } else {
                "not authenticated".to_string()
            }
        }
    };

    let template_label = settings
        .template_slide_id
        .clone()
        .unwrap_or_else(|| "not configured".to_string());

    print_banner(&BannerInfo {
        auth_status: &auth_status,
        template: &template_label,
        redirect_uri: &settings.redirect_uri,
        db_path: &db_path,
    });

    // Initial authorization check — the session starts in a loading
    // state and lands on authorized or the sign-in URL.
    match with_spinner("checking authorization", service.get_me()).await {
        Ok(AuthState::Authorized { profile }) => {
            let name = if profile.display_name.is_empty() {
                &profile.real_name
            } else {
                &profile.display_name
            };
            println!("authorized as @{name}. type /card to create your card.");
        }
        Ok(AuthState::Unauthorized { authorization_url }) => {
            println!("not signed in. sign in at:\n\n  {authorization_url}\n");
            println!("then run /login and paste the code.");
        }
        Err(e) => eprintln!("error: {e}"),
    }

    let registry = CommandRegistry::new();
    let mut card_url: Option<String> = None;

    // REPL — async stdin so Ctrl+C is caught at the prompt too
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("\nslidecard> ");
        io::stdout().flush()?;

        // Read next line, interruptible by Ctrl+C
        let line = tokio::select! {
            result = lines.next_line() => {
                match result {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        // Ctrl+D (EOF)
                        println!();
                        break;
                    }
                    Err(e) => {
                        eprintln!("input error: {}", e);
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let info = SessionInfo {
            service: &service,
            storage: storage.as_ref(),
            settings: &settings,
            auth_status: &auth_status,
            card_url: card_url.as_deref(),
        };

        match registry.dispatch(input, &info).await {
            CommandResult::NotACommand => {
                println!("type /help for available commands");
            }
            CommandResult::Handled => {}
            CommandResult::StateChanged(StateChange::Auth(status)) => {
                auth_status = status;
            }
            CommandResult::StateChanged(StateChange::CardCreated(url)) => {
                card_url = Some(url);
            }
            CommandResult::Quit => break,
        }
    }

    print_session_summary(card_url.as_deref());
    Ok(())
}

async fn handle_login(storage: &AuthStorage, settings: &Settings) -> anyhow::Result<()> {
    println!("Logging in to Slack...\n");

    let client_id = settings.client_id()?;
    let (url, _state) = oauth::build_authorize_url(client_id, &settings.redirect_uri);

    // Try to open browser, silently ignore failures (e.g. headless/SSH)
    let _ = open::that(&url);

    println!("Open this URL to authorize:\n");
    println!("  {}\n", url);

    print!("Paste the authorization code: ");
    io::stdout().flush()?;
    let mut code = String::new();
    io::stdin().read_line(&mut code)?;
    let code = code.trim();

    if code.is_empty() {
        anyhow::bail!("no authorization code provided");
    }

    println!("\nExchanging code for a token...");
    auth::login(storage, settings, code).await?;

    println!("✓ Logged in to Slack successfully!");
    Ok(())
}

fn handle_logout(storage: &AuthStorage) -> anyhow::Result<()> {
    auth::logout(storage)?;
    println!("✓ Logged out from Slack.");
    Ok(())
}

async fn handle_card(service: &AppService) -> anyhow::Result<()> {
    let artifact = with_spinner("creating your card", service.create_card()).await?;
    println!("✓ created your card!");
    println!("{}", artifact.url);
    Ok(())
}

fn handle_config(config: &Config, action: &ConfigAction) -> anyhow::Result<()> {
    match action {
        ConfigAction::Set { key, value } => {
            config::env_var_for(key)?;
            config.set(key, value)?;
            println!("✓ {key} set");
        }
        ConfigAction::Get { key } => {
            let env_var = config::env_var_for(key)?;
            match config.resolve(key, env_var)? {
                Some(value) => println!("{value}"),
                None => println!("{key} is not set"),
            }
        }
        ConfigAction::Unset { key } => {
            config::env_var_for(key)?;
            config.remove(key)?;
            println!("✓ {key} removed");
        }
    }
    Ok(())
}
