//! Project-wide constants.

use std::path::PathBuf;

/// App name as declared in the Slack app manifest.
pub const APP_NAME: &str = "Slack Profile Card Generator";

/// Slack OAuth endpoints and the single user scope this app requests.
pub const AUTHORIZE_URL: &str = "https://slack.com/oauth/authorize";
pub const TOKEN_URL: &str = "https://slack.com/api/oauth.access";
pub const OAUTH_SCOPE: &str = "users.profile:read";

/// Read-only Slack identity endpoints, relative to the API base.
pub const SLACK_API_BASE: &str = "https://slack.com/api";
pub const USER_PROFILE_METHOD: &str = "users.profile.get";
pub const TEAM_PROFILE_METHOD: &str = "team.profile.get";

/// Google API bases for the document editor.
pub const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";
pub const SLIDES_API_BASE: &str = "https://slides.googleapis.com/v1";

/// Placeholder tokens expected in the slide template.
pub const NAME_PLACEHOLDER: &str = "{{name}}";
pub const TITLE_PLACEHOLDER: &str = "{{title}}";
pub const IMAGE_PLACEHOLDER: &str = "{{image}}";

/// Redirect URI used when none is configured. The OAuth redirect itself
/// happens outside this tool; the user pastes the `code` parameter back.
pub const DEFAULT_REDIRECT_URI: &str = "https://localhost/slidecard/callback";

/// Environment variable holding a directly supplied Slack user token.
pub const TOKEN_ENV_VAR: &str = "SLACK_USER_TOKEN";

/// Default database path: `~/.slidecard/slidecard.db`.
/// Single DB for credentials and config.
pub fn default_db_path() -> PathBuf {
    dirs::home_dir()
        .expect("cannot determine home directory")
        .join(".slidecard")
        .join("slidecard.db")
}

/// Placeholder token for a team custom field, e.g. `{{Pronouns}}`.
pub fn field_placeholder(label: &str) -> String {
    format!("{{{{{label}}}}}")
}
