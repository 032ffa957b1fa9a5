//! Slack app manifest for operator configuration.

use crate::consts::{APP_NAME, OAUTH_SCOPE};
use crate::error::Result;

/// Build the manifest JSON (pretty-printed) declaring the app's OAuth
/// scope and redirect URL, ready to paste into Slack's app config.
pub fn app_manifest(redirect_uri: &str) -> Result<String> {
    let manifest = serde_json::json!({
        "display_information": {
            "name": APP_NAME,
        },
        "oauth_config": {
            "redirect_urls": [redirect_uri],
            "scopes": {
                "user": [OAUTH_SCOPE],
            },
        },
        "settings": {
            "org_deploy_enabled": false,
            "socket_mode_enabled": false,
            "token_rotation_enabled": false,
        },
    });

    Ok(serde_json::to_string_pretty(&manifest)?)
}
