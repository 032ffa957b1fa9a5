use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngExt;
use serde::{Deserialize, Serialize};

use crate::consts::{AUTHORIZE_URL, OAUTH_SCOPE, TOKEN_URL};
use crate::error::{Error, Result};

/// Slack user token obtained from the authorization-code exchange.
///
/// Classic user tokens carry no expiry and no refresh token; they stay
/// valid until revoked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlackToken {
    pub access: String,
    pub scope: String,
    pub user_id: Option<String>,
    pub team_id: Option<String>,
}

/// Generate a random `state` token for the authorization URL.
fn generate_state() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 32] = rng.random();
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Build the authorization URL for the user to visit.
/// Returns (url, state) — the state is embedded in the URL and echoed
/// back by Slack on redirect.
pub fn build_authorize_url(client_id: &str, redirect_uri: &str) -> (String, String) {
    let state = generate_state();

    let params = [
        ("client_id", client_id),
        ("scope", OAUTH_SCOPE),
        ("redirect_uri", redirect_uri),
        ("state", &state),
    ];

    let query = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoded(v)))
        .collect::<Vec<_>>()
        .join("&");

    let url = format!("{}?{}", AUTHORIZE_URL, query);
    (url, state)
}

/// Exchange an authorization code for a user token.
///
/// Slack reports failure in-band: HTTP 200 with `ok: false` and an
/// `error` code. Both that and a non-2xx status surface as
/// [`Error::Upstream`], verbatim.
pub async fn exchange_code(
    client_id: &str,
    client_secret: &str,
    redirect_uri: &str,
    code: &str,
) -> Result<SlackToken> {
    let params = [
        ("client_id", client_id),
        ("client_secret", client_secret),
        ("code", code),
        ("redirect_uri", redirect_uri),
    ];

    let client = reqwest::Client::new();
    let resp = client.post(TOKEN_URL).form(&params).send().await?;

    if !resp.status().is_success() {
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        return Err(Error::Upstream {
            message: format!("token exchange failed ({status}): {text}"),
        });
    }

    let data: TokenResponse = resp.json().await?;

    if !data.ok {
        return Err(Error::Upstream {
            message: format!(
                "token exchange failed: {}",
                data.error.as_deref().unwrap_or("unknown error")
            ),
        });
    }

    let access = data.access_token.ok_or_else(|| Error::Upstream {
        message: "token exchange succeeded but no access_token in response".to_string(),
    })?;

    Ok(SlackToken {
        access,
        scope: data.scope.unwrap_or_default(),
        user_id: data.user_id,
        team_id: data.team_id,
    })
}

#[derive(Deserialize)]
struct TokenResponse {
    ok: bool,
    access_token: Option<String>,
    scope: Option<String>,
    user_id: Option<String>,
    team_id: Option<String>,
    error: Option<String>,
}

/// Minimal URL encoding for query parameters.
pub(crate) fn urlencoded(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char);
            }
            _ => {
                out.push_str(&format!("%{:02X}", b));
            }
        }
    }
    out
}
