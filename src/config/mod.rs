//! Key-value configuration storage backed by SQLite.
//!
//! Shares a database with [`AuthStorage`](crate::auth::AuthStorage) — pass
//! the same path to both. Every key can also come from a `SLIDECARD_*`
//! environment variable; the store wins when both are set.

use std::sync::Mutex;

use rusqlite::Connection;

use crate::consts::DEFAULT_REDIRECT_URI;
use crate::error::{Error, Result};

/// Known configuration keys, with the env var each falls back to.
pub const CONFIG_KEYS: &[(&str, &str)] = &[
    ("slack_client_id", "SLIDECARD_SLACK_CLIENT_ID"),
    ("slack_client_secret", "SLIDECARD_SLACK_CLIENT_SECRET"),
    ("template_slide_id", "SLIDECARD_TEMPLATE_SLIDE_ID"),
    ("google_token", "SLIDECARD_GOOGLE_TOKEN"),
    ("redirect_uri", "SLIDECARD_REDIRECT_URI"),
];

/// Persistent key-value configuration store.
pub struct Config {
    conn: Mutex<Connection>,
}

impl Config {
    /// Open or create the config table in the given database.
    /// Use `":memory:"` for tests.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS config (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Get a config value by key.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT value FROM config WHERE key = ?1")?;
        let mut rows = stmt.query([key])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    /// Set a config value (upsert).
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO config (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [key, value],
        )?;
        Ok(())
    }

    /// Remove a config key.
    pub fn remove(&self, key: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM config WHERE key = ?1", [key])?;
        Ok(())
    }

    /// Resolve a key: stored value first, then its environment variable.
    /// Empty values count as absent in both places.
    pub fn resolve(&self, key: &str, env_var: &str) -> Result<Option<String>> {
        if let Some(value) = self.get(key)?
            && !value.is_empty()
        {
            return Ok(Some(value));
        }
        if let Ok(value) = std::env::var(env_var)
            && !value.is_empty()
        {
            return Ok(Some(value));
        }
        Ok(None)
    }
}

/// Return the env var paired with a known config key, or an error
/// listing the valid keys. Guards `config set` against typos.
pub fn env_var_for(key: &str) -> Result<&'static str> {
    CONFIG_KEYS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, env)| *env)
        .ok_or_else(|| Error::Config {
            message: format!(
                "unknown config key `{key}` (valid keys: {})",
                CONFIG_KEYS
                    .iter()
                    .map(|(k, _)| *k)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        })
}

/// Settings resolved once at startup.
///
/// The two Slack secrets are required for OAuth; the template id and
/// Google token are only required to create a card, so their absence is
/// deferred to [`Error::Config`] at the point of use.
#[derive(Debug, Clone)]
pub struct Settings {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub template_slide_id: Option<String>,
    pub google_token: Option<String>,
    pub redirect_uri: String,
}

impl Settings {
    /// Resolve all settings from the store + environment.
    pub fn load(config: &Config) -> Result<Self> {
        Ok(Self {
            client_id: config.resolve("slack_client_id", "SLIDECARD_SLACK_CLIENT_ID")?,
            client_secret: config.resolve("slack_client_secret", "SLIDECARD_SLACK_CLIENT_SECRET")?,
            template_slide_id: config.resolve("template_slide_id", "SLIDECARD_TEMPLATE_SLIDE_ID")?,
            google_token: config.resolve("google_token", "SLIDECARD_GOOGLE_TOKEN")?,
            redirect_uri: config
                .resolve("redirect_uri", "SLIDECARD_REDIRECT_URI")?
                .unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string()),
        })
    }

    pub fn client_id(&self) -> Result<&str> {
        self.client_id.as_deref().ok_or_else(|| Error::Config {
            message: "slack_client_id is not set; run `slidecard config set slack_client_id <id>`"
                .to_string(),
        })
    }

    pub fn client_secret(&self) -> Result<&str> {
        self.client_secret.as_deref().ok_or_else(|| Error::Config {
            message:
                "slack_client_secret is not set; run `slidecard config set slack_client_secret <secret>`"
                    .to_string(),
        })
    }
}
