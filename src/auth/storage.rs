use std::sync::Mutex;

use rusqlite::Connection;

use super::oauth::SlackToken;
use crate::error::Result;

/// Credential types stored per provider.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type")]
pub enum Credential {
    /// Token obtained via the OAuth login flow.
    #[serde(rename = "oauth")]
    OAuth(SlackToken),
    /// Token pasted or imported directly (e.g. an `xoxp-` user token).
    #[serde(rename = "token")]
    Token { access: String },
}

/// Manages credential storage in SQLite.
///
/// Shares a database with [`Config`](crate::config::Config) — pass the
/// same path to both.
pub struct AuthStorage {
    conn: Mutex<Connection>,
}

impl AuthStorage {
    /// Open or create a credentials table in the given database path.
    /// Use `":memory:"` for tests.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS credentials (
                provider TEXT PRIMARY KEY,
                data     TEXT NOT NULL
            )",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Get credential for a provider.
    pub fn get(&self, provider: &str) -> Result<Option<Credential>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT data FROM credentials WHERE provider = ?1")?;
        let mut rows = stmt.query([provider])?;
        match rows.next()? {
            Some(row) => {
                let json: String = row.get(0)?;
                let cred: Credential = serde_json::from_str(&json)?;
                Ok(Some(cred))
            }
            None => Ok(None),
        }
    }

    /// Store credential for a provider (upsert).
    pub fn set(&self, provider: &str, credential: Credential) -> Result<()> {
        let json = serde_json::to_string(&credential)?;
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO credentials (provider, data) VALUES (?1, ?2)
             ON CONFLICT(provider) DO UPDATE SET data = excluded.data",
            [provider, &json],
        )?;
        Ok(())
    }

    /// Remove credential for a provider. Idempotent.
    pub fn remove(&self, provider: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM credentials WHERE provider = ?1", [provider])?;
        Ok(())
    }

    /// Get the access token for a provider.
    /// Priority: stored OAuth token → stored direct token → environment
    /// variable. No refresh happens: Slack user tokens stay valid until
    /// revoked, and an invalid one surfaces from the API as an auth error.
    pub fn access_token(&self, provider: &str, env_var: &str) -> Result<Option<String>> {
        if let Some(cred) = self.get(provider)? {
            match cred {
                Credential::OAuth(token) => return Ok(Some(token.access)),
                Credential::Token { access } => return Ok(Some(access)),
            }
        }

        // Fall back to environment variable
        if let Ok(token) = std::env::var(env_var)
            && !token.is_empty()
        {
            return Ok(Some(token));
        }

        Ok(None)
    }
}
