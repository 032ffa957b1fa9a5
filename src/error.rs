use thiserror::Error;

/// Everything that can go wrong between the prompt and a card URL.
///
/// The three leading variants carry the user-facing classification:
/// `Config` is recoverable by the operator, `Auth` by re-running the
/// login flow, and `Upstream` carries whatever the remote API said,
/// verbatim. No retries happen anywhere.
#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("authorization error: {message}")]
    Auth { message: String },

    #[error("upstream error: {message}")]
    Upstream { message: String },

    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
