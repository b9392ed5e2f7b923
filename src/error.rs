// Error types for slack-launcher.
// Covers Slack API failures, registry and cache I/O, and decoding errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LauncherError {
    #[error("Slack API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Authentication failed: invalid or revoked token")]
    Unauthorized,

    #[error("Slack returned an error: {0}")]
    Slack(String),

    #[error("Rate limit exceeded, retry after {retry_at}")]
    RateLimited { retry_at: String },

    #[error("{0}")]
    RegistryUnavailable(String),

    #[error("User {0} has no avatar URL")]
    NoAvatar(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, LauncherError>;
