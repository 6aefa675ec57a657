use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    /// The client's own request failed (DNS, refused connection, reset).
    /// Distinct from any error payload the backend reports: no valid JSON
    /// was necessarily received.
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with JSON that fits none of the known shapes.
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The poll budget ran out without a terminal state. The backend job
    /// may still complete after the client gives up; this only means the
    /// client stopped watching.
    #[error("Job did not finish within {waited:?}")]
    Timeout { waited: Duration },

    #[error("Poll cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, ClientError>;
