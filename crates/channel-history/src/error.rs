use thiserror::Error;

/// Errors from the messaging-platform history client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    /// Channel username could not be resolved.
    #[error("Channel not found: {0}")]
    NotFound(String),

    /// The user session behind the client is not authorized.
    #[error("History client not authorized: {0}")]
    Unauthorized(String),

    /// Network, timeout, rate limit, disconnected client or malformed reply.
    #[error("History transport error: {0}")]
    Transport(String),
}

impl HistoryError {
    /// Short label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            HistoryError::NotFound(_) => "not_found",
            HistoryError::Unauthorized(_) => "unauthorized",
            HistoryError::Transport(_) => "transport",
        }
    }
}
