use std::fmt;

use async_trait::async_trait;

use super::types::{ChatReply, HealthStatus};

/// Message used when a failed response carries no `error` field.
pub const DEFAULT_ERROR_MESSAGE: &str = "Failed to get recommendations";

/// Errors that can occur while talking to the recommendation service.
///
/// All variants end up on the same user-visible failure path; they stay
/// distinct so the log says what actually went wrong.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceError {
    /// Client misconfigured (bad base URL, TLS setup). Raised at startup.
    Config(String),
    /// Connection failure, timeout, or the body could not be read.
    Transport(String),
    /// The service answered with a non-success status.
    Service { status: u16, message: String },
    /// The body was not the JSON shape we expect.
    Parse(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Config(msg) => write!(f, "config error: {msg}"),
            ServiceError::Transport(msg) => write!(f, "transport error: {msg}"),
            ServiceError::Service { status, message } => {
                write!(f, "service error (HTTP {status}): {message}")
            }
            ServiceError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<reqwest::Error> for ServiceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ServiceError::Transport(format!("request timed out: {e}"))
        } else if e.is_decode() {
            ServiceError::Parse(e.to_string())
        } else {
            ServiceError::Transport(e.to_string())
        }
    }
}

#[async_trait]
pub trait RecommendationService: Send + Sync {
    /// Human-readable endpoint, shown in the title bar and logs.
    fn endpoint(&self) -> &str;

    /// Send one user message and get back the reply plus recommendations.
    async fn recommend(&self, message: &str) -> Result<ChatReply, ServiceError>;

    /// Ask the service whether it is up and how many products it serves.
    async fn health(&self) -> Result<HealthStatus, ServiceError>;

    /// Check that an image URL can actually be loaded.
    async fn probe_image(&self, url: &str) -> Result<(), ServiceError>;
}
