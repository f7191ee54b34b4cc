use thiserror::Error;

/// Errors surfaced by the DSM accessors and the exporter around them.
///
/// `Auth` and `Transport` are never produced by this crate; they exist so
/// [`ApiClient`](crate::dsm::ApiClient) implementations can report their own
/// failures, which `update()` hands back to the caller untouched.
#[derive(Debug, Error)]
pub enum DsmError {
    #[error("DSM API error: {0}")]
    Api(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP server error: {0}")]
    Server(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DsmError>;
