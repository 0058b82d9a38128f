use thiserror::Error;

/// Errors from a chat backend call (used by the `ChatBackend` trait in aura-core).
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    #[error("HTTP request failed: {0}")]
    Transport(String),

    #[error("request timed out")]
    Timeout,

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),
}

/// Errors related to chat session operations.
#[derive(Debug, Clone, Error)]
pub enum ChatError {
    #[error("visitor name is required")]
    MissingVisitorName,

    #[error("a chat session is already active")]
    SessionAlreadyStarted,

    #[error("no active chat session")]
    NoSession,

    #[error("message text is empty")]
    EmptyMessage,

    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
}

/// Errors from the one-shot API clients (simulator, NBO, WhatsApp).
///
/// Input is validated before any request is made; a `Missing` error means
/// the network was never touched.
#[derive(Debug, Clone, Error)]
pub enum RequestError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
}

/// Return `Missing(field)` when `value` is blank.
pub fn require(field: &'static str, value: &str) -> Result<(), RequestError> {
    if value.trim().is_empty() {
        Err(RequestError::Missing(field))
    } else {
        Ok(())
    }
}

/// Errors from reading `config.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },
}
