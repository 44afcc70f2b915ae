//! Error types for the Thruk configuration client

/// Errors that can occur when talking to the Thruk configuration API
#[derive(Debug, thiserror::Error)]
pub enum ThrukError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Missing required fields: {0} must not be empty")]
    MissingRequiredFields(String),

    #[error("Config object not found: {id}")]
    ObjectNotFound { id: String },

    #[error("Config object not created: {message}")]
    ObjectNotCreated { message: String },

    #[error("HTTP status {status} {reason}")]
    HttpStatus { status: u16, reason: String },

    #[error("Reload failed on peer {peer_key}: {output}")]
    ReloadFailed { peer_key: String, output: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ThrukError {
    /// Whether the error was raised locally before any request was sent
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            ThrukError::InvalidInput(_) | ThrukError::MissingRequiredFields(_)
        )
    }
}

/// Result type alias for Thruk client operations
pub type Result<T> = std::result::Result<T, ThrukError>;
