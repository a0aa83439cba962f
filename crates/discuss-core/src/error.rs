//! Error types for discuss

use thiserror::Error;

/// Main error type for discuss
#[derive(Debug, Error)]
pub enum DiscussError {
    /// Malformed or missing request input
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Authenticated but not allowed to perform the operation
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Referenced entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Storage backend failure other than plain IO
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unsupported schema version
    #[error("Unsupported schema version: {0}")]
    UnsupportedSchemaVersion(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<DiscussError>,
    },
}

impl DiscussError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        DiscussError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// HTTP status code the web layer should answer with.
    ///
    /// Missing entities answer 400, not 404: callers of the comment API
    /// address comments by id from a previous listing, so an unknown id is
    /// treated as a bad request.
    pub fn status_code(&self) -> u16 {
        match self {
            DiscussError::InvalidRequest(_) | DiscussError::NotFound(_) => 400,
            DiscussError::Forbidden(_) => 403,
            DiscussError::WithContext { source, .. } => source.status_code(),
            _ => 500,
        }
    }

    /// Strip any context wrappers and return the underlying error
    pub fn root_cause(&self) -> &DiscussError {
        match self {
            DiscussError::WithContext { source, .. } => source.root_cause(),
            other => other,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.root_cause(), DiscussError::NotFound(_))
    }

    pub fn is_forbidden(&self) -> bool {
        matches!(self.root_cause(), DiscussError::Forbidden(_))
    }

    pub fn is_invalid_request(&self) -> bool {
        matches!(self.root_cause(), DiscussError::InvalidRequest(_))
    }
}

impl From<toml::de::Error> for DiscussError {
    fn from(err: toml::de::Error) -> Self {
        DiscussError::Toml(err.to_string())
    }
}

/// Result type alias for discuss
pub type Result<T> = std::result::Result<T, DiscussError>;
