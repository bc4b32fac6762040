//! Error types for the platform context service.
//!
//! Protocol-specific error handling (MCP error codes) lives in the
//! adapter modules; this is the taxonomy the core speaks.

use thiserror::Error;

/// Result type alias for context operations
pub type Result<T> = std::result::Result<T, ContextError>;

/// Main error type for the context service
#[derive(Error, Debug)]
pub enum ContextError {
    /// Empty query, non-positive limit, unknown kind string and similar
    /// caller mistakes. Always recoverable by the caller.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Semantic absence: the name resolves to nothing. Not a failure of
    /// the catalog.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Structural damage in the HBK container. Fatal for ingestion.
    #[error("Corrupt container: {0}")]
    CorruptContainer(String),

    /// The file is not an HBK container we know how to read.
    #[error("Unsupported container format: {0}")]
    UnsupportedFormat(String),

    /// Bracket/token violation in the table of contents. Fatal for ingestion.
    #[error("Malformed TOC: {0}")]
    MalformedToc(String),

    /// A previous ingestion attempt failed; the catalog is not retried.
    #[error("Ingestion aborted: {0}")]
    IngestionAborted(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl ContextError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if this is a "not found" type error
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContextError::NotFound(_))
    }

    /// Check if this is a bad request error (invalid input)
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            ContextError::InvalidQuery(_) | ContextError::ConfigError(_)
        )
    }

    /// Check if this error is fatal for ingestion
    pub fn is_ingestion_fatal(&self) -> bool {
        matches!(
            self,
            ContextError::CorruptContainer(_)
                | ContextError::UnsupportedFormat(_)
                | ContextError::MalformedToc(_)
                | ContextError::IngestionAborted(_)
        )
    }
}
