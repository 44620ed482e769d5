//! Error types for the course tutor.
//!
//! One enum covers every failure category: configuration, I/O, the external
//! language model and embedding services, the passage index, prompt
//! templates, rejected input and the caller-imposed deadline.

use thiserror::Error;

/// Unified error type for the course tutor.
///
/// All fallible functions return `Result<T, AppError>`. A refused answer is
/// not an error; it is a normal pipeline outcome.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Language model service errors
    #[error("LLM error: {0}")]
    Llm(String),

    /// Embedding service errors
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Passage store and vector index errors
    #[error("Knowledge error: {0}")]
    Knowledge(String),

    /// Prompt template errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Question rejected before entering the pipeline
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The caller's deadline expired before the answer was ready
    #[error("Timed out after {0}s")]
    Timeout(u64),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Whether this error came from an external service call (or its deadline).
    pub fn is_service_error(&self) -> bool {
        matches!(
            self,
            AppError::Llm(_) | AppError::Embedding(_) | AppError::Knowledge(_) | AppError::Timeout(_)
        )
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_classification() {
        assert!(AppError::Llm("down".to_string()).is_service_error());
        assert!(AppError::Embedding("down".to_string()).is_service_error());
        assert!(AppError::Timeout(60).is_service_error());
        assert!(!AppError::InvalidInput("empty".to_string()).is_service_error());
        assert!(!AppError::Config("bad".to_string()).is_service_error());
    }

    #[test]
    fn test_timeout_message() {
        assert_eq!(AppError::Timeout(60).to_string(), "Timed out after 60s");
    }
}
