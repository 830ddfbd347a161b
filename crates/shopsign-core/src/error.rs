//! Error types for the shopsign core.

/// Core error type for shopsign configuration.
#[derive(Debug, thiserror::Error)]
pub enum ShopsignError {
    /// A required environment variable is not set.
    #[error("missing environment variable: {0}")]
    MissingEnv(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience result type for shopsign operations.
pub type ShopsignResult<T> = Result<T, ShopsignError>;
