//! Configuration errors.

use thiserror::Error;

/// Raised while reading the environment into `AppConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration rejected: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Semantic checks run before the server starts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Port must be non-zero")]
    InvalidPort,

    #[error("Cannot bind to '{0}'")]
    InvalidSocketAddress(String),

    #[error("Request timeout must be between 1 and 300 seconds")]
    InvalidTimeout,

    #[error("Database URL must use the postgres:// or postgresql:// scheme")]
    InvalidDatabaseUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool max_connections exceeds 100")]
    PoolSizeTooLarge,

    #[error("Catalog file not found: {0}")]
    CatalogNotFound(String),
}
