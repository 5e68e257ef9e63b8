//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid Service Layer URL format")]
    InvalidServiceLayerUrl,

    #[error("Invalid oracle URL format")]
    InvalidOracleUrl,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("use_default customer policy requires a default card code")]
    MissingDefaultCardCode,
}
