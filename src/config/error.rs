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
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid socket address: {0}")]
    InvalidAddress(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool size must be between 1 and 100 connections")]
    InvalidPoolSize,

    #[error("Sweep interval must be between 1 second and 1 hour")]
    InvalidSweepInterval,

    #[error("Auto-checkout minutes must be between 1 and 1440")]
    InvalidAutoCheckoutMinutes,

    #[error("Near-overdue window must be between 1 and 90 days")]
    InvalidNearOverdueWindow,

    #[error("Retry delays must be non-zero with initial <= max")]
    InvalidRetryPolicy,
}
