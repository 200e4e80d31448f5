//! # Infrastructure Layer
//!
//! Concrete implementations behind the core repository and service traits:
//! MySQL persistence through SQLx, outbound SMS delivery, and bcrypt
//! password hashing. Nothing in here leaks driver types upward; everything
//! crosses the boundary as core domain entities and `DomainError`.

/// Database module - MySQL pool, schema bootstrap and repositories
pub mod database;

/// Security module - password hashing
pub mod security;

/// SMS module - outbound delivery gateways
pub mod sms;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
