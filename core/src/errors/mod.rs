//! Domain-specific error types and error handling.

mod types;

// Re-export all error types
pub use types::{AuthError, DeliveryError, DuplicateField, VerificationError};

use td_shared::validation::ValidationErrors;
use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    /// Malformed input; carries every violated field
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    /// Uniqueness violation on register
    #[error("an account already exists with this {field}")]
    Duplicate { field: DuplicateField },

    /// Accessing a resource the caller is not a participant of
    #[error("not authorized to access {resource}")]
    Forbidden { resource: String },

    #[error("{resource} not found")]
    NotFound { resource: String },

    /// Storage-layer failure, wrapped so callers stay driver-agnostic
    #[error("database error: {message}")]
    Database { message: String },

    #[error("internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Verification(#[from] VerificationError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

impl DomainError {
    /// Convenience constructor for not-found errors
    pub fn not_found(resource: impl Into<String>) -> Self {
        DomainError::NotFound {
            resource: resource.into(),
        }
    }

    /// Convenience constructor for authorization failures
    pub fn forbidden(resource: impl Into<String>) -> Self {
        DomainError::Forbidden {
            resource: resource.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
