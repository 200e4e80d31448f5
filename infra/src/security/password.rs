//! Bcrypt-backed password hashing

use td_core::errors::{DomainError, DomainResult};
use td_core::services::auth::PasswordHasher;

/// Password hasher over bcrypt
///
/// Hashing and verification are CPU-bound; both run on the caller's thread,
/// which is acceptable at login volumes. The cost factor is fixed at
/// construction so stored hashes stay comparable.
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Create a hasher with the default bcrypt cost
    pub fn new() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Create a hasher with an explicit cost factor
    ///
    /// Lower costs are useful in test environments where hashing time
    /// dominates the run.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, plaintext: &str) -> DomainResult<String> {
        bcrypt::hash(plaintext, self.cost).map_err(|e| DomainError::Internal {
            message: format!("password hashing failed: {}", e),
        })
    }

    fn verify(&self, plaintext: &str, hash: &str) -> DomainResult<bool> {
        bcrypt::verify(plaintext, hash).map_err(|e| DomainError::Internal {
            message: format!("password verification failed: {}", e),
        })
    }
}
