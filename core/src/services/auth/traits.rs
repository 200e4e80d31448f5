//! Password hashing trait

use crate::errors::DomainResult;

/// Password hashing and verification
///
/// The production implementation wraps bcrypt in the infra crate; tests use
/// a transparent fake so hashes are inspectable.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password for storage
    fn hash(&self, plaintext: &str) -> DomainResult<String>;

    /// Check a plaintext password against a stored hash
    fn verify(&self, plaintext: &str, hash: &str) -> DomainResult<bool>;
}
