//! Verification code repository interface

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::verification_code::{CodePurpose, VerificationCode};
use crate::errors::DomainError;

#[cfg(any(test, feature = "mock-services"))]
pub mod mock;

#[cfg(any(test, feature = "mock-services"))]
pub use mock::MockVerificationCodeRepository;

/// Storage for one-time verification codes
///
/// At most one live code exists per `(phone, purpose)` pair. `replace` is the
/// only write path for new codes and atomically supersedes whatever came
/// before it, so an earlier code can never be consumed after a reissue.
#[async_trait]
pub trait VerificationCodeRepository: Send + Sync {
    /// Store a freshly issued code, discarding any previous code for the
    /// same phone and purpose in the same atomic step
    async fn replace(&self, code: VerificationCode) -> Result<VerificationCode, DomainError>;

    /// Fetch the current unconsumed code for a phone and purpose
    ///
    /// Returns expired codes too; the caller decides how expiry is reported.
    async fn find_current(
        &self,
        phone: &str,
        purpose: CodePurpose,
    ) -> Result<Option<VerificationCode>, DomainError>;

    /// Increment the attempt counter after a failed match
    async fn record_attempt(&self, id: Uuid) -> Result<(), DomainError>;

    /// Mark a code consumed so it can never be matched again
    async fn mark_used(&self, id: Uuid) -> Result<(), DomainError>;

    /// Delete codes whose expiry has passed, returning how many were removed
    async fn purge_expired(&self) -> Result<u64, DomainError>;
}
