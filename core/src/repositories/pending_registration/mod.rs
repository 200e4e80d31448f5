//! Pending registration repository interface

use async_trait::async_trait;

use crate::domain::entities::pending_registration::PendingRegistration;
use crate::errors::DomainError;

#[cfg(any(test, feature = "mock-services"))]
pub mod mock;

#[cfg(any(test, feature = "mock-services"))]
pub use mock::MockPendingRegistrationRepository;

/// Storage for registrations awaiting phone verification
///
/// Keyed by phone. Re-submitting a registration for the same phone replaces
/// the held profile, so the verified account always reflects the latest form.
#[async_trait]
pub trait PendingRegistrationRepository: Send + Sync {
    /// Store a pending registration, replacing any previous one for the phone
    async fn replace(
        &self,
        pending: PendingRegistration,
    ) -> Result<PendingRegistration, DomainError>;

    /// Fetch the pending registration for a phone, if any
    async fn find_by_phone(
        &self,
        phone: &str,
    ) -> Result<Option<PendingRegistration>, DomainError>;

    /// Remove the pending registration for a phone
    ///
    /// Returns whether a record existed.
    async fn delete(&self, phone: &str) -> Result<bool, DomainError>;

    /// Delete registrations whose hold period has passed, returning how many
    /// were removed
    async fn purge_expired(&self) -> Result<u64, DomainError>;
}
