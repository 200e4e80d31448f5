//! User repository trait defining the interface for user persistence.
//!
//! The trait is async-first and returns domain errors, keeping the
//! abstraction boundary between domain and infrastructure layers.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::{DomainError, DuplicateField};

#[cfg(any(test, feature = "mock-services"))]
pub mod mock;

#[cfg(any(test, feature = "mock-services"))]
pub use mock::MockUserRepository;

/// Repository contract for User entity persistence
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by phone number
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user registered with this phone
    /// * `Err(DomainError)` - Database error occurred
    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Check the three uniqueness columns for an existing owner
    ///
    /// # Returns
    /// * `Ok(Some(field))` - which column already has this value
    /// * `Ok(None)` - all three values are free
    async fn find_conflict(
        &self,
        phone: &str,
        national_id: &str,
        reference_number: &str,
    ) -> Result<Option<DuplicateField>, DomainError>;

    /// Persist a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError::Duplicate)` - a uniqueness constraint fired (a
    ///   concurrent registration won the race)
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Replace the password hash of the user registered with `phone`
    ///
    /// # Returns
    /// * `Ok(true)` - hash replaced
    /// * `Ok(false)` - no user with this phone
    async fn update_password_hash(&self, phone: &str, new_hash: &str)
        -> Result<bool, DomainError>;

    /// Flip the online flag and stamp `last_seen`
    ///
    /// # Returns
    /// * `Ok(true)` - presence updated
    /// * `Ok(false)` - no user with this id
    async fn set_presence(&self, user_id: Uuid, is_online: bool) -> Result<bool, DomainError>;
}
