//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::{DomainError, DuplicateField};

use super::UserRepository;

/// In-memory user repository
///
/// `create` enforces the same three uniqueness rules as the real table, so
/// duplicate races behave the way the storage constraint would.
#[derive(Clone, Default)]
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MockUserRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repository with an existing user
    pub async fn with_user(self, user: User) -> Self {
        self.users.write().await.insert(user.id, user);
        self
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Whether the repository is empty
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }

    /// Fetch a stored user for assertions
    pub async fn get(&self, id: Uuid) -> Option<User> {
        self.users.read().await.get(&id).cloned()
    }

    fn conflict_of(
        users: &HashMap<Uuid, User>,
        phone: &str,
        national_id: &str,
        reference_number: &str,
    ) -> Option<DuplicateField> {
        for user in users.values() {
            if user.phone == phone {
                return Some(DuplicateField::Phone);
            }
            if user.profile.national_id == national_id {
                return Some(DuplicateField::NationalId);
            }
            if user.profile.reference_number == reference_number {
                return Some(DuplicateField::ReferenceNumber);
            }
        }
        None
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.phone == phone).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_conflict(
        &self,
        phone: &str,
        national_id: &str,
        reference_number: &str,
    ) -> Result<Option<DuplicateField>, DomainError> {
        let users = self.users.read().await;
        Ok(Self::conflict_of(&users, phone, national_id, reference_number))
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        if let Some(field) = Self::conflict_of(
            &users,
            &user.phone,
            &user.profile.national_id,
            &user.profile.reference_number,
        ) {
            return Err(DomainError::Duplicate { field });
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_password_hash(
        &self,
        phone: &str,
        new_hash: &str,
    ) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;
        match users.values_mut().find(|u| u.phone == phone) {
            Some(user) => {
                user.password_hash = new_hash.to_string();
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_presence(&self, user_id: Uuid, is_online: bool) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;
        match users.get_mut(&user_id) {
            Some(user) => {
                if is_online {
                    user.mark_online();
                } else {
                    user.mark_offline();
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
