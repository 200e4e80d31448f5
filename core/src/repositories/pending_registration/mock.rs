//! Mock implementation of PendingRegistrationRepository for testing

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::pending_registration::PendingRegistration;
use crate::errors::DomainError;

use super::PendingRegistrationRepository;

/// In-memory pending registration store keyed by phone
#[derive(Clone, Default)]
pub struct MockPendingRegistrationRepository {
    pending: Arc<RwLock<HashMap<String, PendingRegistration>>>,
}

impl MockPendingRegistrationRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repository with a pending registration
    pub async fn with_pending(self, pending: PendingRegistration) -> Self {
        self.pending
            .write()
            .await
            .insert(pending.phone.clone(), pending);
        self
    }

    /// Number of held registrations
    pub async fn len(&self) -> usize {
        self.pending.read().await.len()
    }

    /// Whether the repository is empty
    pub async fn is_empty(&self) -> bool {
        self.pending.read().await.is_empty()
    }
}

#[async_trait]
impl PendingRegistrationRepository for MockPendingRegistrationRepository {
    async fn replace(
        &self,
        pending: PendingRegistration,
    ) -> Result<PendingRegistration, DomainError> {
        let mut held = self.pending.write().await;
        held.insert(pending.phone.clone(), pending.clone());
        Ok(pending)
    }

    async fn find_by_phone(
        &self,
        phone: &str,
    ) -> Result<Option<PendingRegistration>, DomainError> {
        Ok(self.pending.read().await.get(phone).cloned())
    }

    async fn delete(&self, phone: &str) -> Result<bool, DomainError> {
        Ok(self.pending.write().await.remove(phone).is_some())
    }

    async fn purge_expired(&self) -> Result<u64, DomainError> {
        let mut held = self.pending.write().await;
        let now = Utc::now();
        let before = held.len();
        held.retain(|_, p| p.expires_at >= now);
        Ok((before - held.len()) as u64)
    }
}
