//! Mock implementation of VerificationCodeRepository for testing

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::verification_code::{CodePurpose, VerificationCode};
use crate::errors::DomainError;

use super::VerificationCodeRepository;

/// In-memory verification code store
///
/// Keyed by `(phone, purpose)`, so inserting under an existing key is the
/// same supersede-on-reissue the real table performs in a transaction.
#[derive(Clone, Default)]
pub struct MockVerificationCodeRepository {
    codes: Arc<RwLock<HashMap<(String, CodePurpose), VerificationCode>>>,
}

impl MockVerificationCodeRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repository with an existing code
    pub async fn with_code(self, code: VerificationCode) -> Self {
        self.codes
            .write()
            .await
            .insert((code.phone.clone(), code.purpose), code);
        self
    }

    /// Fetch a stored code for assertions, ignoring consumption state
    pub async fn get(&self, phone: &str, purpose: CodePurpose) -> Option<VerificationCode> {
        self.codes
            .read()
            .await
            .get(&(phone.to_string(), purpose))
            .cloned()
    }

    /// Number of stored codes
    pub async fn len(&self) -> usize {
        self.codes.read().await.len()
    }

    /// Whether the repository is empty
    pub async fn is_empty(&self) -> bool {
        self.codes.read().await.is_empty()
    }
}

#[async_trait]
impl VerificationCodeRepository for MockVerificationCodeRepository {
    async fn replace(&self, code: VerificationCode) -> Result<VerificationCode, DomainError> {
        let mut codes = self.codes.write().await;
        codes.insert((code.phone.clone(), code.purpose), code.clone());
        Ok(code)
    }

    async fn find_current(
        &self,
        phone: &str,
        purpose: CodePurpose,
    ) -> Result<Option<VerificationCode>, DomainError> {
        let codes = self.codes.read().await;
        Ok(codes
            .get(&(phone.to_string(), purpose))
            .filter(|c| !c.is_used)
            .cloned())
    }

    async fn record_attempt(&self, id: Uuid) -> Result<(), DomainError> {
        let mut codes = self.codes.write().await;
        match codes.values_mut().find(|c| c.id == id) {
            Some(code) => {
                code.record_attempt();
                Ok(())
            }
            None => Err(DomainError::not_found("verification code")),
        }
    }

    async fn mark_used(&self, id: Uuid) -> Result<(), DomainError> {
        let mut codes = self.codes.write().await;
        match codes.values_mut().find(|c| c.id == id) {
            Some(code) => {
                code.mark_used();
                Ok(())
            }
            None => Err(DomainError::not_found("verification code")),
        }
    }

    async fn purge_expired(&self) -> Result<u64, DomainError> {
        let mut codes = self.codes.write().await;
        let now = Utc::now();
        let before = codes.len();
        codes.retain(|_, c| c.expires_at >= now);
        Ok((before - codes.len()) as u64)
    }
}
