//! MySQL implementation of the pending registration repository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::MySqlPool;
use tracing::{debug, info};

use td_core::domain::entities::pending_registration::PendingRegistration;
use td_core::domain::entities::user::UserProfile;
use td_core::errors::DomainError;
use td_core::repositories::PendingRegistrationRepository;
use td_shared::utils::phone::mask_phone_number;

use super::{column, db_error};

/// SQLx-backed parking space for registrations awaiting verification
pub struct MySqlPendingRegistrationRepository {
    pool: MySqlPool,
}

impl MySqlPendingRegistrationRepository {
    /// Create a new MySQL pending registration repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_pending(row: &sqlx::mysql::MySqlRow) -> Result<PendingRegistration, DomainError> {
        let category: String = column(row, "category")?;
        let role: String = column(row, "role")?;

        let profile = UserProfile {
            national_id: column(row, "national_id")?,
            reference_number: column(row, "reference_number")?,
            full_name: column(row, "full_name")?,
            category: category
                .parse()
                .map_err(|e: String| DomainError::Database { message: e })?,
            role: role
                .parse()
                .map_err(|e: String| DomainError::Database { message: e })?,
            wilaya: column(row, "wilaya")?,
            moughataa: column(row, "moughataa")?,
            school: column(row, "school")?,
            new_school: column(row, "new_school")?,
        };

        Ok(PendingRegistration {
            phone: column(row, "phone")?,
            profile,
            password_hash: column(row, "password_hash")?,
            created_at: column(row, "created_at")?,
            expires_at: column(row, "expires_at")?,
        })
    }
}

#[async_trait]
impl PendingRegistrationRepository for MySqlPendingRegistrationRepository {
    async fn replace(
        &self,
        pending: PendingRegistration,
    ) -> Result<PendingRegistration, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("failed to begin registration replacement", e))?;

        sqlx::query("DELETE FROM pending_registrations WHERE phone = ?")
            .bind(&pending.phone)
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("failed to discard superseded registration", e))?;

        let insert = r#"
            INSERT INTO pending_registrations (
                phone, national_id, reference_number, full_name,
                password_hash, category, role, wilaya, moughataa, school,
                new_school, created_at, expires_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(insert)
            .bind(&pending.phone)
            .bind(&pending.profile.national_id)
            .bind(&pending.profile.reference_number)
            .bind(&pending.profile.full_name)
            .bind(&pending.password_hash)
            .bind(pending.profile.category.as_str())
            .bind(pending.profile.role.as_str())
            .bind(&pending.profile.wilaya)
            .bind(&pending.profile.moughataa)
            .bind(&pending.profile.school)
            .bind(pending.profile.new_school)
            .bind(pending.created_at)
            .bind(pending.expires_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("failed to park registration", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("failed to commit registration replacement", e))?;

        debug!(
            phone = %mask_phone_number(&pending.phone),
            "pending registration stored"
        );

        Ok(pending)
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<PendingRegistration>, DomainError> {
        let query = r#"
            SELECT phone, national_id, reference_number, full_name,
                   password_hash, category, role, wilaya, moughataa, school,
                   new_school, created_at, expires_at
            FROM pending_registrations
            WHERE phone = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(phone)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("failed to query pending registration", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_pending(&row)?)),
            None => Ok(None),
        }
    }

    async fn delete(&self, phone: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM pending_registrations WHERE phone = ?")
            .bind(phone)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("failed to delete pending registration", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn purge_expired(&self) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM pending_registrations WHERE expires_at < ?")
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("failed to purge expired registrations", e))?;

        let purged = result.rows_affected();
        if purged > 0 {
            info!(purged = purged, "expired pending registrations removed");
        }
        Ok(purged)
    }
}
