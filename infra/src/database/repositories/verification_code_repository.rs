//! MySQL implementation of the verification code repository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::MySqlPool;
use tracing::{debug, error, info};
use uuid::Uuid;

use td_core::domain::entities::verification_code::{CodePurpose, VerificationCode};
use td_core::errors::DomainError;
use td_core::repositories::VerificationCodeRepository;
use td_shared::utils::phone::mask_phone_number;

use super::{column, db_error, parse_uuid};

/// SQLx-backed verification code ledger
///
/// The one-live-code-per-key invariant is enforced in `replace`: the delete
/// of prior rows and the insert of the replacement run inside a single
/// transaction, so no interleaving can leave two live codes for a key.
pub struct MySqlVerificationCodeRepository {
    pool: MySqlPool,
}

impl MySqlVerificationCodeRepository {
    /// Create a new MySQL verification code repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_code(row: &sqlx::mysql::MySqlRow) -> Result<VerificationCode, DomainError> {
        let id: String = column(row, "id")?;
        let purpose: String = column(row, "purpose")?;

        Ok(VerificationCode {
            id: parse_uuid(&id, "id")?,
            phone: column(row, "phone")?,
            code: column(row, "code")?,
            purpose: purpose
                .parse()
                .map_err(|e: String| DomainError::Database { message: e })?,
            attempt_count: column(row, "attempt_count")?,
            is_used: column(row, "is_used")?,
            created_at: column(row, "created_at")?,
            expires_at: column(row, "expires_at")?,
        })
    }
}

#[async_trait]
impl VerificationCodeRepository for MySqlVerificationCodeRepository {
    async fn replace(&self, code: VerificationCode) -> Result<VerificationCode, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("failed to begin code replacement", e))?;

        sqlx::query("DELETE FROM verification_codes WHERE phone = ? AND purpose = ?")
            .bind(&code.phone)
            .bind(code.purpose.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("failed to discard superseded codes", e))?;

        let insert = r#"
            INSERT INTO verification_codes (
                id, phone, code, purpose, attempt_count, is_used,
                created_at, expires_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(insert)
            .bind(code.id.to_string())
            .bind(&code.phone)
            .bind(&code.code)
            .bind(code.purpose.as_str())
            .bind(code.attempt_count)
            .bind(code.is_used)
            .bind(code.created_at)
            .bind(code.expires_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                error!(
                    phone = %mask_phone_number(&code.phone),
                    error = %e,
                    "failed to store verification code"
                );
                db_error("failed to store verification code", e)
            })?;

        tx.commit()
            .await
            .map_err(|e| db_error("failed to commit code replacement", e))?;

        debug!(
            phone = %mask_phone_number(&code.phone),
            purpose = %code.purpose,
            "verification code stored"
        );

        Ok(code)
    }

    async fn find_current(
        &self,
        phone: &str,
        purpose: CodePurpose,
    ) -> Result<Option<VerificationCode>, DomainError> {
        // Expired rows are returned on purpose; the service layer reports
        // expiry distinctly from absence.
        let query = r#"
            SELECT id, phone, code, purpose, attempt_count, is_used,
                   created_at, expires_at
            FROM verification_codes
            WHERE phone = ? AND purpose = ? AND is_used = FALSE
            ORDER BY created_at DESC
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(phone)
            .bind(purpose.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("failed to query current code", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_code(&row)?)),
            None => Ok(None),
        }
    }

    async fn record_attempt(&self, id: Uuid) -> Result<(), DomainError> {
        sqlx::query("UPDATE verification_codes SET attempt_count = attempt_count + 1 WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("failed to record failed attempt", e))?;

        Ok(())
    }

    async fn mark_used(&self, id: Uuid) -> Result<(), DomainError> {
        sqlx::query("UPDATE verification_codes SET is_used = TRUE WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("failed to mark code used", e))?;

        Ok(())
    }

    async fn purge_expired(&self) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM verification_codes WHERE expires_at < ?")
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("failed to purge expired codes", e))?;

        let purged = result.rows_affected();
        if purged > 0 {
            info!(purged = purged, "expired verification codes removed");
        }
        Ok(purged)
    }
}
