//! MySQL implementation of the user repository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::MySqlPool;
use tracing::{error, info};
use uuid::Uuid;

use td_core::domain::entities::user::{User, UserProfile};
use td_core::errors::{DomainError, DuplicateField};
use td_core::repositories::UserRepository;
use td_shared::utils::phone::mask_phone_number;

use super::{column, db_error, parse_uuid};

const USER_COLUMNS: &str = r#"
    id, phone, national_id, reference_number, full_name, password_hash,
    category, role, wilaya, moughataa, school, new_school,
    is_verified, is_online, last_seen, created_at, updated_at
"#;

/// SQLx-backed user persistence
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = column(row, "id")?;
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

        Ok(User {
            id: parse_uuid(&id, "id")?,
            phone: column(row, "phone")?,
            profile,
            password_hash: column(row, "password_hash")?,
            is_verified: column(row, "is_verified")?,
            is_online: column(row, "is_online")?,
            last_seen: column(row, "last_seen")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }

    /// Decide which unique column a constraint violation hit
    ///
    /// Falls back to phone when the key name is not recognizable, which is
    /// also the column checked first by `find_conflict`.
    fn duplicate_field_of(message: &str) -> DuplicateField {
        if message.contains("uq_users_national_id") {
            DuplicateField::NationalId
        } else if message.contains("uq_users_reference_number") {
            DuplicateField::ReferenceNumber
        } else {
            DuplicateField::Phone
        }
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError> {
        let query = format!(
            "SELECT {} FROM users WHERE phone = ? LIMIT 1",
            USER_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(phone)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("failed to query user by phone", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE id = ? LIMIT 1", USER_COLUMNS);

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("failed to query user by id", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_conflict(
        &self,
        phone: &str,
        national_id: &str,
        reference_number: &str,
    ) -> Result<Option<DuplicateField>, DomainError> {
        let query = r#"
            SELECT phone, national_id, reference_number
            FROM users
            WHERE phone = ? OR national_id = ? OR reference_number = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(phone)
            .bind(national_id)
            .bind(reference_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("failed to check registration uniqueness", e))?;

        let row = match result {
            Some(row) => row,
            None => return Ok(None),
        };

        let existing_phone: String = column(&row, "phone")?;
        if existing_phone == phone {
            return Ok(Some(DuplicateField::Phone));
        }
        let existing_national_id: String = column(&row, "national_id")?;
        if existing_national_id == national_id {
            return Ok(Some(DuplicateField::NationalId));
        }
        Ok(Some(DuplicateField::ReferenceNumber))
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, phone, national_id, reference_number, full_name,
                password_hash, category, role, wilaya, moughataa, school,
                new_school, is_verified, is_online, last_seen,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.phone)
            .bind(&user.profile.national_id)
            .bind(&user.profile.reference_number)
            .bind(&user.profile.full_name)
            .bind(&user.password_hash)
            .bind(user.profile.category.as_str())
            .bind(user.profile.role.as_str())
            .bind(&user.profile.wilaya)
            .bind(&user.profile.moughataa)
            .bind(&user.profile.school)
            .bind(user.profile.new_school)
            .bind(user.is_verified)
            .bind(user.is_online)
            .bind(user.last_seen)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => {
                info!(
                    user_id = %user.id,
                    phone = %mask_phone_number(&user.phone),
                    "user created"
                );
                Ok(user)
            }
            // A concurrent registration for the same identity can win the
            // race between find_conflict and this insert.
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                let field = Self::duplicate_field_of(e.message());
                Err(DomainError::Duplicate { field })
            }
            Err(e) => {
                error!(
                    phone = %mask_phone_number(&user.phone),
                    error = %e,
                    "failed to create user"
                );
                Err(db_error("failed to create user", e))
            }
        }
    }

    async fn update_password_hash(
        &self,
        phone: &str,
        new_hash: &str,
    ) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE users
            SET password_hash = ?, updated_at = ?
            WHERE phone = ?
        "#;

        let result = sqlx::query(query)
            .bind(new_hash)
            .bind(Utc::now())
            .bind(phone)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("failed to update password hash", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_presence(&self, user_id: Uuid, is_online: bool) -> Result<bool, DomainError> {
        let now = Utc::now();
        let query = r#"
            UPDATE users
            SET is_online = ?, last_seen = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(is_online)
            .bind(now)
            .bind(now)
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("failed to update presence", e))?;

        Ok(result.rows_affected() > 0)
    }
}
