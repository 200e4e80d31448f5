//! SQLx implementations of the core repository traits
//!
//! Each repository owns a `MySqlPool` clone and maps rows back into domain
//! entities. Driver errors never cross the boundary raw; they are wrapped
//! into `DomainError::Database` with enough context to diagnose.

use sqlx::mysql::MySqlRow;
use sqlx::Row;
use uuid::Uuid;

use td_core::errors::DomainError;

pub mod conversation_repository;
pub mod pending_registration_repository;
pub mod user_repository;
pub mod verification_code_repository;

pub use conversation_repository::MySqlConversationRepository;
pub use pending_registration_repository::MySqlPendingRegistrationRepository;
pub use user_repository::MySqlUserRepository;
pub use verification_code_repository::MySqlVerificationCodeRepository;

/// Read a column, wrapping decode failures as database errors
pub(crate) fn column<T>(row: &MySqlRow, name: &str) -> Result<T, DomainError>
where
    T: for<'r> sqlx::Decode<'r, sqlx::MySql> + sqlx::Type<sqlx::MySql>,
{
    row.try_get(name).map_err(|e| DomainError::Database {
        message: format!("failed to read column {}: {}", name, e),
    })
}

/// Parse a CHAR(36) column back into a Uuid
pub(crate) fn parse_uuid(value: &str, column_name: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(value).map_err(|e| DomainError::Database {
        message: format!("invalid uuid in {}: {}", column_name, e),
    })
}

/// Wrap a driver error with the action that failed
pub(crate) fn db_error(action: &str, e: sqlx::Error) -> DomainError {
    DomainError::Database {
        message: format!("{}: {}", action, e),
    }
}
