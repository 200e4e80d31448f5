//! Startup schema bootstrap
//!
//! Creates the tables the repositories expect if they are missing. Every
//! statement is `CREATE TABLE IF NOT EXISTS`, so running this on every
//! startup is safe and an already-provisioned database is left untouched.

use sqlx::MySqlPool;

use crate::InfrastructureError;

const CREATE_USERS: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id               CHAR(36)     NOT NULL,
        phone            VARCHAR(8)   NOT NULL,
        national_id      VARCHAR(64)  NOT NULL,
        reference_number VARCHAR(64)  NOT NULL,
        full_name        VARCHAR(255) NOT NULL,
        password_hash    VARCHAR(255) NOT NULL,
        category         VARCHAR(16)  NOT NULL,
        role             VARCHAR(32)  NOT NULL,
        wilaya           VARCHAR(128) NOT NULL,
        moughataa        VARCHAR(128) NOT NULL,
        school           VARCHAR(255) NOT NULL,
        new_school       BOOLEAN      NOT NULL DEFAULT FALSE,
        is_verified      BOOLEAN      NOT NULL DEFAULT FALSE,
        is_online        BOOLEAN      NOT NULL DEFAULT FALSE,
        last_seen        DATETIME(6)  NULL,
        created_at       DATETIME(6)  NOT NULL,
        updated_at       DATETIME(6)  NOT NULL,
        PRIMARY KEY (id),
        UNIQUE KEY uq_users_phone (phone),
        UNIQUE KEY uq_users_national_id (national_id),
        UNIQUE KEY uq_users_reference_number (reference_number)
    )
"#;

const CREATE_VERIFICATION_CODES: &str = r#"
    CREATE TABLE IF NOT EXISTS verification_codes (
        id            CHAR(36)    NOT NULL,
        phone         VARCHAR(8)  NOT NULL,
        code          CHAR(6)     NOT NULL,
        purpose       VARCHAR(16) NOT NULL,
        attempt_count INT UNSIGNED NOT NULL DEFAULT 0,
        is_used       BOOLEAN     NOT NULL DEFAULT FALSE,
        created_at    DATETIME(6) NOT NULL,
        expires_at    DATETIME(6) NOT NULL,
        PRIMARY KEY (id),
        KEY idx_codes_phone_purpose (phone, purpose)
    )
"#;

const CREATE_PENDING_REGISTRATIONS: &str = r#"
    CREATE TABLE IF NOT EXISTS pending_registrations (
        phone            VARCHAR(8)   NOT NULL,
        national_id      VARCHAR(64)  NOT NULL,
        reference_number VARCHAR(64)  NOT NULL,
        full_name        VARCHAR(255) NOT NULL,
        password_hash    VARCHAR(255) NOT NULL,
        category         VARCHAR(16)  NOT NULL,
        role             VARCHAR(32)  NOT NULL,
        wilaya           VARCHAR(128) NOT NULL,
        moughataa        VARCHAR(128) NOT NULL,
        school           VARCHAR(255) NOT NULL,
        new_school       BOOLEAN      NOT NULL DEFAULT FALSE,
        created_at       DATETIME(6)  NOT NULL,
        expires_at       DATETIME(6)  NOT NULL,
        PRIMARY KEY (phone)
    )
"#;

const CREATE_CONVERSATIONS: &str = r#"
    CREATE TABLE IF NOT EXISTS conversations (
        id               CHAR(36)    NOT NULL,
        participant_low  CHAR(36)    NOT NULL,
        participant_high CHAR(36)    NOT NULL,
        last_message_id  CHAR(36)    NULL,
        created_at       DATETIME(6) NOT NULL,
        updated_at       DATETIME(6) NOT NULL,
        PRIMARY KEY (id),
        UNIQUE KEY uq_conversations_pair (participant_low, participant_high)
    )
"#;

const CREATE_MESSAGES: &str = r#"
    CREATE TABLE IF NOT EXISTS messages (
        id              CHAR(36)    NOT NULL,
        conversation_id CHAR(36)    NOT NULL,
        sender_id       CHAR(36)    NOT NULL,
        content         TEXT        NOT NULL,
        is_read         BOOLEAN     NOT NULL DEFAULT FALSE,
        created_at      DATETIME(6) NOT NULL,
        PRIMARY KEY (id),
        KEY idx_messages_conversation_time (conversation_id, created_at),
        KEY idx_messages_unread (conversation_id, sender_id, is_read),
        CONSTRAINT fk_messages_conversation
            FOREIGN KEY (conversation_id) REFERENCES conversations (id),
        CONSTRAINT fk_messages_sender
            FOREIGN KEY (sender_id) REFERENCES users (id)
    )
"#;

/// Create any missing tables
///
/// Tables referenced by foreign keys are created before their dependents.
pub async fn ensure_schema(pool: &MySqlPool) -> Result<(), InfrastructureError> {
    let statements = [
        ("users", CREATE_USERS),
        ("verification_codes", CREATE_VERIFICATION_CODES),
        ("pending_registrations", CREATE_PENDING_REGISTRATIONS),
        ("conversations", CREATE_CONVERSATIONS),
        ("messages", CREATE_MESSAGES),
    ];

    for (table, statement) in statements {
        sqlx::query(statement).execute(pool).await.map_err(|e| {
            tracing::error!(table = table, "schema bootstrap failed: {}", e);
            InfrastructureError::Database(e)
        })?;
    }

    tracing::info!("database schema verified");
    Ok(())
}
