//! MySQL implementation of the conversation repository

use async_trait::async_trait;
use sqlx::MySqlPool;
use tracing::{debug, error};
use uuid::Uuid;

use td_core::domain::entities::conversation::{
    canonical_pair, Conversation, ConversationSummary,
};
use td_core::domain::entities::message::Message;
use td_core::errors::DomainError;
use td_core::repositories::ConversationRepository;

use super::{column, db_error, parse_uuid};

/// SQLx-backed conversation and message persistence
///
/// The one-conversation-per-pair invariant rests on the unique index over
/// `(participant_low, participant_high)`: a losing concurrent insert is
/// caught and resolved by re-reading the winner's row.
pub struct MySqlConversationRepository {
    pool: MySqlPool,
}

impl MySqlConversationRepository {
    /// Create a new MySQL conversation repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_conversation(row: &sqlx::mysql::MySqlRow) -> Result<Conversation, DomainError> {
        let id: String = column(row, "id")?;
        let low: String = column(row, "participant_low")?;
        let high: String = column(row, "participant_high")?;
        let last_message_id: Option<String> = column(row, "last_message_id")?;

        Ok(Conversation {
            id: parse_uuid(&id, "id")?,
            participant_low: parse_uuid(&low, "participant_low")?,
            participant_high: parse_uuid(&high, "participant_high")?,
            last_message_id: match last_message_id {
                Some(value) => Some(parse_uuid(&value, "last_message_id")?),
                None => None,
            },
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }

    fn row_to_message(row: &sqlx::mysql::MySqlRow) -> Result<Message, DomainError> {
        let id: String = column(row, "id")?;
        let conversation_id: String = column(row, "conversation_id")?;
        let sender_id: String = column(row, "sender_id")?;

        Ok(Message {
            id: parse_uuid(&id, "id")?,
            conversation_id: parse_uuid(&conversation_id, "conversation_id")?,
            sender_id: parse_uuid(&sender_id, "sender_id")?,
            content: column(row, "content")?,
            is_read: column(row, "is_read")?,
            created_at: column(row, "created_at")?,
        })
    }

    async fn find_by_pair(
        &self,
        low: Uuid,
        high: Uuid,
    ) -> Result<Option<Conversation>, DomainError> {
        let query = r#"
            SELECT id, participant_low, participant_high, last_message_id,
                   created_at, updated_at
            FROM conversations
            WHERE participant_low = ? AND participant_high = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(low.to_string())
            .bind(high.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("failed to query conversation by pair", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_conversation(&row)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl ConversationRepository for MySqlConversationRepository {
    async fn find_or_create(&self, a: Uuid, b: Uuid) -> Result<Conversation, DomainError> {
        let (low, high) = canonical_pair(a, b);

        if let Some(existing) = self.find_by_pair(low, high).await? {
            return Ok(existing);
        }

        let conversation = Conversation::new(a, b);
        let insert = r#"
            INSERT INTO conversations (
                id, participant_low, participant_high, last_message_id,
                created_at, updated_at
            ) VALUES (?, ?, ?, NULL, ?, ?)
        "#;

        let result = sqlx::query(insert)
            .bind(conversation.id.to_string())
            .bind(conversation.participant_low.to_string())
            .bind(conversation.participant_high.to_string())
            .bind(conversation.created_at)
            .bind(conversation.updated_at)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => {
                debug!(conversation_id = %conversation.id, "conversation created");
                Ok(conversation)
            }
            // A concurrent first contact between the same pair beat this
            // insert; the unique index guarantees their row is the one.
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => self
                .find_by_pair(low, high)
                .await?
                .ok_or_else(|| DomainError::Database {
                    message: "conversation vanished after duplicate-pair insert".to_string(),
                }),
            Err(e) => {
                error!(error = %e, "failed to create conversation");
                Err(db_error("failed to create conversation", e))
            }
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Conversation>, DomainError> {
        let query = r#"
            SELECT id, participant_low, participant_high, last_message_id,
                   created_at, updated_at
            FROM conversations
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("failed to query conversation by id", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_conversation(&row)?)),
            None => Ok(None),
        }
    }

    async fn append_message(
        &self,
        conversation_id: Uuid,
        sender_id: Uuid,
        content: &str,
    ) -> Result<Message, DomainError> {
        let message = Message::new(conversation_id, sender_id, content.to_string());

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("failed to begin message append", e))?;

        let insert = r#"
            INSERT INTO messages (
                id, conversation_id, sender_id, content, is_read, created_at
            ) VALUES (?, ?, ?, ?, ?, ?)
        "#;

        let inserted = sqlx::query(insert)
            .bind(message.id.to_string())
            .bind(message.conversation_id.to_string())
            .bind(message.sender_id.to_string())
            .bind(&message.content)
            .bind(message.is_read)
            .bind(message.created_at)
            .execute(&mut *tx)
            .await;

        if let Err(sqlx::Error::Database(e)) = &inserted {
            if e.is_foreign_key_violation() {
                return Err(DomainError::not_found("conversation"));
            }
        }
        inserted.map_err(|e| db_error("failed to store message", e))?;

        let pointer = r#"
            UPDATE conversations
            SET last_message_id = ?, updated_at = ?
            WHERE id = ?
        "#;

        let updated = sqlx::query(pointer)
            .bind(message.id.to_string())
            .bind(message.created_at)
            .bind(conversation_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("failed to advance last-message pointer", e))?;

        if updated.rows_affected() == 0 {
            return Err(DomainError::not_found("conversation"));
        }

        tx.commit()
            .await
            .map_err(|e| db_error("failed to commit message append", e))?;

        Ok(message)
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ConversationSummary>, DomainError> {
        let query = r#"
            SELECT c.id AS conversation_id,
                   u.id AS other_user_id,
                   u.full_name AS other_full_name,
                   u.is_online AS other_is_online,
                   COALESCE(m.content, '') AS last_message,
                   m.created_at AS last_message_at,
                   (SELECT COUNT(*)
                    FROM messages mm
                    WHERE mm.conversation_id = c.id
                      AND mm.sender_id <> ?
                      AND mm.is_read = FALSE) AS unread_count,
                   c.updated_at AS updated_at
            FROM conversations c
            JOIN users u
              ON u.id = IF(c.participant_low = ?, c.participant_high, c.participant_low)
            LEFT JOIN messages m ON m.id = c.last_message_id
            WHERE c.participant_low = ? OR c.participant_high = ?
            ORDER BY c.updated_at DESC
        "#;

        let id = user_id.to_string();
        let rows = sqlx::query(query)
            .bind(&id)
            .bind(&id)
            .bind(&id)
            .bind(&id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("failed to list conversations", e))?;

        let mut summaries = Vec::with_capacity(rows.len());
        for row in &rows {
            let conversation_id: String = column(row, "conversation_id")?;
            let other_user_id: String = column(row, "other_user_id")?;

            summaries.push(ConversationSummary {
                conversation_id: parse_uuid(&conversation_id, "conversation_id")?,
                other_user_id: parse_uuid(&other_user_id, "other_user_id")?,
                other_full_name: column(row, "other_full_name")?,
                other_is_online: column(row, "other_is_online")?,
                last_message: column(row, "last_message")?,
                last_message_at: column(row, "last_message_at")?,
                unread_count: column(row, "unread_count")?,
                updated_at: column(row, "updated_at")?,
            });
        }

        Ok(summaries)
    }

    async fn fetch_messages_marking_read(
        &self,
        conversation_id: Uuid,
        reader_id: Uuid,
    ) -> Result<Vec<Message>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("failed to begin message fetch", e))?;

        // Snapshot before marking, so callers still see which rows were
        // unread when they asked.
        let select = r#"
            SELECT id, conversation_id, sender_id, content, is_read, created_at
            FROM messages
            WHERE conversation_id = ?
            ORDER BY created_at ASC, id ASC
        "#;

        let rows = sqlx::query(select)
            .bind(conversation_id.to_string())
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| db_error("failed to fetch messages", e))?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in &rows {
            messages.push(Self::row_to_message(row)?);
        }

        sqlx::query(
            r#"
            UPDATE messages
            SET is_read = TRUE
            WHERE conversation_id = ? AND sender_id <> ? AND is_read = FALSE
            "#,
        )
        .bind(conversation_id.to_string())
        .bind(reader_id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("failed to mark messages read", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("failed to commit message fetch", e))?;

        Ok(messages)
    }
}
