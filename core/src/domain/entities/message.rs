//! Message entity: one entry in a conversation's append-only log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A direct message
///
/// Append-only. `is_read` flips from false to true exactly once, through the
/// bulk mark-read that runs when the other participant fetches the
/// conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier for the message
    pub id: Uuid,

    /// Conversation this message belongs to
    pub conversation_id: Uuid,

    /// Author of the message; always one of the two participants
    pub sender_id: Uuid,

    /// Message text, non-empty
    pub content: String,

    /// Whether the other participant has fetched the conversation since
    /// this message was sent
    pub is_read: bool,

    /// Timestamp when the message was sent
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Creates a new unread message
    pub fn new(conversation_id: Uuid, sender_id: Uuid, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            conversation_id,
            sender_id,
            content,
            is_read: false,
            created_at: Utc::now(),
        }
    }
}
