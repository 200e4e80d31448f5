//! Conversation and message repository interface

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::conversation::{Conversation, ConversationSummary};
use crate::domain::entities::message::Message;
use crate::errors::DomainError;

#[cfg(any(test, feature = "mock-services"))]
pub mod mock;

#[cfg(any(test, feature = "mock-services"))]
pub use mock::MockConversationRepository;

/// Storage for one-to-one conversations and their messages
///
/// Participants are stored as a canonical ordered pair, so the same two
/// users always map to the same conversation row no matter who reached
/// out first.
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Return the conversation between two users, creating it if absent
    ///
    /// Symmetric in its arguments: `find_or_create(a, b)` and
    /// `find_or_create(b, a)` yield the same conversation, including under
    /// concurrent first contact.
    async fn find_or_create(&self, a: Uuid, b: Uuid) -> Result<Conversation, DomainError>;

    /// Fetch a conversation by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Conversation>, DomainError>;

    /// Append a message and advance the conversation's last-message pointer
    /// in the same atomic step
    async fn append_message(
        &self,
        conversation_id: Uuid,
        sender_id: Uuid,
        content: &str,
    ) -> Result<Message, DomainError>;

    /// List a user's conversations as summaries, most recently active first
    async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ConversationSummary>, DomainError>;

    /// Fetch a conversation's messages in send order and mark every message
    /// from the other participant as read
    ///
    /// The returned snapshot reflects read state as it was before the mark,
    /// so callers can tell which messages this fetch consumed.
    async fn fetch_messages_marking_read(
        &self,
        conversation_id: Uuid,
        reader_id: Uuid,
    ) -> Result<Vec<Message>, DomainError>;
}
