//! Mock implementation of ConversationRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::conversation::{
    canonical_pair, Conversation, ConversationSummary,
};
use crate::domain::entities::message::Message;
use crate::errors::DomainError;

use super::ConversationRepository;

#[derive(Default)]
struct Inner {
    conversations: Vec<Conversation>,
    messages: Vec<Message>,
    // id -> (full_name, is_online), stands in for the users join
    participants: HashMap<Uuid, (String, bool)>,
}

/// In-memory conversation store
///
/// Carries a small participant directory in place of the users table so
/// summaries can resolve the other side's name and presence.
#[derive(Clone, Default)]
pub struct MockConversationRepository {
    inner: Arc<RwLock<Inner>>,
}

impl MockConversationRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a participant so summaries can name them
    pub async fn with_participant(self, id: Uuid, full_name: &str, is_online: bool) -> Self {
        self.inner
            .write()
            .await
            .participants
            .insert(id, (full_name.to_string(), is_online));
        self
    }

    /// Number of stored conversations
    pub async fn conversation_count(&self) -> usize {
        self.inner.read().await.conversations.len()
    }

    /// Number of stored messages
    pub async fn message_count(&self) -> usize {
        self.inner.read().await.messages.len()
    }

    /// Fetch a stored message for assertions
    pub async fn get_message(&self, id: Uuid) -> Option<Message> {
        self.inner
            .read()
            .await
            .messages
            .iter()
            .find(|m| m.id == id)
            .cloned()
    }

    fn sorted_messages_of(inner: &Inner, conversation_id: Uuid) -> Vec<Message> {
        let mut messages: Vec<Message> = inner
            .messages
            .iter()
            .filter(|m| m.conversation_id == conversation_id)
            .cloned()
            .collect();
        messages.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        messages
    }
}

#[async_trait]
impl ConversationRepository for MockConversationRepository {
    async fn find_or_create(&self, a: Uuid, b: Uuid) -> Result<Conversation, DomainError> {
        let mut inner = self.inner.write().await;
        let (low, high) = canonical_pair(a, b);
        if let Some(existing) = inner
            .conversations
            .iter()
            .find(|c| c.participant_low == low && c.participant_high == high)
        {
            return Ok(existing.clone());
        }
        let conversation = Conversation::new(a, b);
        inner.conversations.push(conversation.clone());
        Ok(conversation)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Conversation>, DomainError> {
        let inner = self.inner.read().await;
        Ok(inner.conversations.iter().find(|c| c.id == id).cloned())
    }

    async fn append_message(
        &self,
        conversation_id: Uuid,
        sender_id: Uuid,
        content: &str,
    ) -> Result<Message, DomainError> {
        let mut inner = self.inner.write().await;
        let conversation = inner
            .conversations
            .iter_mut()
            .find(|c| c.id == conversation_id)
            .ok_or_else(|| DomainError::not_found("conversation"))?;

        let message = Message::new(conversation_id, sender_id, content.to_string());
        conversation.touch(message.id, message.created_at);
        inner.messages.push(message.clone());
        Ok(message)
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ConversationSummary>, DomainError> {
        let inner = self.inner.read().await;
        let mut summaries = Vec::new();

        for conversation in inner.conversations.iter().filter(|c| c.involves(user_id)) {
            let other_id = conversation
                .other_participant(user_id)
                .ok_or_else(|| DomainError::not_found("conversation participant"))?;

            let (other_full_name, other_is_online) = inner
                .participants
                .get(&other_id)
                .cloned()
                .unwrap_or_else(|| (String::new(), false));

            let messages = Self::sorted_messages_of(&inner, conversation.id);
            let last = messages.last();
            let unread_count = messages
                .iter()
                .filter(|m| m.sender_id != user_id && !m.is_read)
                .count() as i64;

            summaries.push(ConversationSummary {
                conversation_id: conversation.id,
                other_user_id: other_id,
                other_full_name,
                other_is_online,
                last_message: last.map(|m| m.content.clone()).unwrap_or_default(),
                last_message_at: last.map(|m| m.created_at),
                unread_count,
                updated_at: conversation.updated_at,
            });
        }

        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(summaries)
    }

    async fn fetch_messages_marking_read(
        &self,
        conversation_id: Uuid,
        reader_id: Uuid,
    ) -> Result<Vec<Message>, DomainError> {
        let mut inner = self.inner.write().await;
        let snapshot = Self::sorted_messages_of(&inner, conversation_id);

        for message in inner
            .messages
            .iter_mut()
            .filter(|m| m.conversation_id == conversation_id && m.sender_id != reader_id)
        {
            message.is_read = true;
        }

        Ok(snapshot)
    }
}
