//! Direct messaging between registered users

use std::sync::Arc;

use td_shared::utils::validation::{validators, ValidationErrors};
use tracing::info;
use uuid::Uuid;

use crate::domain::entities::conversation::ConversationSummary;
use crate::domain::entities::message::Message;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{ConversationRepository, UserRepository};

/// One-to-one messaging over lazily created conversations
pub struct MessagingService {
    conversations: Arc<dyn ConversationRepository>,
    users: Arc<dyn UserRepository>,
}

impl MessagingService {
    /// Create a new messaging service
    pub fn new(
        conversations: Arc<dyn ConversationRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            conversations,
            users,
        }
    }

    /// Send a message, creating the pair's conversation on first contact
    pub async fn send_message(
        &self,
        sender_id: Uuid,
        recipient_id: Uuid,
        content: &str,
    ) -> DomainResult<Message> {
        let content = content.trim();

        let mut errors = ValidationErrors::new();
        if !validators::not_empty(content) {
            errors.add_error("content", "must not be empty", "required");
        }
        if sender_id == recipient_id {
            errors.add_error(
                "recipient_id",
                "cannot be the same as the sender",
                "self_message",
            );
        }
        errors.into_result()?;

        if self.users.find_by_id(sender_id).await?.is_none() {
            return Err(ValidationErrors::single(
                "sender_id",
                "is not a known user",
                "unknown_sender",
            )
            .into());
        }
        if self.users.find_by_id(recipient_id).await?.is_none() {
            return Err(DomainError::not_found("recipient"));
        }

        let conversation = self
            .conversations
            .find_or_create(sender_id, recipient_id)
            .await?;
        let message = self
            .conversations
            .append_message(conversation.id, sender_id, content)
            .await?;

        info!(
            conversation_id = %conversation.id,
            message_id = %message.id,
            "message sent"
        );
        Ok(message)
    }

    /// List a user's conversations, most recently active first
    pub async fn list_conversations(
        &self,
        user_id: Uuid,
    ) -> DomainResult<Vec<ConversationSummary>> {
        self.conversations.list_for_user(user_id).await
    }

    /// Fetch a conversation's messages for one of its participants
    ///
    /// Fetching is also the read receipt: every message from the other
    /// participant is marked read before this returns. The returned rows
    /// still carry the pre-fetch read state.
    pub async fn list_messages(
        &self,
        conversation_id: Uuid,
        requesting_user: Uuid,
    ) -> DomainResult<Vec<Message>> {
        let conversation = self
            .conversations
            .find_by_id(conversation_id)
            .await?
            .ok_or_else(|| DomainError::not_found("conversation"))?;

        if !conversation.involves(requesting_user) {
            return Err(DomainError::forbidden("conversation"));
        }

        self.conversations
            .fetch_messages_marking_read(conversation_id, requesting_user)
            .await
    }
}
