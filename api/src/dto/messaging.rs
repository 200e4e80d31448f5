//! Direct-messaging request/response bodies

use serde::{Deserialize, Serialize};
use td_core::domain::entities::{ConversationSummary, Message};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendMessageRequest {
    pub sender_id: Uuid,
    pub recipient_id: Uuid,

    /// Message body; emptiness is checked by the service after trimming
    #[validate(length(max = 4000))]
    pub content: String,
}

/// Identifies the requesting participant on read endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationsResponse {
    pub conversations: Vec<ConversationSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesResponse {
    pub messages: Vec<Message>,
}
