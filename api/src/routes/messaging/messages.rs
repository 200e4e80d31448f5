//! Message sending and history endpoints

use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use crate::dto::messaging::{MessagesResponse, SendMessageRequest, UserIdQuery};
use crate::handlers::error::{domain_error_response, validation_error_response};
use crate::state::AppState;

/// Handler for POST /api/v1/messages
///
/// Sends a message, creating the pair's conversation on first contact.
pub async fn send_message(
    state: web::Data<AppState>,
    payload: web::Json<SendMessageRequest>,
) -> HttpResponse {
    if let Err(errors) = payload.validate() {
        return validation_error_response(&errors);
    }

    match state
        .messaging
        .send_message(payload.sender_id, payload.recipient_id, &payload.content)
        .await
    {
        Ok(message) => HttpResponse::Created().json(message),
        Err(error) => domain_error_response(&error),
    }
}

/// Handler for GET /api/v1/conversations/{conversation_id}/messages
///
/// Returns the conversation's messages oldest first, for the participant
/// named in `user_id`. Fetching doubles as the read receipt: the other
/// participant's unread messages are marked read, while the returned rows
/// still show their pre-fetch read state.
pub async fn list_messages(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<UserIdQuery>,
) -> HttpResponse {
    match state
        .messaging
        .list_messages(path.into_inner(), query.user_id)
        .await
    {
        Ok(messages) => HttpResponse::Ok().json(MessagesResponse { messages }),
        Err(error) => domain_error_response(&error),
    }
}
