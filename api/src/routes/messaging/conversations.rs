//! Conversation listing endpoint

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::dto::messaging::ConversationsResponse;
use crate::handlers::error::domain_error_response;
use crate::state::AppState;

/// Handler for GET /api/v1/users/{user_id}/conversations
///
/// Lists the user's conversations, most recently active first, each with
/// the other participant, the last message and the unread count.
pub async fn list_conversations(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> HttpResponse {
    let user_id = path.into_inner();

    match state.messaging.list_conversations(user_id).await {
        Ok(conversations) => HttpResponse::Ok().json(ConversationsResponse { conversations }),
        Err(error) => domain_error_response(&error),
    }
}
