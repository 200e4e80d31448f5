//! Login and logout endpoints

use actix_web::{web, HttpResponse};
use tracing::info;
use validator::Validate;

use crate::dto::auth::{LoginRequest, LoginResponse, LogoutRequest, MessageResponse};
use crate::handlers::error::{domain_error_response, validation_error_response};
use crate::state::AppState;

use td_shared::phone::mask_phone_number;

/// Handler for POST /api/v1/auth/login
pub async fn login(state: web::Data<AppState>, payload: web::Json<LoginRequest>) -> HttpResponse {
    if let Err(errors) = payload.validate() {
        return validation_error_response(&errors);
    }

    info!(phone = %mask_phone_number(&payload.phone), "login attempt");

    match state.auth.login(&payload.phone, &payload.password).await {
        Ok(user) => HttpResponse::Ok().json(LoginResponse {
            message: "login successful".to_string(),
            user,
        }),
        Err(error) => domain_error_response(&error),
    }
}

/// Handler for POST /api/v1/auth/logout
///
/// Marks the user offline and stamps last_seen.
pub async fn logout(
    state: web::Data<AppState>,
    payload: web::Json<LogoutRequest>,
) -> HttpResponse {
    match state.auth.logout(payload.user_id).await {
        Ok(()) => HttpResponse::Ok().json(MessageResponse {
            message: "logged out".to_string(),
        }),
        Err(error) => domain_error_response(&error),
    }
}
