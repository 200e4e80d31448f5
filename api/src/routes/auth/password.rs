//! Password-reset endpoints

use actix_web::{web, HttpResponse};
use tracing::info;
use validator::Validate;

use crate::dto::auth::{MessageResponse, PasswordForgotRequest, PasswordResetRequest};
use crate::handlers::error::{domain_error_response, validation_error_response};
use crate::state::AppState;

use td_shared::phone::mask_phone_number;

/// Handler for POST /api/v1/auth/password/forgot
///
/// Sends a reset code to the phone if an account exists for it.
pub async fn forgot(
    state: web::Data<AppState>,
    payload: web::Json<PasswordForgotRequest>,
) -> HttpResponse {
    if let Err(errors) = payload.validate() {
        return validation_error_response(&errors);
    }

    info!(phone = %mask_phone_number(&payload.phone), "password reset requested");

    match state.auth.request_password_reset(&payload.phone).await {
        Ok(()) => HttpResponse::Ok().json(MessageResponse {
            message: "password reset code sent".to_string(),
        }),
        Err(error) => domain_error_response(&error),
    }
}

/// Handler for POST /api/v1/auth/password/reset
///
/// Consumes the reset code and stores the new password.
pub async fn reset(
    state: web::Data<AppState>,
    payload: web::Json<PasswordResetRequest>,
) -> HttpResponse {
    if let Err(errors) = payload.validate() {
        return validation_error_response(&errors);
    }

    info!(phone = %mask_phone_number(&payload.phone), "password reset attempt");

    match state
        .auth
        .complete_password_reset(&payload.phone, &payload.code, &payload.new_password)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(MessageResponse {
            message: "password updated".to_string(),
        }),
        Err(error) => domain_error_response(&error),
    }
}
