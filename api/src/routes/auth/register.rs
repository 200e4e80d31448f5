//! Registration endpoints: start, verify, resend

use actix_web::{web, HttpResponse};
use tracing::info;
use validator::Validate;

use crate::dto::auth::{
    RegisterRequest, RegistrationCompleteResponse, RegistrationStartedResponse, ResendCodeRequest,
    VerifyRegistrationRequest,
};
use crate::handlers::error::{domain_error_response, validation_error_response};
use crate::state::AppState;

use td_core::services::registration::RegistrationSubmission;
use td_shared::phone::mask_phone_number;

/// Handler for POST /api/v1/auth/register
///
/// Validates the submission, parks it as a pending registration and sends
/// a verification code to the phone. No account exists until the code is
/// verified.
pub async fn register(
    state: web::Data<AppState>,
    payload: web::Json<RegisterRequest>,
) -> HttpResponse {
    if let Err(errors) = payload.validate() {
        return validation_error_response(&errors);
    }

    let request = payload.into_inner();
    info!(phone = %mask_phone_number(&request.phone), "registration requested");

    let submission = RegistrationSubmission {
        phone: request.phone,
        password: request.password,
        national_id: request.national_id,
        reference_number: request.reference_number,
        full_name: request.full_name,
        category: request.category,
        role: request.role,
        wilaya: request.wilaya,
        moughataa: request.moughataa,
        school: request.school,
        new_school: request.new_school,
    };

    match state.registration.start_registration(submission).await {
        Ok(started) => HttpResponse::Ok().json(RegistrationStartedResponse {
            message: "verification code sent".to_string(),
            phone: started.phone,
            code_expires_at: started.code_expires_at,
        }),
        Err(error) => domain_error_response(&error),
    }
}

/// Handler for POST /api/v1/auth/register/verify
///
/// Consumes the delivered code and promotes the pending registration to a
/// verified account.
pub async fn verify(
    state: web::Data<AppState>,
    payload: web::Json<VerifyRegistrationRequest>,
) -> HttpResponse {
    if let Err(errors) = payload.validate() {
        return validation_error_response(&errors);
    }

    info!(phone = %mask_phone_number(&payload.phone), "registration verification attempt");

    match state
        .registration
        .complete_registration(&payload.phone, &payload.code)
        .await
    {
        Ok(user) => HttpResponse::Created().json(RegistrationCompleteResponse {
            message: "account created".to_string(),
            user,
        }),
        Err(error) => domain_error_response(&error),
    }
}

/// Handler for POST /api/v1/auth/register/resend
///
/// Issues a fresh code for an in-progress registration, superseding the
/// previous one.
pub async fn resend(
    state: web::Data<AppState>,
    payload: web::Json<ResendCodeRequest>,
) -> HttpResponse {
    if let Err(errors) = payload.validate() {
        return validation_error_response(&errors);
    }

    info!(phone = %mask_phone_number(&payload.phone), "verification code resend requested");

    match state.registration.resend_code(&payload.phone).await {
        Ok(started) => HttpResponse::Ok().json(RegistrationStartedResponse {
            message: "verification code sent".to_string(),
            phone: started.phone,
            code_expires_at: started.code_expires_at,
        }),
        Err(error) => domain_error_response(&error),
    }
}
