//! Translation of domain errors into HTTP responses
//!
//! Every failing endpoint renders through `domain_error_response`, so error
//! codes, bodies and status mapping stay consistent across the whole API.

use actix_web::{http::StatusCode, HttpResponse};
use std::collections::HashMap;
use td_core::errors::{AuthError, DomainError, VerificationError};
use tracing::{error, warn};

use crate::dto::ErrorResponse;

/// Map a domain error onto a status code and error body
pub fn domain_error_response(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Validation(errors) => {
            ErrorResponse::new("validation_error", "one or more fields are invalid")
                .with_details(errors.to_field_errors())
                .to_response(StatusCode::BAD_REQUEST)
        }

        DomainError::Duplicate { .. } => {
            ErrorResponse::new("duplicate_account", error.to_string())
                .to_response(StatusCode::CONFLICT)
        }

        // UserNotFound and BadPassword render identically so a response
        // never reveals whether a phone number has an account.
        DomainError::Auth(AuthError::UserNotFound) | DomainError::Auth(AuthError::BadPassword) => {
            ErrorResponse::new("invalid_credentials", "phone or password is incorrect")
                .to_response(StatusCode::UNAUTHORIZED)
        }

        DomainError::Auth(AuthError::Unverified) => {
            ErrorResponse::new("account_unverified", error.to_string())
                .to_response(StatusCode::FORBIDDEN)
        }

        DomainError::Verification(verification) => verification_error_response(verification),

        DomainError::Forbidden { .. } => ErrorResponse::new("forbidden", error.to_string())
            .to_response(StatusCode::FORBIDDEN),

        DomainError::NotFound { .. } => ErrorResponse::new("not_found", error.to_string())
            .to_response(StatusCode::NOT_FOUND),

        DomainError::Delivery(delivery) => {
            warn!(error = %delivery, "sms delivery failed");
            ErrorResponse::new(
                "sms_unavailable",
                "the verification code could not be sent, try again later",
            )
            .to_response(StatusCode::SERVICE_UNAVAILABLE)
        }

        DomainError::Database { .. } | DomainError::Internal { .. } => {
            error!(error = %error, "request failed with an internal error");
            ErrorResponse::new("internal_error", "an internal error occurred")
                .to_response(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

fn verification_error_response(error: &VerificationError) -> HttpResponse {
    let (status, code) = match error {
        VerificationError::NoActiveCode => (StatusCode::BAD_REQUEST, "no_active_code"),
        VerificationError::Expired => (StatusCode::BAD_REQUEST, "code_expired"),
        VerificationError::Mismatch { .. } => (StatusCode::BAD_REQUEST, "code_mismatch"),
        VerificationError::TooManyAttempts => (StatusCode::TOO_MANY_REQUESTS, "too_many_attempts"),
    };
    ErrorResponse::new(code, error.to_string()).to_response(status)
}

/// Map request-body validation failures onto the same body shape
///
/// Field caps checked at the DTO boundary report under the same
/// `validation_error` code the service-level checks use.
pub fn validation_error_response(errors: &validator::ValidationErrors) -> HttpResponse {
    let details: HashMap<String, Vec<String>> = errors
        .field_errors()
        .into_iter()
        .map(|(field, field_errors)| {
            (
                field.to_string(),
                field_errors.iter().map(|e| e.code.to_string()).collect(),
            )
        })
        .collect();

    ErrorResponse::new("validation_error", "one or more fields are invalid")
        .with_details(details)
        .to_response(StatusCode::BAD_REQUEST)
}
