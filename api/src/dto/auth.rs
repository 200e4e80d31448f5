//! Registration, login and password-reset request/response bodies
//!
//! Request structs only cap field lengths; semantic validation (phone
//! ranges, category/role pairing, required fields) lives in the service
//! layer so a bad submission reports every problem at once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use td_core::domain::entities::User;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Mauritanian mobile number, 8 digits starting 2-4
    #[validate(length(max = 32))]
    pub phone: String,

    #[validate(length(max = 128))]
    pub password: String,

    /// National identification number
    #[validate(length(max = 64))]
    pub national_id: String,

    /// Staff reference number (matricule)
    #[validate(length(max = 64))]
    pub reference_number: String,

    #[validate(length(max = 255))]
    pub full_name: String,

    /// "professeur", "instituteur" or "direction"
    #[validate(length(max = 32))]
    pub category: String,

    /// Precise role within the category, e.g. "prof_1er_cycle"
    #[validate(length(max = 32))]
    pub role: String,

    #[validate(length(max = 128))]
    pub wilaya: String,

    #[validate(length(max = 128))]
    pub moughataa: String,

    #[validate(length(max = 255))]
    pub school: String,

    /// School was typed in rather than picked from the directory
    #[serde(default)]
    pub new_school: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyRegistrationRequest {
    #[validate(length(max = 32))]
    pub phone: String,

    /// Code received by SMS
    #[validate(length(max = 16))]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResendCodeRequest {
    #[validate(length(max = 32))]
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(max = 32))]
    pub phone: String,

    #[validate(length(max = 128))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutRequest {
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PasswordForgotRequest {
    #[validate(length(max = 32))]
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PasswordResetRequest {
    #[validate(length(max = 32))]
    pub phone: String,

    /// Code received by SMS
    #[validate(length(max = 16))]
    pub code: String,

    #[validate(length(max = 128))]
    pub new_password: String,
}

/// Returned when a verification code was issued and sent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationStartedResponse {
    pub message: String,

    /// Normalized phone the code was sent to
    pub phone: String,

    /// When the delivered code stops being accepted
    pub code_expires_at: DateTime<Utc>,
}

/// Returned once a pending registration is promoted to an account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationCompleteResponse {
    pub message: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: User,
}

/// Plain acknowledgement for endpoints with no payload to return
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
