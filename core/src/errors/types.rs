//! Domain-specific error types for the authentication, verification, and
//! messaging operations
//!
//! Each variant carries the structure a caller needs to render its own
//! user-facing message; the core never formats presentation text.

use thiserror::Error;

/// Authentication failures surfaced by the credential checks
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("no account registered for this phone")]
    UserNotFound,

    #[error("password does not match")]
    BadPassword,

    #[error("account has not completed phone verification")]
    Unverified,
}

/// Verification-code failures, in the order `consume` evaluates them
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationError {
    #[error("no active verification code for this phone and purpose")]
    NoActiveCode,

    #[error("verification code expired")]
    Expired,

    #[error("too many failed attempts, request a new code")]
    TooManyAttempts,

    #[error("verification code does not match ({remaining} attempts remaining)")]
    Mismatch { remaining: u32 },
}

/// SMS delivery failures
///
/// Non-fatal to ledger state: an issued code stays valid when delivery
/// fails, so the caller can resend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("sms delivery timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("sms provider rejected the message: {reason}")]
    Rejected { reason: String },

    #[error("sms transport error: {message}")]
    Transport { message: String },
}

/// The unique column a duplicate registration collided on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateField {
    Phone,
    NationalId,
    ReferenceNumber,
}

impl DuplicateField {
    /// Stable field name as used in API payloads and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            DuplicateField::Phone => "phone",
            DuplicateField::NationalId => "national_id",
            DuplicateField::ReferenceNumber => "reference_number",
        }
    }
}

impl std::fmt::Display for DuplicateField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
