//! Result types for the verification service

use crate::domain::entities::verification_code::VerificationCode;

/// An issued code together with the provider's delivery receipt
#[derive(Debug, Clone)]
pub struct CodeDelivery {
    /// The code as stored
    pub code: VerificationCode,
    /// The SMS provider's message id
    pub message_id: String,
}
