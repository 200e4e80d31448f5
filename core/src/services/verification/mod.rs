//! Verification code workflow
//!
//! One-time SMS codes for registration and password reset: issuance with
//! supersede-on-reissue, attempt-tracked consumption, and delivery through
//! a pluggable gateway.

mod service;
mod traits;
mod types;

#[cfg(test)]
pub(crate) mod tests;

pub use service::VerificationService;
pub use traits::SmsGateway;
pub use types::CodeDelivery;
