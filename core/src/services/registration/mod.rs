//! Registration flow
//!
//! Submissions are validated in full, parked pending phone verification,
//! and promoted to verified accounts when the SMS code is consumed.

mod service;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use service::RegistrationService;
pub use types::{RegistrationStarted, RegistrationSubmission};
pub use validation::validate_submission;
