//! Input and result types for the registration flow

use chrono::{DateTime, Utc};

/// Raw registration form as submitted by the client
///
/// Category and role arrive as strings and are parsed during validation so
/// an unknown value surfaces as a field error alongside the others.
#[derive(Debug, Clone)]
pub struct RegistrationSubmission {
    pub phone: String,
    pub password: String,
    pub national_id: String,
    pub reference_number: String,
    pub full_name: String,
    pub category: String,
    pub role: String,
    pub wilaya: String,
    pub moughataa: String,
    pub school: String,
    pub new_school: bool,
}

/// Outcome of starting or re-sending a registration
#[derive(Debug, Clone)]
pub struct RegistrationStarted {
    /// Normalized phone the code was sent to
    pub phone: String,
    /// When the delivered code stops being accepted
    pub code_expires_at: DateTime<Utc>,
}
