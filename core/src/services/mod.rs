//! Business services containing domain logic and use cases.

pub mod auth;
pub mod messaging;
pub mod registration;
pub mod verification;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig, PasswordHasher, MIN_PASSWORD_LENGTH};
pub use messaging::MessagingService;
pub use registration::{RegistrationService, RegistrationStarted, RegistrationSubmission};
pub use verification::{CodeDelivery, SmsGateway, VerificationService};
