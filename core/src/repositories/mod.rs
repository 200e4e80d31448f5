//! Repository interfaces for the persistence layer
//!
//! Each submodule defines an async trait the infra crate implements against
//! MySQL, plus an in-memory mock used by service tests.

pub mod conversation;
pub mod pending_registration;
pub mod user;
pub mod verification_code;

pub use conversation::ConversationRepository;
pub use pending_registration::PendingRegistrationRepository;
pub use user::UserRepository;
pub use verification_code::VerificationCodeRepository;

#[cfg(any(test, feature = "mock-services"))]
pub use conversation::MockConversationRepository;
#[cfg(any(test, feature = "mock-services"))]
pub use pending_registration::MockPendingRegistrationRepository;
#[cfg(any(test, feature = "mock-services"))]
pub use user::MockUserRepository;
#[cfg(any(test, feature = "mock-services"))]
pub use verification_code::MockVerificationCodeRepository;
