//! Domain entities representing core business objects.

pub mod conversation;
pub mod message;
pub mod pending_registration;
pub mod user;
pub mod verification_code;

// Re-export commonly used types
pub use conversation::{canonical_pair, Conversation, ConversationSummary};
pub use message::Message;
pub use pending_registration::{PendingRegistration, PENDING_TTL_MINUTES};
pub use user::{SpecificRole, User, UserCategory, UserProfile};
pub use verification_code::{
    CodePurpose, VerificationCode, CODE_LENGTH, CODE_MAX, CODE_MIN, CODE_TTL_MINUTES, MAX_ATTEMPTS,
};
