//! MySQL persistence
//!
//! Pool construction, startup schema bootstrap and the SQLx-backed
//! implementations of the core repository traits.

pub mod connection;
pub mod repositories;
pub mod schema;

pub use connection::DatabasePool;
pub use repositories::{
    MySqlConversationRepository, MySqlPendingRegistrationRepository, MySqlUserRepository,
    MySqlVerificationCodeRepository,
};
