//! Authentication flows
//!
//! Phone + password login, presence on login/logout, and the two-step
//! password reset backed by SMS verification codes.

mod config;
mod service;
mod traits;

#[cfg(test)]
pub(crate) mod tests;

pub use config::AuthServiceConfig;
pub use service::{AuthService, MIN_PASSWORD_LENGTH};
pub use traits::PasswordHasher;
