//! Messaging between members
//!
//! One conversation per unordered pair of users, an append-only message
//! log, and fetch-as-read-receipt semantics.

mod service;

#[cfg(test)]
mod tests;

pub use service::MessagingService;
