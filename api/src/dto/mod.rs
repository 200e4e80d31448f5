//! Request and response bodies for the HTTP API

pub mod auth;
pub mod error;
pub mod messaging;

pub use error::ErrorResponse;
