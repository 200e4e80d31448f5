//! Shared utilities and common types for the Tedris server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types
//! - Utility functions (phone validation, field-level validation)

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{AppConfig, CorsConfig, DatabaseConfig, Environment, ServerConfig, SmsConfig};
pub use utils::{phone, validation};
