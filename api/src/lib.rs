//! HTTP API layer
//!
//! Thin actix-web handlers over the core services. Requests carry identity
//! explicitly in bodies and paths; responses are JSON, and every failure
//! goes through one domain-error mapper so status codes and machine codes
//! stay consistent across routes.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
