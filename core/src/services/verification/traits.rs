//! Delivery trait for outbound verification SMS

use async_trait::async_trait;

use crate::errors::DeliveryError;

/// Outbound SMS delivery
///
/// Implementations live in the infra crate: an HTTP provider client and a
/// console gateway for development. Delivery runs after the code is already
/// persisted, so a failure here never invalidates an issued code.
#[async_trait]
pub trait SmsGateway: Send + Sync {
    /// Deliver `body` to `phone`, returning the provider's message id
    async fn deliver(&self, phone: &str, body: &str) -> Result<String, DeliveryError>;
}
