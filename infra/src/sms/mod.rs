//! Outbound SMS delivery
//!
//! Two gateways behind the core `SmsGateway` trait: an HTTP provider client
//! for production and a console mock for development. The factory picks one
//! from configuration.

pub mod http_gateway;
pub mod mock_gateway;

pub use http_gateway::HttpSmsGateway;
pub use mock_gateway::MockSmsGateway;

use std::sync::Arc;

use td_core::services::verification::SmsGateway;
use td_shared::config::sms::{SmsConfig, SmsProvider};

use crate::InfrastructureError;

/// Build the configured SMS gateway
pub fn create_sms_gateway(config: &SmsConfig) -> Result<Arc<dyn SmsGateway>, InfrastructureError> {
    match config.provider {
        SmsProvider::Mock => {
            tracing::info!("using mock sms gateway");
            Ok(Arc::new(MockSmsGateway::new()))
        }
        SmsProvider::Http => {
            tracing::info!(api_url = %config.api_url, "using http sms gateway");
            Ok(Arc::new(HttpSmsGateway::new(config)?))
        }
    }
}
