//! HTTP SMS provider client

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use td_core::errors::DeliveryError;
use td_core::services::verification::SmsGateway;
use td_shared::config::sms::SmsConfig;
use td_shared::utils::phone::mask_phone_number;

use crate::InfrastructureError;

/// Outbound message as the provider expects it
#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    to: &'a str,
    sender: &'a str,
    message: &'a str,
}

/// Provider acknowledgement
#[derive(Debug, Deserialize)]
struct SendResponse {
    message_id: Option<String>,
}

/// SMS delivery over the provider's HTTP API
///
/// One JSON POST per message, authenticated with a bearer key. The request
/// timeout is bounded by `SmsConfig::timeout_secs`; a timed-out delivery is
/// reported as such so the caller can choose to resend.
pub struct HttpSmsGateway {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    sender_name: String,
    timeout_secs: u64,
}

impl HttpSmsGateway {
    /// Build a gateway from SMS configuration
    pub fn new(config: &SmsConfig) -> Result<Self, InfrastructureError> {
        if config.api_url.is_empty() {
            return Err(InfrastructureError::Config(
                "SMS_API_URL must be set for the http sms provider".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(InfrastructureError::Http)?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            sender_name: config.sender_name.clone(),
            timeout_secs: config.timeout_secs,
        })
    }
}

#[async_trait]
impl SmsGateway for HttpSmsGateway {
    async fn deliver(&self, phone: &str, body: &str) -> Result<String, DeliveryError> {
        let request = SendRequest {
            to: phone,
            sender: &self.sender_name,
            message: body,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DeliveryError::Timeout {
                        timeout_secs: self.timeout_secs,
                    }
                } else {
                    DeliveryError::Transport {
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            error!(
                phone = %mask_phone_number(phone),
                status = %status,
                "sms provider rejected the message"
            );
            return Err(DeliveryError::Rejected {
                reason: format!("HTTP {}: {}", status, detail),
            });
        }

        let ack: SendResponse = response.json().await.map_err(|e| DeliveryError::Transport {
            message: format!("invalid provider response: {}", e),
        })?;

        let message_id = ack.message_id.ok_or_else(|| DeliveryError::Transport {
            message: "provider response missing message_id".to_string(),
        })?;

        info!(
            phone = %mask_phone_number(phone),
            message_id = %message_id,
            "sms accepted by provider"
        );

        Ok(message_id)
    }
}
