//! SMS delivery configuration module

use serde::{Deserialize, Serialize};

/// Which SMS gateway implementation to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SmsProvider {
    /// Console-only gateway for development and tests
    Mock,
    /// HTTP provider (JSON POST with bearer key)
    Http,
}

impl Default for SmsProvider {
    fn default() -> Self {
        SmsProvider::Mock
    }
}

impl std::str::FromStr for SmsProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mock" | "console" => Ok(SmsProvider::Mock),
            "http" => Ok(SmsProvider::Http),
            _ => Err(format!("Invalid SMS provider: {}", s)),
        }
    }
}

/// SMS gateway configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmsConfig {
    /// Gateway implementation to use
    #[serde(default)]
    pub provider: SmsProvider,

    /// Provider endpoint for the HTTP gateway
    #[serde(default)]
    pub api_url: String,

    /// Provider API key for the HTTP gateway
    #[serde(default)]
    pub api_key: String,

    /// Sender name shown to the recipient
    #[serde(default = "default_sender_name")]
    pub sender_name: String,

    /// Upper bound on a single delivery attempt, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            provider: SmsProvider::default(),
            api_url: String::new(),
            api_key: String::new(),
            sender_name: default_sender_name(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SmsConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let provider = std::env::var("SMS_PROVIDER")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();
        let api_url = std::env::var("SMS_API_URL").unwrap_or_default();
        let api_key = std::env::var("SMS_API_KEY").unwrap_or_default();
        let sender_name = std::env::var("SMS_SENDER_NAME").unwrap_or_else(|_| default_sender_name());
        let timeout_secs = std::env::var("SMS_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_timeout_secs);

        Self {
            provider,
            api_url,
            api_key,
            sender_name,
            timeout_secs,
        }
    }
}

fn default_sender_name() -> String {
    "Tedris".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}
