//! Console-backed SMS gateway for development and testing

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use td_core::errors::DeliveryError;
use td_core::services::verification::SmsGateway;
use td_shared::utils::phone::mask_phone_number;

/// Mock SMS gateway
///
/// Prints messages to the console instead of sending them, counts
/// deliveries, and can be switched to fail on demand.
#[derive(Clone)]
pub struct MockSmsGateway {
    /// Number of messages delivered so far
    delivered: Arc<AtomicU64>,
    /// Whether to simulate delivery failures
    simulate_failure: bool,
    /// Whether to print messages to console
    console_output: bool,
}

impl MockSmsGateway {
    /// Create a new mock gateway that prints to the console
    pub fn new() -> Self {
        Self {
            delivered: Arc::new(AtomicU64::new(0)),
            simulate_failure: false,
            console_output: true,
        }
    }

    /// Create a mock gateway with explicit options
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            delivered: Arc::new(AtomicU64::new(0)),
            simulate_failure,
            console_output,
        }
    }

    /// Total number of messages delivered
    pub fn delivered_count(&self) -> u64 {
        self.delivered.load(Ordering::SeqCst)
    }
}

impl Default for MockSmsGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SmsGateway for MockSmsGateway {
    async fn deliver(&self, phone: &str, body: &str) -> Result<String, DeliveryError> {
        if self.simulate_failure {
            warn!(
                phone = %mask_phone_number(phone),
                "mock gateway simulating delivery failure"
            );
            return Err(DeliveryError::Rejected {
                reason: "simulated delivery failure".to_string(),
            });
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.delivered.fetch_add(1, Ordering::SeqCst) + 1;

        if self.console_output {
            println!("\n{}", "=".repeat(60));
            println!("MOCK SMS #{}", count);
            println!("{}", "=".repeat(60));
            println!("To: {}", phone);
            println!("Message: {}", body);
            println!("Message ID: {}", message_id);
            println!("{}\n", "=".repeat(60));
        }

        info!(
            phone = %mask_phone_number(phone),
            message_id = %message_id,
            "mock sms delivered"
        );

        Ok(message_id)
    }
}
