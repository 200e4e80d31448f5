//! Shared application state

use std::sync::Arc;

use td_core::services::auth::AuthService;
use td_core::services::messaging::MessagingService;
use td_core::services::registration::RegistrationService;

/// Service handles shared across workers
///
/// Everything inside is an `Arc`, so cloning the state per worker is cheap.
#[derive(Clone)]
pub struct AppState {
    pub registration: Arc<RegistrationService>,
    pub auth: Arc<AuthService>,
    pub messaging: Arc<MessagingService>,
}

impl AppState {
    /// Bundle the three domain services
    pub fn new(
        registration: Arc<RegistrationService>,
        auth: Arc<AuthService>,
        messaging: Arc<MessagingService>,
    ) -> Self {
        Self {
            registration,
            auth,
            messaging,
        }
    }
}
