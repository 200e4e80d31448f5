//! Configuration for the authentication service

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Whether login requires a verified account
    ///
    /// On by default. Turning it off lets unverified accounts sign in,
    /// which is only useful in development environments.
    pub require_verified_login: bool,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            require_verified_login: true,
        }
    }
}
