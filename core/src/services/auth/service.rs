//! Login, logout and password reset flows

use std::sync::Arc;

use td_shared::utils::phone::{
    is_valid_mauritanian_mobile, mask_phone_number, normalize_phone_number,
};
use td_shared::utils::validation::{validators, ValidationErrors};
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::domain::entities::verification_code::CodePurpose;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::UserRepository;
use crate::services::verification::VerificationService;

use super::config::AuthServiceConfig;
use super::traits::PasswordHasher;

/// Minimum accepted password length, in characters
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Phone + password authentication against stored accounts
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    verification: Arc<VerificationService>,
    hasher: Arc<dyn PasswordHasher>,
    config: AuthServiceConfig,
}

impl AuthService {
    /// Create a new authentication service
    pub fn new(
        users: Arc<dyn UserRepository>,
        verification: Arc<VerificationService>,
        hasher: Arc<dyn PasswordHasher>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            users,
            verification,
            hasher,
            config,
        }
    }

    /// Authenticate a user and mark them online
    ///
    /// Reports `UserNotFound`, `BadPassword` or `Unverified` distinctly; the
    /// HTTP layer collapses the first two so responses never reveal whether
    /// a phone number has an account.
    pub async fn login(&self, phone: &str, password: &str) -> DomainResult<User> {
        let phone = normalize_phone_number(phone);

        let mut errors = ValidationErrors::new();
        if !is_valid_mauritanian_mobile(&phone) {
            errors.add_error(
                "phone",
                "must be an 8-digit Mauritanian mobile number",
                "invalid_phone",
            );
        }
        if !validators::not_empty(password) {
            errors.add_error("password", "is required", "required");
        }
        errors.into_result()?;

        let mut user = match self.users.find_by_phone(&phone).await? {
            Some(user) => user,
            None => {
                warn!(phone = %mask_phone_number(&phone), "login refused: unknown phone");
                return Err(AuthError::UserNotFound.into());
            }
        };

        if !self.hasher.verify(password, &user.password_hash)? {
            warn!(phone = %mask_phone_number(&phone), "login refused: bad password");
            return Err(AuthError::BadPassword.into());
        }

        if self.config.require_verified_login && !user.is_verified {
            warn!(phone = %mask_phone_number(&phone), "login refused: account unverified");
            return Err(AuthError::Unverified.into());
        }

        user.mark_online();
        self.users.set_presence(user.id, true).await?;

        info!(user_id = %user.id, "user logged in");
        Ok(user)
    }

    /// Mark a user offline
    pub async fn logout(&self, user_id: Uuid) -> DomainResult<()> {
        if !self.users.set_presence(user_id, false).await? {
            return Err(DomainError::not_found("user"));
        }
        info!(user_id = %user_id, "user logged out");
        Ok(())
    }

    /// Issue and deliver a password reset code
    ///
    /// The phone must belong to an existing account.
    pub async fn request_password_reset(&self, phone: &str) -> DomainResult<()> {
        let phone = normalize_phone_number(phone);

        if !is_valid_mauritanian_mobile(&phone) {
            return Err(ValidationErrors::single(
                "phone",
                "must be an 8-digit Mauritanian mobile number",
                "invalid_phone",
            )
            .into());
        }

        if self.users.find_by_phone(&phone).await?.is_none() {
            warn!(
                phone = %mask_phone_number(&phone),
                "password reset refused: unknown phone"
            );
            return Err(DomainError::not_found("user"));
        }

        self.verification
            .issue_and_deliver(&phone, CodePurpose::PasswordReset)
            .await?;
        Ok(())
    }

    /// Consume a reset code and store the new password
    pub async fn complete_password_reset(
        &self,
        phone: &str,
        code: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        let phone = normalize_phone_number(phone);

        if !validators::min_length(new_password, MIN_PASSWORD_LENGTH) {
            return Err(ValidationErrors::single(
                "password",
                "must be at least 6 characters",
                "too_short",
            )
            .into());
        }

        self.verification
            .consume(&phone, CodePurpose::PasswordReset, code)
            .await?;

        let new_hash = self.hasher.hash(new_password)?;
        if !self.users.update_password_hash(&phone, &new_hash).await? {
            return Err(DomainError::not_found("user"));
        }

        info!(phone = %mask_phone_number(&phone), "password reset completed");
        Ok(())
    }
}
