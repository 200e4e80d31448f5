//! Two-step registration flow

use std::sync::Arc;

use td_shared::utils::phone::{mask_phone_number, normalize_phone_number};
use tracing::{info, warn};

use crate::domain::entities::pending_registration::PendingRegistration;
use crate::domain::entities::user::User;
use crate::domain::entities::verification_code::CodePurpose;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{PendingRegistrationRepository, UserRepository};
use crate::services::auth::PasswordHasher;
use crate::services::verification::VerificationService;

use super::types::{RegistrationStarted, RegistrationSubmission};
use super::validation::validate_submission;

/// Registration in two steps: submit the form, then prove the phone
///
/// The submitted profile is parked as a pending registration until the
/// delivered code is consumed; only then does a user row exist. Accounts
/// created through this flow are verified from birth.
pub struct RegistrationService {
    users: Arc<dyn UserRepository>,
    pending: Arc<dyn PendingRegistrationRepository>,
    verification: Arc<VerificationService>,
    hasher: Arc<dyn PasswordHasher>,
}

impl RegistrationService {
    /// Create a new registration service
    pub fn new(
        users: Arc<dyn UserRepository>,
        pending: Arc<dyn PendingRegistrationRepository>,
        verification: Arc<VerificationService>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            users,
            pending,
            verification,
            hasher,
        }
    }

    /// Validate a submission, park it, and send the verification code
    ///
    /// A failed delivery is reported to the caller, but the parked
    /// registration and its code survive for a resend.
    pub async fn start_registration(
        &self,
        submission: RegistrationSubmission,
    ) -> DomainResult<RegistrationStarted> {
        let (phone, profile) = validate_submission(&submission)?;

        if let Some(field) = self
            .users
            .find_conflict(&phone, &profile.national_id, &profile.reference_number)
            .await?
        {
            warn!(
                phone = %mask_phone_number(&phone),
                field = %field,
                "registration refused: duplicate account"
            );
            return Err(DomainError::Duplicate { field });
        }

        let password_hash = self.hasher.hash(&submission.password)?;
        self.pending
            .replace(PendingRegistration::new(phone.clone(), profile, password_hash))
            .await?;

        info!(phone = %mask_phone_number(&phone), "registration parked, sending code");

        let delivery = self
            .verification
            .issue_and_deliver(&phone, CodePurpose::Registration)
            .await?;

        Ok(RegistrationStarted {
            phone,
            code_expires_at: delivery.code.expires_at,
        })
    }

    /// Send a fresh code for a parked registration
    pub async fn resend_code(&self, phone: &str) -> DomainResult<RegistrationStarted> {
        let phone = normalize_phone_number(phone);
        self.require_pending(&phone).await?;

        let delivery = self
            .verification
            .issue_and_deliver(&phone, CodePurpose::Registration)
            .await?;

        Ok(RegistrationStarted {
            phone,
            code_expires_at: delivery.code.expires_at,
        })
    }

    /// Consume the code and turn the parked registration into a user
    ///
    /// A duplicate can still surface here when a conflicting account was
    /// created while this registration sat parked.
    pub async fn complete_registration(&self, phone: &str, code: &str) -> DomainResult<User> {
        let phone = normalize_phone_number(phone);

        self.verification
            .consume(&phone, CodePurpose::Registration, code)
            .await?;

        let pending = self.require_pending(&phone).await?;

        let user = self.users.create(pending.into_user()).await?;
        self.pending.delete(&phone).await?;

        info!(
            user_id = %user.id,
            phone = %mask_phone_number(&phone),
            "registration completed"
        );
        Ok(user)
    }

    // Loads the parked registration; an expired one is dropped and treated
    // as absent
    async fn require_pending(&self, phone: &str) -> DomainResult<PendingRegistration> {
        match self.pending.find_by_phone(phone).await? {
            Some(pending) if pending.is_expired() => {
                self.pending.delete(phone).await?;
                warn!(
                    phone = %mask_phone_number(phone),
                    "pending registration expired"
                );
                Err(DomainError::not_found("pending registration"))
            }
            Some(pending) => Ok(pending),
            None => Err(DomainError::not_found("pending registration")),
        }
    }
}
