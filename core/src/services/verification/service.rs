//! Verification code issuance and consumption

use std::sync::Arc;

use td_shared::utils::phone::mask_phone_number;
use tracing::{info, warn};

use crate::domain::entities::verification_code::{
    CodePurpose, VerificationCode, CODE_TTL_MINUTES,
};
use crate::errors::{DomainResult, VerificationError};
use crate::repositories::VerificationCodeRepository;

use super::traits::SmsGateway;
use super::types::CodeDelivery;

/// Issues one-time codes and walks candidates through the consumption rules
///
/// One live code per `(phone, purpose)`. Issuing supersedes the previous
/// code; consumption either marks the code used or reports precisely why the
/// candidate was refused.
pub struct VerificationService {
    codes: Arc<dyn VerificationCodeRepository>,
    gateway: Arc<dyn SmsGateway>,
}

impl VerificationService {
    /// Create a new verification service
    pub fn new(
        codes: Arc<dyn VerificationCodeRepository>,
        gateway: Arc<dyn SmsGateway>,
    ) -> Self {
        Self { codes, gateway }
    }

    /// Issue a fresh code for a phone and purpose
    ///
    /// Any previous code for the pair is superseded in the same storage
    /// step, so only the newest code can ever be consumed.
    pub async fn issue(
        &self,
        phone: &str,
        purpose: CodePurpose,
    ) -> DomainResult<VerificationCode> {
        let code = VerificationCode::new(phone.to_string(), purpose);
        let stored = self.codes.replace(code).await?;

        info!(
            phone = %mask_phone_number(phone),
            purpose = %purpose,
            expires_at = %stored.expires_at,
            "verification code issued"
        );

        Ok(stored)
    }

    /// Deliver an issued code over SMS, returning the provider message id
    ///
    /// Called after the issuing write has committed; a delivery failure is
    /// reported to the caller but leaves the code valid for a resend.
    pub async fn deliver(&self, code: &VerificationCode) -> DomainResult<String> {
        let body = format!(
            "Tedris: votre code de verification est {}. Il expire dans {} minutes.",
            code.code, CODE_TTL_MINUTES
        );

        match self.gateway.deliver(&code.phone, &body).await {
            Ok(message_id) => {
                info!(
                    phone = %mask_phone_number(&code.phone),
                    message_id = %message_id,
                    "verification code delivered"
                );
                Ok(message_id)
            }
            Err(err) => {
                warn!(
                    phone = %mask_phone_number(&code.phone),
                    error = %err,
                    "verification code delivery failed, code remains valid"
                );
                Err(err.into())
            }
        }
    }

    /// Issue a fresh code and deliver it in one call
    pub async fn issue_and_deliver(
        &self,
        phone: &str,
        purpose: CodePurpose,
    ) -> DomainResult<CodeDelivery> {
        let code = self.issue(phone, purpose).await?;
        let message_id = self.deliver(&code).await?;
        Ok(CodeDelivery { code, message_id })
    }

    /// Check a candidate against the current code for a phone and purpose
    ///
    /// The checks run in a fixed order: presence, expiry, attempt budget,
    /// then the constant-time match. A mismatch burns one attempt; a match
    /// consumes the code without touching the attempt counter.
    pub async fn consume(
        &self,
        phone: &str,
        purpose: CodePurpose,
        candidate: &str,
    ) -> DomainResult<()> {
        let current = self.codes.find_current(phone, purpose).await?;
        let code = match current {
            Some(code) => code,
            None => {
                warn!(
                    phone = %mask_phone_number(phone),
                    purpose = %purpose,
                    "consume refused: no active code"
                );
                return Err(VerificationError::NoActiveCode.into());
            }
        };

        if code.is_expired() {
            warn!(
                phone = %mask_phone_number(phone),
                purpose = %purpose,
                "consume refused: code expired"
            );
            return Err(VerificationError::Expired.into());
        }

        if code.is_exhausted() {
            warn!(
                phone = %mask_phone_number(phone),
                purpose = %purpose,
                "consume refused: attempts exhausted"
            );
            return Err(VerificationError::TooManyAttempts.into());
        }

        if !code.matches(candidate) {
            self.codes.record_attempt(code.id).await?;
            let remaining = code.remaining_attempts().saturating_sub(1);
            warn!(
                phone = %mask_phone_number(phone),
                purpose = %purpose,
                remaining = remaining,
                "consume refused: candidate mismatch"
            );
            return Err(VerificationError::Mismatch { remaining }.into());
        }

        self.codes.mark_used(code.id).await?;
        info!(
            phone = %mask_phone_number(phone),
            purpose = %purpose,
            "verification code consumed"
        );
        Ok(())
    }

    /// Drop expired codes from storage
    pub async fn purge_expired(&self) -> DomainResult<u64> {
        let purged = self.codes.purge_expired().await?;
        if purged > 0 {
            info!(purged = purged, "expired verification codes purged");
        }
        Ok(purged)
    }
}
