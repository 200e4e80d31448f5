//! Pending registration entity: the validated first step of the two-step
//! registration protocol, waiting for its verification code.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::user::{User, UserProfile};

/// How long a pending registration stays claimable
///
/// Matches the verification-code window: the code guarding the pending
/// record and the record itself expire together.
pub const PENDING_TTL_MINUTES: i64 = 10;

/// A registration that passed validation and awaits phone verification
///
/// Keyed by phone. Restarting registration for the same phone supersedes the
/// previous record wholesale, the same way a re-issued code supersedes its
/// predecessor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRegistration {
    /// Phone number being registered, also the lookup key
    pub phone: String,

    /// Identity and workplace fields held until completion
    pub profile: UserProfile,

    /// Already-hashed password; the plaintext is never stored
    pub password_hash: String,

    /// Timestamp when the registration was started
    pub created_at: DateTime<Utc>,

    /// Timestamp when the record stops being claimable
    pub expires_at: DateTime<Utc>,
}

impl PendingRegistration {
    /// Creates a new pending registration
    pub fn new(phone: String, profile: UserProfile, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            phone,
            profile,
            password_hash,
            created_at: now,
            expires_at: now + Duration::minutes(PENDING_TTL_MINUTES),
        }
    }

    /// Checks if the record is past its window
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Converts the pending record into a verified user
    ///
    /// Called once the guarding code was consumed; phone ownership is proven
    /// at this point, so the user is created verified.
    pub fn into_user(self) -> User {
        let mut user = User::new(self.phone, self.profile, self.password_hash);
        user.verify();
        user
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::user::{SpecificRole, UserCategory};
    use std::thread;
    use std::time::Duration as StdDuration;

    fn sample_profile() -> UserProfile {
        UserProfile {
            national_id: "9876543210".to_string(),
            reference_number: "MAT-1020".to_string(),
            full_name: "Sidi Ould Cheikh".to_string(),
            category: UserCategory::Professeur,
            role: SpecificRole::ProfDeuxiemeCycle,
            wilaya: "آدرار".to_string(),
            moughataa: "أطار".to_string(),
            school: "إعدادية أطار المركزية".to_string(),
            new_school: true,
        }
    }

    #[test]
    fn test_new_pending_registration() {
        let pending = PendingRegistration::new(
            "27654321".to_string(),
            sample_profile(),
            "$2b$12$hash".to_string(),
        );

        assert_eq!(pending.phone, "27654321");
        assert!(!pending.is_expired());
        assert_eq!(
            pending.expires_at,
            pending.created_at + Duration::minutes(PENDING_TTL_MINUTES)
        );
    }

    #[test]
    fn test_expiry_is_strict() {
        let mut pending = PendingRegistration::new(
            "27654321".to_string(),
            sample_profile(),
            "hash".to_string(),
        );

        pending.expires_at = Utc::now();
        thread::sleep(StdDuration::from_millis(10));
        assert!(pending.is_expired());
    }

    #[test]
    fn test_into_user_is_verified() {
        let pending = PendingRegistration::new(
            "27654321".to_string(),
            sample_profile(),
            "$2b$12$hash".to_string(),
        );

        let user = pending.into_user();
        assert_eq!(user.phone, "27654321");
        assert_eq!(user.profile.full_name, "Sidi Ould Cheikh");
        assert_eq!(user.password_hash, "$2b$12$hash");
        assert!(user.is_verified);
        assert!(!user.is_online);
    }
}
