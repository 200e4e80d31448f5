//! Verification code entity for SMS phone-ownership checks.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::rngs::OsRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of failed attempts before an issuance is dead
pub const MAX_ATTEMPTS: u32 = 3;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Expiration window for verification codes
pub const CODE_TTL_MINUTES: i64 = 10;

/// Smallest issuable code (inclusive); keeps every code a full 6 digits
pub const CODE_MIN: u32 = 100_000;

/// Largest issuable code (inclusive)
pub const CODE_MAX: u32 = 999_999;

/// What a verification code was issued for
///
/// The purpose is part of the ledger key: a registration code can never
/// consume a password-reset slot and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodePurpose {
    Registration,
    PasswordReset,
}

impl CodePurpose {
    /// Stable name used for storage and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            CodePurpose::Registration => "registration",
            CodePurpose::PasswordReset => "password_reset",
        }
    }
}

impl std::fmt::Display for CodePurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CodePurpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "registration" => Ok(CodePurpose::Registration),
            "password_reset" => Ok(CodePurpose::PasswordReset),
            _ => Err(format!("unknown code purpose: {}", s)),
        }
    }
}

/// One issued verification code
///
/// At most one row exists per (phone, purpose): issuing a new code deletes
/// the previous row for the key before inserting this one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCode {
    /// Unique identifier for the issuance
    pub id: Uuid,

    /// Phone number the code was issued for
    pub phone: String,

    /// The 6-digit verification code
    pub code: String,

    /// What the code authorizes
    pub purpose: CodePurpose,

    /// Number of failed verification attempts so far
    pub attempt_count: u32,

    /// Whether the code has been successfully consumed
    pub is_used: bool,

    /// Timestamp when the code was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,
}

impl VerificationCode {
    /// Creates a new code issuance with a secure random 6-digit code
    pub fn new(phone: String, purpose: CodePurpose) -> Self {
        let code = Self::generate_code();
        let now = Utc::now();
        let expires_at = now + Duration::minutes(CODE_TTL_MINUTES);

        Self {
            id: Uuid::new_v4(),
            phone,
            code,
            purpose,
            attempt_count: 0,
            is_used: false,
            created_at: now,
            expires_at,
        }
    }

    /// Generates a 6-digit code, uniform over [`CODE_MIN`]..=[`CODE_MAX`]
    ///
    /// Drawn from the operating system's CSPRNG. The range excludes values
    /// below 100000 so a code never carries a leading zero.
    pub fn generate_code() -> String {
        let code: u32 = OsRng.gen_range(CODE_MIN..=CODE_MAX);
        code.to_string()
    }

    /// Checks if the code has expired
    ///
    /// A code is still usable at exactly `expires_at` and rejected strictly
    /// after it.
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Checks if the attempt budget for this issuance is spent
    pub fn is_exhausted(&self) -> bool {
        self.attempt_count >= MAX_ATTEMPTS
    }

    /// Compares a candidate against the stored code in constant time
    pub fn matches(&self, candidate: &str) -> bool {
        constant_time_eq(self.code.as_bytes(), candidate.as_bytes())
    }

    /// Records one failed attempt
    pub fn record_attempt(&mut self) {
        self.attempt_count += 1;
    }

    /// Marks the code as consumed
    pub fn mark_used(&mut self) {
        self.is_used = true;
    }

    /// Gets the number of remaining attempts (0 if spent)
    pub fn remaining_attempts(&self) -> u32 {
        MAX_ATTEMPTS.saturating_sub(self.attempt_count)
    }

    /// Gets the time remaining until expiration, or zero if expired
    pub fn time_until_expiration(&self) -> Duration {
        let now = Utc::now();
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration as StdDuration;

    #[test]
    fn test_new_verification_code() {
        let code = VerificationCode::new("36123456".to_string(), CodePurpose::Registration);

        assert_eq!(code.phone, "36123456");
        assert_eq!(code.purpose, CodePurpose::Registration);
        assert_eq!(code.code.len(), CODE_LENGTH);
        assert_eq!(code.attempt_count, 0);
        assert!(!code.is_used);
        assert!(!code.is_expired());
        assert!(!code.is_exhausted());
        assert_eq!(code.expires_at, code.created_at + Duration::minutes(CODE_TTL_MINUTES));
    }

    #[test]
    fn test_generated_code_stays_in_range() {
        for _ in 0..200 {
            let code = VerificationCode::generate_code();
            assert_eq!(code.len(), CODE_LENGTH);
            let num: u32 = code.parse().expect("generated code is numeric");
            assert!((CODE_MIN..=CODE_MAX).contains(&num));
        }
    }

    #[test]
    fn test_code_uniqueness() {
        let codes: Vec<String> = (0..100).map(|_| VerificationCode::generate_code()).collect();
        let unique_count = codes.iter().collect::<std::collections::HashSet<_>>().len();
        assert!(unique_count > 1);
    }

    #[test]
    fn test_matches_is_exact() {
        let code = VerificationCode::new("36123456".to_string(), CodePurpose::Registration);
        assert!(code.matches(&code.code.clone()));
        assert!(!code.matches("000000"));
        assert!(!code.matches(""));
        assert!(!code.matches(&code.code[..5]));
    }

    #[test]
    fn test_attempt_accounting() {
        let mut code = VerificationCode::new("36123456".to_string(), CodePurpose::PasswordReset);
        assert_eq!(code.remaining_attempts(), MAX_ATTEMPTS);

        code.record_attempt();
        code.record_attempt();
        assert_eq!(code.attempt_count, 2);
        assert_eq!(code.remaining_attempts(), 1);
        assert!(!code.is_exhausted());

        code.record_attempt();
        assert!(code.is_exhausted());
        assert_eq!(code.remaining_attempts(), 0);
    }

    #[test]
    fn test_expiry_is_strict() {
        let mut code = VerificationCode::new("36123456".to_string(), CodePurpose::Registration);

        // A window still open keeps the code usable
        code.expires_at = Utc::now() + Duration::minutes(1);
        assert!(!code.is_expired());

        // Shrink the window to nothing and give the clock a moment to pass it
        code.expires_at = Utc::now();
        thread::sleep(StdDuration::from_millis(10));
        assert!(code.is_expired());
    }

    #[test]
    fn test_purpose_round_trip() {
        for purpose in [CodePurpose::Registration, CodePurpose::PasswordReset] {
            let parsed: CodePurpose = purpose.as_str().parse().expect("round trip");
            assert_eq!(parsed, purpose);
        }
        assert!("login".parse::<CodePurpose>().is_err());
    }

    #[test]
    fn test_time_until_expiration() {
        let code = VerificationCode::new("36123456".to_string(), CodePurpose::Registration);

        let time_remaining = code.time_until_expiration();
        assert!(time_remaining <= Duration::minutes(CODE_TTL_MINUTES));
        assert!(time_remaining > Duration::minutes(CODE_TTL_MINUTES - 1));
    }

    #[test]
    fn test_serialization() {
        let code = VerificationCode::new("36123456".to_string(), CodePurpose::PasswordReset);

        let json = serde_json::to_string(&code).unwrap();
        let deserialized: VerificationCode = serde_json::from_str(&json).unwrap();

        assert_eq!(code, deserialized);
    }
}
