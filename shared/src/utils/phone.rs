//! Phone number utilities
//!
//! Subscriber numbers are Mauritanian mobile numbers: exactly 8 digits,
//! numerically inside the allocated mobile range 20000000–49999999.

use once_cell::sync::Lazy;
use regex::Regex;

/// Lowest number in the allocated mobile range (inclusive).
pub const MOBILE_RANGE_MIN: u32 = 20_000_000;

/// Highest number in the allocated mobile range (inclusive).
pub const MOBILE_RANGE_MAX: u32 = 49_999_999;

// Eight decimal digits, nothing else
static MOBILE_SHAPE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{8}$").expect("valid regex")
});

/// Normalize a phone number by removing common formatting characters
pub fn normalize_phone_number(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Check if a phone number is a valid Mauritanian mobile number
pub fn is_valid_mauritanian_mobile(phone: &str) -> bool {
    if !MOBILE_SHAPE_REGEX.is_match(phone) {
        return false;
    }
    match phone.parse::<u32>() {
        Ok(n) => (MOBILE_RANGE_MIN..=MOBILE_RANGE_MAX).contains(&n),
        Err(_) => false,
    }
}

/// Mask a phone number for display and logs (e.g. 36****21)
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.len() >= 6 {
        format!(
            "{}****{}",
            &normalized[0..2],
            &normalized[normalized.len() - 2..]
        )
    } else {
        "****".to_string()
    }
}
