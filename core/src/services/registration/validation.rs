//! Registration form validation

use td_shared::utils::phone::{is_valid_mauritanian_mobile, normalize_phone_number};
use td_shared::utils::validation::{validators, ValidationErrors};

use crate::domain::entities::user::{SpecificRole, UserCategory, UserProfile};
use crate::services::auth::MIN_PASSWORD_LENGTH;

use super::types::RegistrationSubmission;

/// Validate a submission, collecting an error for every violated field
///
/// Returns the normalized phone and the typed profile on success. Nothing is
/// written anywhere until this has passed.
pub fn validate_submission(
    submission: &RegistrationSubmission,
) -> Result<(String, UserProfile), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let phone = normalize_phone_number(&submission.phone);
    if !is_valid_mauritanian_mobile(&phone) {
        errors.add_error(
            "phone",
            "must be an 8-digit Mauritanian mobile number",
            "invalid_phone",
        );
    }

    if !validators::min_length(&submission.password, MIN_PASSWORD_LENGTH) {
        errors.add_error("password", "must be at least 6 characters", "too_short");
    }

    if !validators::not_empty(&submission.national_id) {
        errors.add_error("national_id", "is required", "required");
    } else if !validators::all_decimal(&submission.national_id) {
        errors.add_error("national_id", "must contain only digits", "not_numeric");
    }

    if !validators::not_empty(&submission.reference_number) {
        errors.add_error("reference_number", "is required", "required");
    }

    if !validators::not_empty(&submission.full_name) {
        errors.add_error("full_name", "is required", "required");
    }

    let category = submission.category.parse::<UserCategory>();
    if category.is_err() {
        errors.add_error("category", "is not a recognized category", "unknown_category");
    }

    let role = submission.role.parse::<SpecificRole>();
    if role.is_err() {
        errors.add_error("role", "is not a recognized role", "unknown_role");
    }

    if let (Ok(category), Ok(role)) = (&category, &role) {
        if role.category() != *category {
            errors.add_error(
                "role",
                "does not belong to the selected category",
                "role_category_mismatch",
            );
        }
    }

    if !validators::not_empty(&submission.wilaya) {
        errors.add_error("wilaya", "is required", "required");
    }

    if !validators::not_empty(&submission.moughataa) {
        errors.add_error("moughataa", "is required", "required");
    }

    if !validators::not_empty(&submission.school) {
        errors.add_error("school", "is required", "required");
    }

    match (category, role) {
        (Ok(category), Ok(role)) if errors.is_empty() => Ok((
            phone,
            UserProfile {
                national_id: submission.national_id.trim().to_string(),
                reference_number: submission.reference_number.trim().to_string(),
                full_name: submission.full_name.trim().to_string(),
                category,
                role,
                wilaya: submission.wilaya.trim().to_string(),
                moughataa: submission.moughataa.trim().to_string(),
                school: submission.school.trim().to_string(),
                new_school: submission.new_school,
            },
        )),
        _ => Err(errors),
    }
}
