//! Fixtures for registration flow tests

use crate::services::registration::RegistrationSubmission;

pub const PHONE: &str = "34567890";
pub const PASSWORD: &str = "secret123";
pub const NATIONAL_ID: &str = "1234567890";
pub const REFERENCE_NUMBER: &str = "MAT-001";

pub fn valid_submission() -> RegistrationSubmission {
    RegistrationSubmission {
        phone: PHONE.to_string(),
        password: PASSWORD.to_string(),
        national_id: NATIONAL_ID.to_string(),
        reference_number: REFERENCE_NUMBER.to_string(),
        full_name: "Aminata Ba".to_string(),
        category: "professeur".to_string(),
        role: "prof_1er_cycle".to_string(),
        wilaya: "Nouakchott-Ouest".to_string(),
        moughataa: "Tevragh-Zeina".to_string(),
        school: "Lycee de Tevragh-Zeina".to_string(),
        new_school: false,
    }
}
