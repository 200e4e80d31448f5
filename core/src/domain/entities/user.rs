//! User entity representing a registered member of the platform.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Broad category a member registers under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserCategory {
    /// Secondary-school teacher
    Professeur,
    /// Primary-school teacher
    Instituteur,
    /// School administration staff
    Direction,
}

impl UserCategory {
    /// Stable name used for storage and API payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            UserCategory::Professeur => "professeur",
            UserCategory::Instituteur => "instituteur",
            UserCategory::Direction => "direction",
        }
    }
}

impl std::fmt::Display for UserCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "professeur" => Ok(UserCategory::Professeur),
            "instituteur" => Ok(UserCategory::Instituteur),
            "direction" => Ok(UserCategory::Direction),
            _ => Err(format!("unknown user category: {}", s)),
        }
    }
}

/// Precise role inside a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecificRole {
    ProfPremierCycle,
    ProfDeuxiemeCycle,
    InstituteurArabe,
    InstituteurFrancais,
    InstituteurBilingue,
    DirecteurGeneral,
    DirecteurEtudes,
    SurveillantGeneral,
}

impl SpecificRole {
    /// The category this role belongs to
    pub fn category(&self) -> UserCategory {
        match self {
            SpecificRole::ProfPremierCycle | SpecificRole::ProfDeuxiemeCycle => {
                UserCategory::Professeur
            }
            SpecificRole::InstituteurArabe
            | SpecificRole::InstituteurFrancais
            | SpecificRole::InstituteurBilingue => UserCategory::Instituteur,
            SpecificRole::DirecteurGeneral
            | SpecificRole::DirecteurEtudes
            | SpecificRole::SurveillantGeneral => UserCategory::Direction,
        }
    }

    /// Stable name used for storage and API payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            SpecificRole::ProfPremierCycle => "prof_1er_cycle",
            SpecificRole::ProfDeuxiemeCycle => "prof_2e_cycle",
            SpecificRole::InstituteurArabe => "inst_arabe",
            SpecificRole::InstituteurFrancais => "inst_francais",
            SpecificRole::InstituteurBilingue => "inst_bilingue",
            SpecificRole::DirecteurGeneral => "dir_general",
            SpecificRole::DirecteurEtudes => "dir_etudes",
            SpecificRole::SurveillantGeneral => "surveillant",
        }
    }
}

impl std::fmt::Display for SpecificRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SpecificRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prof_1er_cycle" => Ok(SpecificRole::ProfPremierCycle),
            "prof_2e_cycle" => Ok(SpecificRole::ProfDeuxiemeCycle),
            "inst_arabe" => Ok(SpecificRole::InstituteurArabe),
            "inst_francais" => Ok(SpecificRole::InstituteurFrancais),
            "inst_bilingue" => Ok(SpecificRole::InstituteurBilingue),
            "dir_general" => Ok(SpecificRole::DirecteurGeneral),
            "dir_etudes" => Ok(SpecificRole::DirecteurEtudes),
            "surveillant" => Ok(SpecificRole::SurveillantGeneral),
            _ => Err(format!("unknown specific role: {}", s)),
        }
    }
}

/// Identity and workplace fields shared by the registration submission,
/// the pending-registration record, and the stored user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// National identification number, globally unique
    pub national_id: String,

    /// Staff reference number (matricule), globally unique
    pub reference_number: String,

    /// Full display name
    pub full_name: String,

    /// Registered category
    pub category: UserCategory,

    /// Precise role; must belong to `category`
    pub role: SpecificRole,

    /// Region name, carried as submitted
    pub wilaya: String,

    /// Department name, carried as submitted
    pub moughataa: String,

    /// School name
    pub school: String,

    /// The school was typed in rather than picked from the directory
    pub new_school: bool,
}

impl UserProfile {
    /// Checks that the submitted role belongs to the submitted category
    pub fn role_matches_category(&self) -> bool {
        self.role.category() == self.category
    }
}

/// User entity representing a registered member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Mobile number, globally unique
    pub phone: String,

    /// Identity and workplace fields
    #[serde(flatten)]
    pub profile: UserProfile,

    /// Opaque password hash; never serialized out
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Whether phone ownership was proven by code consumption
    pub is_verified: bool,

    /// Whether the user currently has an open session
    pub is_online: bool,

    /// Timestamp of the last login or logout
    pub last_seen: Option<DateTime<Utc>>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User instance
    pub fn new(phone: String, profile: UserProfile, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            phone,
            profile,
            password_hash,
            is_verified: false,
            is_online: false,
            last_seen: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks the phone as verified
    pub fn verify(&mut self) {
        self.is_verified = true;
        self.updated_at = Utc::now();
    }

    /// Records a login
    pub fn mark_online(&mut self) {
        self.is_online = true;
        self.last_seen = Some(Utc::now());
        self.updated_at = Utc::now();
    }

    /// Records a logout
    pub fn mark_offline(&mut self) {
        self.is_online = false;
        self.last_seen = Some(Utc::now());
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> UserProfile {
        UserProfile {
            national_id: "1234567890".to_string(),
            reference_number: "MAT-4471".to_string(),
            full_name: "Mariem Mint Ahmed".to_string(),
            category: UserCategory::Instituteur,
            role: SpecificRole::InstituteurBilingue,
            wilaya: "الترارزة".to_string(),
            moughataa: "روصو".to_string(),
            school: "مدرسة روصو 2".to_string(),
            new_school: false,
        }
    }

    #[test]
    fn test_new_user_creation() {
        let user = User::new("36123456".to_string(), sample_profile(), "$2b$12$hash".to_string());

        assert_eq!(user.phone, "36123456");
        assert_eq!(user.profile.full_name, "Mariem Mint Ahmed");
        assert!(!user.is_verified);
        assert!(!user.is_online);
        assert!(user.last_seen.is_none());
    }

    #[test]
    fn test_verify_flips_flag() {
        let mut user = User::new("36123456".to_string(), sample_profile(), "hash".to_string());
        user.verify();
        assert!(user.is_verified);
    }

    #[test]
    fn test_presence_tracking() {
        let mut user = User::new("36123456".to_string(), sample_profile(), "hash".to_string());

        user.mark_online();
        assert!(user.is_online);
        assert!(user.last_seen.is_some());

        let seen_at_login = user.last_seen;
        user.mark_offline();
        assert!(!user.is_online);
        assert!(user.last_seen >= seen_at_login);
    }

    #[test]
    fn test_every_role_maps_to_its_category() {
        let cases = [
            (SpecificRole::ProfPremierCycle, UserCategory::Professeur),
            (SpecificRole::ProfDeuxiemeCycle, UserCategory::Professeur),
            (SpecificRole::InstituteurArabe, UserCategory::Instituteur),
            (SpecificRole::InstituteurFrancais, UserCategory::Instituteur),
            (SpecificRole::InstituteurBilingue, UserCategory::Instituteur),
            (SpecificRole::DirecteurGeneral, UserCategory::Direction),
            (SpecificRole::DirecteurEtudes, UserCategory::Direction),
            (SpecificRole::SurveillantGeneral, UserCategory::Direction),
        ];
        for (role, category) in cases {
            assert_eq!(role.category(), category);
        }
    }

    #[test]
    fn test_role_category_coherence() {
        let mut profile = sample_profile();
        assert!(profile.role_matches_category());

        profile.role = SpecificRole::DirecteurGeneral;
        assert!(!profile.role_matches_category());
    }

    #[test]
    fn test_enum_round_trips() {
        for category in [
            UserCategory::Professeur,
            UserCategory::Instituteur,
            UserCategory::Direction,
        ] {
            let parsed: UserCategory = category.as_str().parse().expect("round trip");
            assert_eq!(parsed, category);
        }
        for role in [
            SpecificRole::ProfPremierCycle,
            SpecificRole::ProfDeuxiemeCycle,
            SpecificRole::InstituteurArabe,
            SpecificRole::InstituteurFrancais,
            SpecificRole::InstituteurBilingue,
            SpecificRole::DirecteurGeneral,
            SpecificRole::DirecteurEtudes,
            SpecificRole::SurveillantGeneral,
        ] {
            let parsed: SpecificRole = role.as_str().parse().expect("round trip");
            assert_eq!(parsed, role);
        }
        assert!("inspecteur".parse::<UserCategory>().is_err());
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let user = User::new("36123456".to_string(), sample_profile(), "secret-hash".to_string());
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(!json.contains("password_hash"));
    }
}
