use crate::license_type::LicenseType;
use crate::membership_type::MembershipType;
use crate::profile::PersonalInfo;
use chrono::NaiveDateTime;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Clone)]
pub struct MembershipApplication {
    id: String,
    user_id: String,
    membership_type: MembershipType,
    license_type: LicenseType,
    created_at: NaiveDateTime,
}

impl MembershipApplication {
    pub fn new(
        id: String,
        user_id: String,
        membership_type: MembershipType,
        license_type: LicenseType,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            user_id,
            membership_type,
            license_type,
            created_at,
        }
    }
}

/// Content of the membership form.
/// The personal info is saved into the member's profile when the application is accepted.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Clone)]
pub struct ApplicationRequest {
    membership_type: MembershipType,
    license_type: LicenseType,
    personal_info: PersonalInfo,
}

impl ApplicationRequest {
    pub fn new(
        membership_type: MembershipType,
        license_type: LicenseType,
        personal_info: PersonalInfo,
    ) -> Self {
        Self {
            membership_type,
            license_type,
            personal_info,
        }
    }
}

/// Answer to "may I fill the membership form?".
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct Eligibility {
    membership_year: i32,
    has_existing_application: bool,
}

impl Eligibility {
    pub fn new(membership_year: i32, has_existing_application: bool) -> Self {
        Self {
            membership_year,
            has_existing_application,
        }
    }
}
