use crate::error::UnknownCode;
use chrono::NaiveDateTime;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeType {
    MembershipPayment,
    LicensePayment,
    MemberType,
    PersonalInfo,
    ValidationStatus,
}

impl ChangeType {
    pub const ALL: [ChangeType; 5] = [
        ChangeType::MembershipPayment,
        ChangeType::LicensePayment,
        ChangeType::MemberType,
        ChangeType::PersonalInfo,
        ChangeType::ValidationStatus,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            ChangeType::MembershipPayment => "MEMBERSHIP_PAYMENT",
            ChangeType::LicensePayment => "LICENSE_PAYMENT",
            ChangeType::MemberType => "MEMBER_TYPE",
            ChangeType::PersonalInfo => "PERSONAL_INFO",
            ChangeType::ValidationStatus => "VALIDATION_STATUS",
        }
    }
}

impl Display for ChangeType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for ChangeType {
    type Err = UnknownCode;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        ChangeType::ALL
            .into_iter()
            .find(|change_type| change_type.code() == code)
            .ok_or_else(|| UnknownCode::new("change type", code))
    }
}

/// One change made by an administrator on a member.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct AuditLog {
    user_id: String,
    year: i32,
    change_type: ChangeType,
    old_value: Option<String>,
    new_value: Option<String>,
    created_at: NaiveDateTime,
    created_by: String,
}

impl AuditLog {
    pub fn new(
        user_id: String,
        year: i32,
        change_type: ChangeType,
        old_value: Option<String>,
        new_value: Option<String>,
        created_at: NaiveDateTime,
        created_by: String,
    ) -> Self {
        Self {
            user_id,
            year,
            change_type,
            old_value,
            new_value,
            created_at,
            created_by,
        }
    }
}
