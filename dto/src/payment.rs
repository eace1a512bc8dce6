use crate::error::UnknownCode;
use chrono::NaiveDateTime;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// How the member is attached to the association.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy)]
#[serde(rename_all = "UPPERCASE")]
pub enum MemberType {
    Rattache,
    Agse,
}

impl MemberType {
    pub fn code(&self) -> &'static str {
        match self {
            MemberType::Rattache => "RATTACHE",
            MemberType::Agse => "AGSE",
        }
    }
}

impl Display for MemberType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for MemberType {
    type Err = UnknownCode;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code {
            "RATTACHE" => Ok(MemberType::Rattache),
            "AGSE" => Ok(MemberType::Agse),
            _ => Err(UnknownCode::new("member type", code)),
        }
    }
}

/// Payment and validation state of a member for one membership year.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct PaymentStatus {
    profile_id: String,
    year: i32,
    membership_paid: bool,
    license_paid: bool,
    member_type: Option<MemberType>,
    validated: bool,
    validated_at: Option<NaiveDateTime>,
    created_at: NaiveDateTime,
}

impl PaymentStatus {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        profile_id: String,
        year: i32,
        membership_paid: bool,
        license_paid: bool,
        member_type: Option<MemberType>,
        validated: bool,
        validated_at: Option<NaiveDateTime>,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            profile_id,
            year,
            membership_paid,
            license_paid,
            member_type,
            validated,
            validated_at,
            created_at,
        }
    }

    /// Status of a member for whom nothing has been recorded yet.
    pub fn unpaid(profile_id: String, year: i32, created_at: NaiveDateTime) -> Self {
        Self::new(
            profile_id,
            year,
            false,
            false,
            None,
            false,
            None,
            created_at,
        )
    }

    /// Complete means the membership is paid, and so is the licence when one was requested.
    pub fn is_complete(&self, license_requested: bool) -> bool {
        self.membership_paid && (!license_requested || self.license_paid)
    }

    pub fn set_membership_paid(&mut self, membership_paid: bool) {
        self.membership_paid = membership_paid;
    }

    pub fn set_license_paid(&mut self, license_paid: bool) {
        self.license_paid = license_paid;
    }

    pub fn set_member_type(&mut self, member_type: Option<MemberType>) {
        self.member_type = member_type;
    }

    /// `validated_at` is cleared when unvalidating.
    pub fn set_validated(&mut self, validated: bool, now: NaiveDateTime) {
        self.validated = validated;
        self.validated_at = validated.then_some(now);
    }
}

#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct MemberTypeUpdate {
    member_type: Option<MemberType>,
}

impl MemberTypeUpdate {
    pub fn new(member_type: Option<MemberType>) -> Self {
        Self { member_type }
    }
}

#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct ValidationUpdate {
    validated: bool,
}

impl ValidationUpdate {
    pub fn new(validated: bool) -> Self {
        Self { validated }
    }
}
