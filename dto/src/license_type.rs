use crate::error::UnknownCode;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The federation licence requested alongside the membership, if any.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
pub enum LicenseType {
    #[serde(rename = "adult")]
    Adult,
    #[serde(rename = "young-adult")]
    YoungAdult,
    #[serde(rename = "teen")]
    Teen,
    #[serde(rename = "child")]
    Child,
    #[serde(rename = "none")]
    NoLicense,
}

impl LicenseType {
    pub const ALL: [LicenseType; 5] = [
        LicenseType::Adult,
        LicenseType::YoungAdult,
        LicenseType::Teen,
        LicenseType::Child,
        LicenseType::NoLicense,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            LicenseType::Adult => "adult",
            LicenseType::YoungAdult => "young-adult",
            LicenseType::Teen => "teen",
            LicenseType::Child => "child",
            LicenseType::NoLicense => "none",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LicenseType::Adult => "Licence FFG Adulte",
            LicenseType::YoungAdult => "Licence FFG Jeune adulte (19-25 ans)",
            LicenseType::Teen => "Licence FFG Jeune (13-18 ans)",
            LicenseType::Child => "Licence FFG Enfant (moins de 13 ans)",
            LicenseType::NoLicense => "Pas de licence FFG",
        }
    }

    /// Whether a licence is actually requested, and thus has to be priced and paid.
    pub fn is_requested(&self) -> bool {
        *self != LicenseType::NoLicense
    }
}

impl Display for LicenseType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for LicenseType {
    type Err = UnknownCode;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        LicenseType::ALL
            .into_iter()
            .find(|license_type| license_type.code() == code)
            .ok_or_else(|| UnknownCode::new("license type", code))
    }
}
