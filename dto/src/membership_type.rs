use crate::error::UnknownCode;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The kind of membership a member applies for.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
pub enum MembershipType {
    #[serde(rename = "GOLF")]
    Golf,
    #[serde(rename = "GOLF_LOISIR")]
    GolfLoisir,
    #[serde(rename = "GOLF_JEUNE")]
    GolfJeune,
}

impl MembershipType {
    pub const ALL: [MembershipType; 3] = [
        MembershipType::Golf,
        MembershipType::GolfLoisir,
        MembershipType::GolfJeune,
    ];

    /// Code used in the price catalog and in storage.
    pub fn code(&self) -> &'static str {
        match self {
            MembershipType::Golf => "GOLF",
            MembershipType::GolfLoisir => "GOLF_LOISIR",
            MembershipType::GolfJeune => "GOLF_JEUNE",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MembershipType::Golf => "GOLF",
            MembershipType::GolfLoisir => "GOLF LOISIR",
            MembershipType::GolfJeune => "GOLF JEUNE",
        }
    }
}

impl Display for MembershipType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for MembershipType {
    type Err = UnknownCode;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        MembershipType::ALL
            .into_iter()
            .find(|membership_type| membership_type.code() == code)
            .ok_or_else(|| UnknownCode::new("membership type", code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parameterized::{ide, parameterized};

    ide!();

    #[parameterized(
        code = {"GOLF", "GOLF_LOISIR", "GOLF_JEUNE"},
        expected_result = {MembershipType::Golf, MembershipType::GolfLoisir, MembershipType::GolfJeune}
    )]
    fn should_parse_code(code: &str, expected_result: MembershipType) {
        assert_eq!(Ok(expected_result), MembershipType::from_str(code));
        assert_eq!(code, expected_result.to_string());
    }

    #[test]
    fn should_fail_to_parse_unknown_code() {
        assert_eq!(
            Err(UnknownCode::new("membership type", "golf")),
            MembershipType::from_str("golf")
        );
    }
}
