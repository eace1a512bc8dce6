use crate::error::UnknownCode;
use chrono::{NaiveDate, NaiveDateTime};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn code(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Role {
    type Err = UnknownCode;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            _ => Err(UnknownCode::new("role", code)),
        }
    }
}

/// Personal details filled by a member, either from their profile or from the membership form.
/// All fields are optional in storage; the membership form requires some of them.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Clone, Default)]
pub struct PersonalInfo {
    firstname: Option<String>,
    lastname: Option<String>,
    birthdate: Option<NaiveDate>,
    phone: Option<String>,
    address: Option<String>,
    postalcode: Option<String>,
    city: Option<String>,
    emergencycontact: Option<String>,
    emergencyphone: Option<String>,
    ffglicense: Option<String>,
    golfindex: Option<f64>,
    birthplace: Option<String>,
}

impl PersonalInfo {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        firstname: Option<String>,
        lastname: Option<String>,
        birthdate: Option<NaiveDate>,
        phone: Option<String>,
        address: Option<String>,
        postalcode: Option<String>,
        city: Option<String>,
        emergencycontact: Option<String>,
        emergencyphone: Option<String>,
        ffglicense: Option<String>,
        golfindex: Option<f64>,
        birthplace: Option<String>,
    ) -> Self {
        Self {
            firstname,
            lastname,
            birthdate,
            phone,
            address,
            postalcode,
            city,
            emergencycontact,
            emergencyphone,
            ffglicense,
            golfindex,
            birthplace,
        }
    }

    /// Blank strings are turned into [None], surrounding whitespace is dropped.
    pub fn trimmed(self) -> Self {
        fn trim(value: Option<String>) -> Option<String> {
            value
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        }

        Self {
            firstname: trim(self.firstname),
            lastname: trim(self.lastname),
            birthdate: self.birthdate,
            phone: trim(self.phone),
            address: trim(self.address),
            postalcode: trim(self.postalcode),
            city: trim(self.city),
            emergencycontact: trim(self.emergencycontact),
            emergencyphone: trim(self.emergencyphone),
            ffglicense: trim(self.ffglicense),
            golfindex: self.golfindex,
            birthplace: trim(self.birthplace),
        }
    }

    /// Names of the fields the membership form can't be submitted without.
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        let required = [
            ("firstname", self.firstname.is_some()),
            ("lastname", self.lastname.is_some()),
            ("birthdate", self.birthdate.is_some()),
            ("phone", self.phone.is_some()),
            ("address", self.address.is_some()),
            ("postalcode", self.postalcode.is_some()),
            ("city", self.city.is_some()),
        ];

        required
            .into_iter()
            .filter(|(_, present)| !present)
            .map(|(name, _)| name)
            .collect()
    }
}

#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Clone)]
pub struct Profile {
    id: String,
    email: String,
    role: Role,
    #[serde(flatten)]
    personal_info: PersonalInfo,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl Profile {
    pub fn new(
        id: String,
        email: String,
        role: Role,
        personal_info: PersonalInfo,
        created_at: NaiveDateTime,
        updated_at: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            email,
            role,
            personal_info,
            created_at,
            updated_at,
        }
    }
}

#[cfg(any(test, feature = "test"))]
pub mod tests {
    use super::*;

    pub fn jon_doe_info() -> PersonalInfo {
        PersonalInfo::new(
            Some("Jon".to_owned()),
            Some("Doe".to_owned()),
            NaiveDate::from_ymd_opt(1980, 2, 1),
            Some("0612345678".to_owned()),
            Some("1 rue du Green".to_owned()),
            Some("75001".to_owned()),
            Some("Paris".to_owned()),
            None,
            None,
            Some("123456".to_owned()),
            Some(18.4),
            Some("Lyon".to_owned()),
        )
    }

    pub fn jonette_snow_info() -> PersonalInfo {
        PersonalInfo::new(
            Some("Jonette".to_owned()),
            Some("Snow".to_owned()),
            NaiveDate::from_ymd_opt(2001, 7, 14),
            Some("0698765432".to_owned()),
            Some("2 allée du Bunker".to_owned()),
            Some("69002".to_owned()),
            Some("Lyon".to_owned()),
            Some("Jon Snow".to_owned()),
            Some("0611111111".to_owned()),
            None,
            None,
            Some("Élancourt".to_owned()),
        )
    }

    #[test]
    fn should_trim_blank_fields() {
        let info = PersonalInfo {
            firstname: Some("  Jon ".to_owned()),
            lastname: Some("   ".to_owned()),
            ..Default::default()
        }
        .trimmed();

        assert_eq!(Some("Jon".to_owned()), info.firstname);
        assert_eq!(None, info.lastname);
    }

    #[test]
    fn should_list_missing_required_fields() {
        let info = PersonalInfo {
            firstname: Some("Jon".to_owned()),
            city: Some("Paris".to_owned()),
            ..Default::default()
        };

        assert_eq!(
            vec!["lastname", "birthdate", "phone", "address", "postalcode"],
            info.missing_required_fields()
        );
        assert!(jon_doe_info().missing_required_fields().is_empty());
    }

    #[test]
    fn should_parse_role() {
        assert_eq!(Ok(Role::Admin), Role::from_str("admin"));
        assert_eq!(Ok(Role::User), Role::from_str("user"));
        assert!(Role::from_str("root").is_err());
    }
}
