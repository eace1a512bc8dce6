use crate::database::error::DatabaseError;
use crate::database::model::{parse_date, parse_datetime};
use derive_getters::Getters;
use diesel::prelude::*;
use dto::profile::{PersonalInfo, Role};
use std::str::FromStr;

#[derive(Queryable, Selectable, Getters, Debug, PartialEq)]
#[diesel(table_name = crate::database::schema::profile)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct Profile {
    id: String,
    email: String,
    password_hash: String,
    role: String,
    firstname: Option<String>,
    lastname: Option<String>,
    birthdate: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    postalcode: Option<String>,
    city: Option<String>,
    emergencycontact: Option<String>,
    emergencyphone: Option<String>,
    ffglicense: Option<String>,
    golfindex: Option<f64>,
    birthplace: Option<String>,
    created_at: String,
    updated_at: String,
}

impl TryFrom<Profile> for dto::profile::Profile {
    type Error = DatabaseError;

    fn try_from(value: Profile) -> Result<Self, Self::Error> {
        let birthdate = match value.birthdate {
            Some(birthdate) => Some(parse_date(&birthdate)?),
            None => None,
        };
        let personal_info = PersonalInfo::new(
            value.firstname,
            value.lastname,
            birthdate,
            value.phone,
            value.address,
            value.postalcode,
            value.city,
            value.emergencycontact,
            value.emergencyphone,
            value.ffglicense,
            value.golfindex,
            value.birthplace,
        );

        Ok(dto::profile::Profile::new(
            value.id,
            value.email,
            Role::from_str(&value.role)?,
            personal_info,
            parse_datetime(&value.created_at)?,
            parse_datetime(&value.updated_at)?,
        ))
    }
}
