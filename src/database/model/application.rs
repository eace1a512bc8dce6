use crate::database::error::DatabaseError;
use crate::database::model::parse_datetime;
use diesel::prelude::*;
use dto::license_type::LicenseType;
use dto::membership_type::MembershipType;
use std::str::FromStr;

#[derive(Queryable, Selectable, Debug, PartialEq)]
#[diesel(table_name = crate::database::schema::membership_application)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct MembershipApplication {
    id: String,
    user_id: String,
    membership_type: String,
    license_type: String,
    created_at: String,
}

impl TryFrom<MembershipApplication> for dto::application::MembershipApplication {
    type Error = DatabaseError;

    fn try_from(value: MembershipApplication) -> Result<Self, Self::Error> {
        Ok(dto::application::MembershipApplication::new(
            value.id,
            value.user_id,
            MembershipType::from_str(&value.membership_type)?,
            LicenseType::from_str(&value.license_type)?,
            parse_datetime(&value.created_at)?,
        ))
    }
}
