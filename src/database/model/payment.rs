use crate::database::error::DatabaseError;
use crate::database::model::parse_datetime;
use diesel::prelude::*;
use dto::payment::MemberType;
use std::str::FromStr;

#[derive(Queryable, Selectable, Debug, PartialEq)]
#[diesel(table_name = crate::database::schema::payment_history)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct PaymentStatus {
    id: i32,
    profile_id: String,
    year: i32,
    membership_paid: bool,
    license_paid: bool,
    member_type: Option<String>,
    validated: bool,
    validated_at: Option<String>,
    created_at: String,
}

impl TryFrom<PaymentStatus> for dto::payment::PaymentStatus {
    type Error = DatabaseError;

    fn try_from(value: PaymentStatus) -> Result<Self, Self::Error> {
        let member_type = match value.member_type {
            Some(member_type) => Some(MemberType::from_str(&member_type)?),
            None => None,
        };
        let validated_at = match value.validated_at {
            Some(validated_at) => Some(parse_datetime(&validated_at)?),
            None => None,
        };

        Ok(dto::payment::PaymentStatus::new(
            value.profile_id,
            value.year,
            value.membership_paid,
            value.license_paid,
            member_type,
            value.validated,
            validated_at,
            parse_datetime(&value.created_at)?,
        ))
    }
}
