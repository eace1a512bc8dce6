use crate::database::error::DatabaseError;
use crate::database::model::parse_datetime;
use diesel::prelude::*;
use dto::audit_log::ChangeType;
use std::str::FromStr;

#[derive(Queryable, Selectable, Debug, PartialEq)]
#[diesel(table_name = crate::database::schema::member_audit_log)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct AuditLog {
    id: i32,
    user_id: String,
    year: i32,
    change_type: String,
    old_value: Option<String>,
    new_value: Option<String>,
    created_at: String,
    created_by: String,
}

impl TryFrom<AuditLog> for dto::audit_log::AuditLog {
    type Error = DatabaseError;

    fn try_from(value: AuditLog) -> Result<Self, Self::Error> {
        Ok(dto::audit_log::AuditLog::new(
            value.user_id,
            value.year,
            ChangeType::from_str(&value.change_type)?,
            value.old_value,
            value.new_value,
            parse_datetime(&value.created_at)?,
            value.created_by,
        ))
    }
}
