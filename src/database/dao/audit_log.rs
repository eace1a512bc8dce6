use super::Result;
use crate::database::model::audit_log::AuditLog;
use crate::database::model::format_datetime;
use crate::database::schema::member_audit_log::dsl::*;
use diesel::prelude::*;

pub fn insert_audit_log(
    connection: &mut SqliteConnection,
    audit_log: &dto::audit_log::AuditLog,
) -> Result<()> {
    diesel::insert_into(member_audit_log)
        .values((
            user_id.eq(audit_log.user_id()),
            year.eq(*audit_log.year()),
            change_type.eq(audit_log.change_type().code()),
            old_value.eq(audit_log.old_value()),
            new_value.eq(audit_log.new_value()),
            created_at.eq(format_datetime(audit_log.created_at())),
            created_by.eq(audit_log.created_by()),
        ))
        .execute(connection)?;

    Ok(())
}

/// Changes made on a member, most recent first.
pub fn retrieve_audit_logs(
    connection: &mut SqliteConnection,
    member_id: &str,
) -> Result<Vec<dto::audit_log::AuditLog>> {
    let results = member_audit_log
        .filter(user_id.eq(member_id))
        .order((created_at.desc(), id.desc()))
        .select(AuditLog::as_select())
        .load(connection)?;

    results
        .into_iter()
        .map(dto::audit_log::AuditLog::try_from)
        .collect()
}
