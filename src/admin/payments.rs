use crate::admin::error::AdminError;
use crate::database::dao;
use crate::error::Result;
use crate::membership::season::membership_year;
use chrono::NaiveDateTime;
use diesel::SqliteConnection;
use dto::audit_log::{AuditLog, ChangeType};
use dto::payment::{MemberType, PaymentStatus};
use dto::profile::{PersonalInfo, Profile};
use rocket::request::FromParam;

/// The part of a membership that can be marked as paid.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PaymentKind {
    Membership,
    License,
}

impl PaymentKind {
    fn change_type(&self) -> ChangeType {
        match self {
            PaymentKind::Membership => ChangeType::MembershipPayment,
            PaymentKind::License => ChangeType::LicensePayment,
        }
    }
}

impl<'a> FromParam<'a> for PaymentKind {
    type Error = &'a str;

    fn from_param(param: &'a str) -> Result<Self, Self::Error> {
        match param {
            "membership" => Ok(PaymentKind::Membership),
            "license" => Ok(PaymentKind::License),
            _ => Err(param),
        }
    }
}

fn retrieve_member(connection: &mut SqliteConnection, member_id: &str) -> Result<Profile> {
    Ok(dao::profile::retrieve_profile(connection, member_id)?.ok_or(AdminError::MemberNotFound)?)
}

#[allow(clippy::too_many_arguments)]
fn record_change(
    connection: &mut SqliteConnection,
    member_id: &str,
    year: i32,
    change_type: ChangeType,
    old_value: Option<String>,
    new_value: Option<String>,
    admin_id: &str,
    now: &NaiveDateTime,
) -> Result<()> {
    let audit_log = AuditLog::new(
        member_id.to_owned(),
        year,
        change_type,
        old_value,
        new_value,
        *now,
        admin_id.to_owned(),
    );
    dao::audit_log::insert_audit_log(connection, &audit_log)?;
    info!("Member updated [member: {member_id}, year: {year}, change: {change_type}, by: {admin_id}]");

    Ok(())
}

fn retrieve_or_create_payment(
    connection: &mut SqliteConnection,
    member_id: &str,
    year: i32,
    now: &NaiveDateTime,
) -> Result<PaymentStatus> {
    Ok(dao::payment::retrieve_payment(connection, member_id, year)?
        .unwrap_or_else(|| PaymentStatus::unpaid(member_id.to_owned(), year, *now)))
}

/// Flip the paid flag of the membership or the licence.
/// The payment status is created on first change.
pub fn toggle_payment(
    connection: &mut SqliteConnection,
    member_id: &str,
    year: i32,
    kind: PaymentKind,
    admin_id: &str,
    now: &NaiveDateTime,
) -> Result<PaymentStatus> {
    connection.immediate_transaction(|connection| {
        retrieve_member(connection, member_id)?;
        let mut payment = retrieve_or_create_payment(connection, member_id, year, now)?;

        let was_paid = match kind {
            PaymentKind::Membership => *payment.membership_paid(),
            PaymentKind::License => *payment.license_paid(),
        };
        match kind {
            PaymentKind::Membership => payment.set_membership_paid(!was_paid),
            PaymentKind::License => payment.set_license_paid(!was_paid),
        }
        dao::payment::save_payment(connection, &payment)?;
        record_change(
            connection,
            member_id,
            year,
            kind.change_type(),
            Some(was_paid.to_string()),
            Some((!was_paid).to_string()),
            admin_id,
            now,
        )?;

        Ok(payment)
    })
}

pub fn set_member_type(
    connection: &mut SqliteConnection,
    member_id: &str,
    year: i32,
    member_type: Option<MemberType>,
    admin_id: &str,
    now: &NaiveDateTime,
) -> Result<PaymentStatus> {
    connection.immediate_transaction(|connection| {
        retrieve_member(connection, member_id)?;
        let mut payment = retrieve_or_create_payment(connection, member_id, year, now)?;

        let old_member_type = *payment.member_type();
        payment.set_member_type(member_type);
        dao::payment::save_payment(connection, &payment)?;
        record_change(
            connection,
            member_id,
            year,
            ChangeType::MemberType,
            old_member_type.map(|member_type| member_type.code().to_owned()),
            member_type.map(|member_type| member_type.code().to_owned()),
            admin_id,
            now,
        )?;

        Ok(payment)
    })
}

/// Mark the member as processed, or not, for the year.
/// Only a member whose payment has been followed already can be validated.
pub fn set_validation(
    connection: &mut SqliteConnection,
    member_id: &str,
    year: i32,
    validated: bool,
    admin_id: &str,
    now: &NaiveDateTime,
) -> Result<PaymentStatus> {
    connection.immediate_transaction(|connection| {
        retrieve_member(connection, member_id)?;
        let mut payment = dao::payment::retrieve_payment(connection, member_id, year)?
            .ok_or(AdminError::PaymentNotFound(year))?;

        let was_validated = *payment.validated();
        payment.set_validated(validated, *now);
        dao::payment::save_payment(connection, &payment)?;
        record_change(
            connection,
            member_id,
            year,
            ChangeType::ValidationStatus,
            Some(was_validated.to_string()),
            Some(validated.to_string()),
            admin_id,
            now,
        )?;

        Ok(payment)
    })
}

/// Replace the personal info of a member. Old and new values are kept in the audit log as JSON.
pub fn update_member_info(
    connection: &mut SqliteConnection,
    member_id: &str,
    personal_info: PersonalInfo,
    admin_id: &str,
    now: &NaiveDateTime,
) -> Result<Profile> {
    let personal_info = personal_info.trimmed();

    connection.immediate_transaction(|connection| {
        let member = retrieve_member(connection, member_id)?;
        dao::profile::update_personal_info(connection, member_id, &personal_info, now)?;
        record_change(
            connection,
            member_id,
            membership_year(&now.date()),
            ChangeType::PersonalInfo,
            rocket::serde::json::to_string(member.personal_info()).ok(),
            rocket::serde::json::to_string(&personal_info).ok(),
            admin_id,
            now,
        )?;

        retrieve_member(connection, member_id)
    })
}

pub fn payment_history(
    connection: &mut SqliteConnection,
    member_id: &str,
) -> Result<Vec<PaymentStatus>> {
    retrieve_member(connection, member_id)?;
    Ok(dao::payment::retrieve_payments_for_member(connection, member_id)?)
}

pub fn audit_log(connection: &mut SqliteConnection, member_id: &str) -> Result<Vec<AuditLog>> {
    retrieve_member(connection, member_id)?;
    Ok(dao::audit_log::retrieve_audit_logs(connection, member_id)?)
}

#[cfg(test)]
mod tests {
    mod payment_kind {
        use crate::admin::payments::PaymentKind;
        use rocket::request::FromParam;

        #[test]
        fn should_parse_param() {
            assert_eq!(Ok(PaymentKind::Membership), PaymentKind::from_param("membership"));
            assert_eq!(Ok(PaymentKind::License), PaymentKind::from_param("license"));
            assert_eq!(Err("fees"), PaymentKind::from_param("fees"));
        }
    }

    mod toggle_payment {
        use crate::admin::error::AdminError;
        use crate::admin::payments::{PaymentKind, audit_log, toggle_payment};
        use crate::database::dao;
        use crate::database::dao::profile::tests::insert_test_profile;
        use crate::database::with_temp_database;
        use crate::error::ApplicationError;
        use crate::tools::test::tests::datetime;
        use dto::audit_log::ChangeType;

        #[test]
        fn should_create_payment_on_first_change() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();
                let member_id = insert_test_profile(&mut connection, "jon@doe.com");
                let now = datetime(2025, 9, 5, 9, 0);

                let result =
                    toggle_payment(&mut connection, &member_id, 2026, PaymentKind::License, "admin", &now)
                        .unwrap();

                assert!(*result.license_paid());
                assert!(!*result.membership_paid());
                assert_eq!(
                    Some(result),
                    dao::payment::retrieve_payment(&mut connection, &member_id, 2026).unwrap()
                );
            })
        }

        #[test]
        fn should_toggle_back_and_audit_each_change() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();
                let member_id = insert_test_profile(&mut connection, "jon@doe.com");

                toggle_payment(
                    &mut connection,
                    &member_id,
                    2026,
                    PaymentKind::Membership,
                    "admin",
                    &datetime(2025, 9, 5, 9, 0),
                )
                .unwrap();
                let result = toggle_payment(
                    &mut connection,
                    &member_id,
                    2026,
                    PaymentKind::Membership,
                    "admin",
                    &datetime(2025, 9, 6, 9, 0),
                )
                .unwrap();

                assert!(!*result.membership_paid());
                let logs = audit_log(&mut connection, &member_id).unwrap();
                assert_eq!(2, logs.len());
                let last = logs.first().unwrap();
                assert_eq!(&ChangeType::MembershipPayment, last.change_type());
                assert_eq!(&Some("true".to_owned()), last.old_value());
                assert_eq!(&Some("false".to_owned()), last.new_value());
                assert_eq!("admin", last.created_by());
            })
        }

        #[test]
        fn fail_when_member_does_not_exist() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();

                let result = toggle_payment(
                    &mut connection,
                    "unknown",
                    2026,
                    PaymentKind::Membership,
                    "admin",
                    &datetime(2025, 9, 5, 9, 0),
                );

                assert!(matches!(
                    result,
                    Err(ApplicationError::Admin(AdminError::MemberNotFound))
                ));
            })
        }
    }

    mod set_member_type {
        use crate::admin::payments::{audit_log, set_member_type};
        use crate::database::dao::profile::tests::insert_test_profile;
        use crate::database::with_temp_database;
        use crate::tools::test::tests::datetime;
        use dto::payment::MemberType;

        #[test]
        fn should_record_old_and_new_member_types() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();
                let member_id = insert_test_profile(&mut connection, "jon@doe.com");
                let now = datetime(2025, 9, 5, 9, 0);

                set_member_type(&mut connection, &member_id, 2026, Some(MemberType::Agse), "admin", &now)
                    .unwrap();
                let result = set_member_type(
                    &mut connection,
                    &member_id,
                    2026,
                    Some(MemberType::Rattache),
                    "admin",
                    &now,
                )
                .unwrap();

                assert_eq!(&Some(MemberType::Rattache), result.member_type());
                let logs = audit_log(&mut connection, &member_id).unwrap();
                let values = logs
                    .iter()
                    .map(|log| (log.old_value().clone(), log.new_value().clone()))
                    .collect::<Vec<_>>();
                // Same timestamp: most recent id first
                assert_eq!(
                    vec![
                        (Some("AGSE".to_owned()), Some("RATTACHE".to_owned())),
                        (None, Some("AGSE".to_owned())),
                    ],
                    values
                );
            })
        }
    }

    mod set_validation {
        use crate::admin::error::AdminError;
        use crate::admin::payments::{PaymentKind, set_validation, toggle_payment};
        use crate::database::dao::profile::tests::insert_test_profile;
        use crate::database::with_temp_database;
        use crate::error::ApplicationError;
        use crate::tools::test::tests::datetime;

        #[test]
        fn should_set_then_clear_validation_date() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();
                let member_id = insert_test_profile(&mut connection, "jon@doe.com");
                let now = datetime(2025, 9, 5, 9, 0);
                toggle_payment(&mut connection, &member_id, 2026, PaymentKind::Membership, "admin", &now)
                    .unwrap();

                let validated =
                    set_validation(&mut connection, &member_id, 2026, true, "admin", &now).unwrap();
                let unvalidated =
                    set_validation(&mut connection, &member_id, 2026, false, "admin", &now).unwrap();

                assert!(*validated.validated());
                assert_eq!(&Some(now), validated.validated_at());
                assert!(!*unvalidated.validated());
                assert_eq!(&None, unvalidated.validated_at());
            })
        }

        #[test]
        fn fail_when_no_payment_recorded() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();
                let member_id = insert_test_profile(&mut connection, "jon@doe.com");

                let result = set_validation(
                    &mut connection,
                    &member_id,
                    2026,
                    true,
                    "admin",
                    &datetime(2025, 9, 5, 9, 0),
                );

                assert!(matches!(
                    result,
                    Err(ApplicationError::Admin(AdminError::PaymentNotFound(2026)))
                ));
            })
        }
    }

    mod update_member_info {
        use crate::admin::payments::{audit_log, update_member_info};
        use crate::database::dao::profile::tests::insert_test_profile;
        use crate::database::with_temp_database;
        use crate::tools::test::tests::datetime;
        use dto::audit_log::ChangeType;
        use dto::profile::tests::jon_doe_info;

        #[test]
        fn should_update_profile_and_audit_change() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();
                let member_id = insert_test_profile(&mut connection, "jon@doe.com");
                let now = datetime(2025, 10, 5, 9, 0);

                let result =
                    update_member_info(&mut connection, &member_id, jon_doe_info(), "admin", &now)
                        .unwrap();

                assert_eq!(&jon_doe_info(), result.personal_info());
                assert_eq!(&now, result.updated_at());
                let logs = audit_log(&mut connection, &member_id).unwrap();
                let log = logs.first().unwrap();
                assert_eq!(&ChangeType::PersonalInfo, log.change_type());
                assert_eq!(&2026, log.year());
                assert!(log.new_value().as_ref().unwrap().contains("\"lastname\":\"Doe\""));
                assert!(log.old_value().as_ref().unwrap().contains("\"lastname\":null"));
            })
        }
    }

    mod payment_history {
        use crate::admin::error::AdminError;
        use crate::admin::payments::{PaymentKind, payment_history, toggle_payment};
        use crate::database::dao::profile::tests::insert_test_profile;
        use crate::database::with_temp_database;
        use crate::error::ApplicationError;
        use crate::tools::test::tests::datetime;

        #[test]
        fn should_list_most_recent_year_first() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();
                let member_id = insert_test_profile(&mut connection, "jon@doe.com");
                let now = datetime(2025, 9, 5, 9, 0);
                for year in [2025, 2026] {
                    toggle_payment(&mut connection, &member_id, year, PaymentKind::Membership, "admin", &now)
                        .unwrap();
                }

                let result = payment_history(&mut connection, &member_id).unwrap();

                assert_eq!(
                    vec![2026, 2025],
                    result.iter().map(|payment| *payment.year()).collect::<Vec<_>>()
                );
            })
        }

        #[test]
        fn fail_when_member_does_not_exist() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();

                let result = payment_history(&mut connection, "unknown");

                assert!(matches!(
                    result,
                    Err(ApplicationError::Admin(AdminError::MemberNotFound))
                ));
            })
        }
    }
}
