use super::Result;
use crate::database::model::format_datetime;
use crate::database::model::payment::PaymentStatus;
use crate::database::schema::payment_history::dsl::*;
use diesel::prelude::*;

fn to_dtos(results: Vec<PaymentStatus>) -> Result<Vec<dto::payment::PaymentStatus>> {
    results
        .into_iter()
        .map(dto::payment::PaymentStatus::try_from)
        .collect()
}

pub fn retrieve_payment(
    connection: &mut SqliteConnection,
    member_id: &str,
    payment_year: i32,
) -> Result<Option<dto::payment::PaymentStatus>> {
    let result = payment_history
        .filter(profile_id.eq(member_id))
        .filter(year.eq(payment_year))
        .select(PaymentStatus::as_select())
        .first(connection)
        .optional()?;

    result
        .map(dto::payment::PaymentStatus::try_from)
        .transpose()
}

/// Payment history of a member, most recent year first.
pub fn retrieve_payments_for_member(
    connection: &mut SqliteConnection,
    member_id: &str,
) -> Result<Vec<dto::payment::PaymentStatus>> {
    let results = payment_history
        .filter(profile_id.eq(member_id))
        .order(year.desc())
        .select(PaymentStatus::as_select())
        .load(connection)?;

    to_dtos(results)
}

pub fn retrieve_all_payments(
    connection: &mut SqliteConnection,
) -> Result<Vec<dto::payment::PaymentStatus>> {
    let results = payment_history
        .select(PaymentStatus::as_select())
        .load(connection)?;

    to_dtos(results)
}

/// Insert the payment status of a member for a year, or replace it when it already exists.
/// The creation date of an existing row is kept.
pub fn save_payment(
    connection: &mut SqliteConnection,
    payment: &dto::payment::PaymentStatus,
) -> Result<()> {
    let member_type_code = payment.member_type().map(|kind| kind.code());
    let validated_at_text = payment.validated_at().as_ref().map(format_datetime);

    diesel::insert_into(payment_history)
        .values((
            profile_id.eq(payment.profile_id()),
            year.eq(*payment.year()),
            membership_paid.eq(*payment.membership_paid()),
            license_paid.eq(*payment.license_paid()),
            member_type.eq(member_type_code),
            validated.eq(*payment.validated()),
            validated_at.eq(&validated_at_text),
            created_at.eq(format_datetime(payment.created_at())),
        ))
        .on_conflict((profile_id, year))
        .do_update()
        .set((
            membership_paid.eq(*payment.membership_paid()),
            license_paid.eq(*payment.license_paid()),
            member_type.eq(member_type_code),
            validated.eq(*payment.validated()),
            validated_at.eq(&validated_at_text),
        ))
        .execute(connection)?;

    Ok(())
}
