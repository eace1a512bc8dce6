use crate::database::dao;
use crate::error::Result;
use crate::membership::catalog::load_prices;
use crate::membership::error::MembershipError;
use crate::membership::season::membership_year;
use crate::membership::total::compute_total;
use diesel::SqliteConnection;
use dto::payment_info::{BankDetails, PaymentInfo};
use dto::total::Total;

/// Reference members have to put on their bank transfer,
/// e.g. `DOE JON ADH70 LIC78`. The licence part only appears when there's a licence to pay.
pub fn payment_reference(lastname: Option<&str>, firstname: Option<&str>, total: &Total) -> String {
    let mut parts = [lastname, firstname]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_uppercase)
        .collect::<Vec<_>>();

    parts.push(format!("ADH{}", total.membership_amount()));
    if *total.license_amount() > 0.0 {
        parts.push(format!("LIC{}", total.license_amount()));
    }

    parts.join(" ")
}

/// Gather what's needed to pay for an application.
/// Only the applicant and administrators may read it.
pub fn build_payment_info(
    connection: &mut SqliteConnection,
    application_id: &str,
    requester_id: &str,
    requester_is_admin: bool,
    bank_details: &BankDetails,
) -> Result<PaymentInfo> {
    let application = dao::application::retrieve_application(connection, application_id)?
        .ok_or(MembershipError::ApplicationNotFound)?;
    if application.user_id() != requester_id && !requester_is_admin {
        return Err(MembershipError::NotApplicationOwner.into());
    }

    let year = membership_year(&application.created_at().date());
    let prices = load_prices(connection, year)?;
    let total = compute_total(
        *application.membership_type(),
        *application.license_type(),
        &prices,
    );

    let (firstname, lastname) = match dao::profile::retrieve_profile(connection, application.user_id())? {
        Some(profile) => (
            profile.personal_info().firstname().clone(),
            profile.personal_info().lastname().clone(),
        ),
        None => (None, None),
    };
    let reference = payment_reference(lastname.as_deref(), firstname.as_deref(), &total);

    Ok(PaymentInfo::new(
        application,
        firstname,
        lastname,
        year,
        total,
        reference,
        bank_details.clone(),
    ))
}
