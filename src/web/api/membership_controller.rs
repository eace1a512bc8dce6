use crate::database::DatabasePool;
use crate::membership::catalog::load_prices;
use crate::membership::eligibility;
use crate::membership::eligibility::check_eligibility;
use crate::membership::reference::build_payment_info;
use crate::membership::season::{membership_year, season};
use crate::membership::total::compute_total;
use crate::tools::{log_error_and_return, now};
use crate::web::error::error_status;
use crate::web::session::Session;
use dto::application::ApplicationRequest;
use dto::license_type::LicenseType;
use dto::membership_type::MembershipType;
use dto::payment_info::BankDetails;
use rocket::State;
use rocket::http::Status;
use rocket::serde::json::{Json, json};
use std::str::FromStr;

/// Membership year, window and renewal flag as of today.
#[get("/membership/season")]
pub async fn get_season() -> String {
    json!(season(&now().date())).to_string()
}

/// Prices of the membership year members currently apply for.
#[get("/membership/prices")]
pub async fn get_prices(pool: &State<DatabasePool>, _session: Session) -> Result<String, Status> {
    let mut connection = pool
        .get()
        .map_err(log_error_and_return(Status::InternalServerError))?;
    let prices =
        load_prices(&mut connection, membership_year(&now().date())).map_err(error_status)?;

    Ok(json!(prices).to_string())
}

#[get("/membership/total?<membership_type>&<license_type>")]
pub async fn get_total(
    pool: &State<DatabasePool>,
    membership_type: &str,
    license_type: &str,
    _session: Session,
) -> Result<String, Status> {
    let membership_type = MembershipType::from_str(membership_type)
        .map_err(log_error_and_return(Status::BadRequest))?;
    let license_type =
        LicenseType::from_str(license_type).map_err(log_error_and_return(Status::BadRequest))?;

    let mut connection = pool
        .get()
        .map_err(log_error_and_return(Status::InternalServerError))?;
    let prices =
        load_prices(&mut connection, membership_year(&now().date())).map_err(error_status)?;

    Ok(json!(compute_total(membership_type, license_type, &prices)).to_string())
}

/// Tell whether the user has already applied for the current membership year.
#[get("/membership/eligibility")]
pub async fn get_eligibility(
    pool: &State<DatabasePool>,
    session: Session,
) -> Result<String, Status> {
    let mut connection = pool
        .get()
        .map_err(log_error_and_return(Status::InternalServerError))?;
    let eligibility = check_eligibility(&mut *connection, session.user_id(), &now().date())
        .map_err(error_status)?;

    Ok(json!(eligibility).to_string())
}

/// Submit the membership form. A second application within the same membership year is refused.
#[post(
    "/membership/applications",
    format = "application/json",
    data = "<request>"
)]
pub async fn submit_application(
    pool: &State<DatabasePool>,
    session: Session,
    request: Json<ApplicationRequest>,
) -> Result<(Status, String), Status> {
    let mut connection = pool
        .get()
        .map_err(log_error_and_return(Status::InternalServerError))?;
    let application = eligibility::submit_application(
        &mut connection,
        session.user_id(),
        request.into_inner(),
        &now(),
    )
    .map_err(error_status)?;

    Ok((Status::Created, json!(application).to_string()))
}

/// Amounts, reference and bank details needed to pay for an application.
#[get("/membership/applications/<application_id>/payment-info")]
pub async fn get_payment_info(
    pool: &State<DatabasePool>,
    bank_details: &State<BankDetails>,
    application_id: &str,
    session: Session,
) -> Result<String, Status> {
    let mut connection = pool
        .get()
        .map_err(log_error_and_return(Status::InternalServerError))?;
    let payment_info = build_payment_info(
        &mut connection,
        application_id,
        session.user_id(),
        session.is_admin(),
        bank_details,
    )
    .map_err(error_status)?;

    Ok(json!(payment_info).to_string())
}
