use crate::admin::export::{ExportFormat, export, export_file_name};
use crate::admin::listing::{ListingQuery, filter_and_sort, retrieve_overviews};
use crate::admin::payments::PaymentKind;
use crate::admin::{listing, payments};
use crate::database::DatabasePool;
use crate::tools::{log_error_and_return, now};
use crate::web::authentication::AdminSession;
use crate::web::error::error_status;
use dto::payment::{MemberTypeUpdate, ValidationUpdate};
use dto::profile::PersonalInfo;
use rocket::State;
use rocket::http::{ContentType, Header, Status};
use rocket::serde::json::{Json, json};

/// An export, sent as a file to download.
#[derive(Responder)]
pub struct ExportAttachment {
    content: (ContentType, Vec<u8>),
    disposition: Header<'static>,
}

impl ExportAttachment {
    fn new(content: Vec<u8>, format: ExportFormat, file_name: &str) -> Self {
        let content_type = match format {
            ExportFormat::Csv => ContentType::CSV,
            ExportFormat::Xlsx => ContentType::new(
                "application",
                "vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            ),
        };

        Self {
            content: (content_type, content),
            disposition: Header::new(
                "Content-Disposition",
                format!("attachment; filename=\"{file_name}\""),
            ),
        }
    }
}

/// Applications joined with their member and payment status, filtered and sorted,
/// along with statistics over the filtered list.
#[get("/admin/applications?<search>&<membership_type>&<status>&<date_range>&<sort>&<order>")]
#[allow(clippy::too_many_arguments)]
pub async fn list_applications(
    pool: &State<DatabasePool>,
    search: Option<&str>,
    membership_type: Option<&str>,
    status: Option<&str>,
    date_range: Option<&str>,
    sort: Option<&str>,
    order: Option<&str>,
    _admin: AdminSession,
) -> Result<String, Status> {
    let query = ListingQuery::parse(search, membership_type, status, date_range, sort, order)
        .map_err(error_status)?;

    let mut connection = pool
        .get()
        .map_err(log_error_and_return(Status::InternalServerError))?;
    let listing =
        listing::list_applications(&mut connection, &query, &now().date()).map_err(error_status)?;

    Ok(json!(listing).to_string())
}

/// Same filters as the listing, exported as CSV (default) or as an XLSX workbook.
#[get(
    "/admin/applications/export?<search>&<membership_type>&<status>&<date_range>&<sort>&<order>&<format>"
)]
#[allow(clippy::too_many_arguments)]
pub async fn export_applications(
    pool: &State<DatabasePool>,
    search: Option<&str>,
    membership_type: Option<&str>,
    status: Option<&str>,
    date_range: Option<&str>,
    sort: Option<&str>,
    order: Option<&str>,
    format: Option<&str>,
    admin: AdminSession,
) -> Result<ExportAttachment, Status> {
    let query = ListingQuery::parse(search, membership_type, status, date_range, sort, order)
        .map_err(error_status)?;
    let format = ExportFormat::parse(format).map_err(error_status)?;

    let mut connection = pool
        .get()
        .map_err(log_error_and_return(Status::InternalServerError))?;
    let today = now().date();
    let overviews = filter_and_sort(
        retrieve_overviews(&mut connection).map_err(error_status)?,
        &query,
        &today,
    );
    let content = export(&overviews, format).map_err(error_status)?;
    info!(
        "Applications exported [count: {}, format: {}, by: {}]",
        overviews.len(),
        format.extension(),
        admin.session().user_id()
    );

    Ok(ExportAttachment::new(
        content,
        format,
        &export_file_name(&today, format),
    ))
}

#[get("/admin/members/<member_id>/payments")]
pub async fn get_payment_history(
    pool: &State<DatabasePool>,
    member_id: &str,
    _admin: AdminSession,
) -> Result<String, Status> {
    let mut connection = pool
        .get()
        .map_err(log_error_and_return(Status::InternalServerError))?;
    let payments = payments::payment_history(&mut connection, member_id).map_err(error_status)?;

    Ok(json!(payments).to_string())
}

/// Mark the membership or the licence as paid, or unpaid if it was paid.
#[post("/admin/members/<member_id>/payments/<year>/<kind>")]
pub async fn toggle_payment(
    pool: &State<DatabasePool>,
    member_id: &str,
    year: i32,
    kind: PaymentKind,
    admin: AdminSession,
) -> Result<String, Status> {
    let mut connection = pool
        .get()
        .map_err(log_error_and_return(Status::InternalServerError))?;
    let payment = payments::toggle_payment(
        &mut connection,
        member_id,
        year,
        kind,
        admin.session().user_id(),
        &now(),
    )
    .map_err(error_status)?;

    Ok(json!(payment).to_string())
}

#[put(
    "/admin/members/<member_id>/payments/<year>/member-type",
    format = "application/json",
    data = "<update>"
)]
pub async fn set_member_type(
    pool: &State<DatabasePool>,
    member_id: &str,
    year: i32,
    update: Json<MemberTypeUpdate>,
    admin: AdminSession,
) -> Result<String, Status> {
    let mut connection = pool
        .get()
        .map_err(log_error_and_return(Status::InternalServerError))?;
    let payment = payments::set_member_type(
        &mut connection,
        member_id,
        year,
        *update.member_type(),
        admin.session().user_id(),
        &now(),
    )
    .map_err(error_status)?;

    Ok(json!(payment).to_string())
}

#[put(
    "/admin/members/<member_id>/payments/<year>/validation",
    format = "application/json",
    data = "<update>"
)]
pub async fn set_validation(
    pool: &State<DatabasePool>,
    member_id: &str,
    year: i32,
    update: Json<ValidationUpdate>,
    admin: AdminSession,
) -> Result<String, Status> {
    let mut connection = pool
        .get()
        .map_err(log_error_and_return(Status::InternalServerError))?;
    let payment = payments::set_validation(
        &mut connection,
        member_id,
        year,
        *update.validated(),
        admin.session().user_id(),
        &now(),
    )
    .map_err(error_status)?;

    Ok(json!(payment).to_string())
}

#[get("/admin/members/<member_id>/audit-log")]
pub async fn get_audit_log(
    pool: &State<DatabasePool>,
    member_id: &str,
    _admin: AdminSession,
) -> Result<String, Status> {
    let mut connection = pool
        .get()
        .map_err(log_error_and_return(Status::InternalServerError))?;
    let audit_log = payments::audit_log(&mut connection, member_id).map_err(error_status)?;

    Ok(json!(audit_log).to_string())
}

#[put(
    "/admin/members/<member_id>/profile",
    format = "application/json",
    data = "<personal_info>"
)]
pub async fn update_member_profile(
    pool: &State<DatabasePool>,
    member_id: &str,
    personal_info: Json<PersonalInfo>,
    admin: AdminSession,
) -> Result<String, Status> {
    let mut connection = pool
        .get()
        .map_err(log_error_and_return(Status::InternalServerError))?;
    let profile = payments::update_member_info(
        &mut connection,
        member_id,
        personal_info.into_inner(),
        admin.session().user_id(),
        &now(),
    )
    .map_err(error_status)?;

    Ok(json!(profile).to_string())
}
