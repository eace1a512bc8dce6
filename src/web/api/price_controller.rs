use crate::database::DatabasePool;
use crate::membership::catalog;
use crate::tools::log_error_and_return;
use crate::web::authentication::AdminSession;
use crate::web::error::error_status;
use dto::price::PriceUpdate;
use rocket::State;
use rocket::http::Status;
use rocket::serde::json::{Json, json};

#[get("/admin/prices/<year>")]
pub async fn get_prices(
    pool: &State<DatabasePool>,
    year: i32,
    _admin: AdminSession,
) -> Result<String, Status> {
    let mut connection = pool
        .get()
        .map_err(log_error_and_return(Status::InternalServerError))?;
    let prices = catalog::load_prices(&mut connection, year).map_err(error_status)?;

    Ok(json!(prices).to_string())
}

/// Create or update prices of a year. The whole catalog of the year is returned.
#[put("/admin/prices/<year>", format = "application/json", data = "<updates>")]
pub async fn save_prices(
    pool: &State<DatabasePool>,
    year: i32,
    updates: Json<Vec<PriceUpdate>>,
    admin: AdminSession,
) -> Result<String, Status> {
    let mut connection = pool
        .get()
        .map_err(log_error_and_return(Status::InternalServerError))?;
    let prices = catalog::save_prices(&mut connection, year, &updates).map_err(error_status)?;
    info!("Prices updated [year: {year}, by: {}]", admin.session().user_id());

    Ok(json!(prices).to_string())
}

/// Copy the prices of a year into the following one, which must have no price yet.
#[post("/admin/prices/<year>/copy-forward")]
pub async fn copy_prices_forward(
    pool: &State<DatabasePool>,
    year: i32,
    _admin: AdminSession,
) -> Result<(Status, String), Status> {
    let mut connection = pool
        .get()
        .map_err(log_error_and_return(Status::InternalServerError))?;
    let prices = catalog::copy_prices_forward(&mut connection, year).map_err(error_status)?;

    Ok((Status::Created, json!(prices).to_string()))
}

/// Catalog entries without a price for the year.
#[get("/admin/prices/<year>/missing")]
pub async fn get_missing_prices(
    pool: &State<DatabasePool>,
    year: i32,
    _admin: AdminSession,
) -> Result<String, Status> {
    let mut connection = pool
        .get()
        .map_err(log_error_and_return(Status::InternalServerError))?;
    let prices = catalog::load_prices(&mut connection, year).map_err(error_status)?;

    Ok(json!(catalog::missing_codes(&prices)).to_string())
}
