use crate::admin::users;
use crate::database::DatabasePool;
use crate::tools::log_error_and_return;
use crate::web::authentication::{AdminSession, drop_sessions_of};
use crate::web::error::error_status;
use crate::web::session::SessionStorage;
use dto::user::{EmailUpdate, PasswordUpdate, RoleUpdate};
use rocket::State;
use rocket::http::Status;
use rocket::serde::json::{Json, json};
use std::sync::Mutex;

#[get("/admin/users?<search>")]
pub async fn list_users(
    pool: &State<DatabasePool>,
    search: Option<&str>,
    _admin: AdminSession,
) -> Result<String, Status> {
    let mut connection = pool
        .get()
        .map_err(log_error_and_return(Status::InternalServerError))?;
    let users = users::list_users(&mut connection, search).map_err(error_status)?;

    Ok(json!(users).to_string())
}

/// Open sessions of the user are dropped, so the new role applies on next login.
#[put("/admin/users/<user_id>/role", format = "application/json", data = "<update>")]
pub async fn change_role(
    pool: &State<DatabasePool>,
    session_storage: &State<Mutex<SessionStorage>>,
    user_id: &str,
    update: Json<RoleUpdate>,
    admin: AdminSession,
) -> Result<Status, Status> {
    let mut connection = pool
        .get()
        .map_err(log_error_and_return(Status::InternalServerError))?;
    users::change_role(&mut connection, user_id, *update.role()).map_err(error_status)?;
    drop_sessions_of(session_storage, user_id).map_err(error_status)?;
    debug!("Role change done by {}", admin.session().user_id());

    Ok(Status::NoContent)
}

#[put("/admin/users/<user_id>/email", format = "application/json", data = "<update>")]
pub async fn change_email(
    pool: &State<DatabasePool>,
    session_storage: &State<Mutex<SessionStorage>>,
    user_id: &str,
    update: Json<EmailUpdate>,
    _admin: AdminSession,
) -> Result<String, Status> {
    let mut connection = pool
        .get()
        .map_err(log_error_and_return(Status::InternalServerError))?;
    let email =
        users::change_email(&mut connection, user_id, update.email()).map_err(error_status)?;
    drop_sessions_of(session_storage, user_id).map_err(error_status)?;

    Ok(json!(EmailUpdate::new(email)).to_string())
}

#[put("/admin/users/<user_id>/password", format = "application/json", data = "<update>")]
pub async fn reset_password(
    pool: &State<DatabasePool>,
    session_storage: &State<Mutex<SessionStorage>>,
    user_id: &str,
    update: Json<PasswordUpdate>,
    _admin: AdminSession,
) -> Result<Status, Status> {
    let mut connection = pool
        .get()
        .map_err(log_error_and_return(Status::InternalServerError))?;
    users::reset_password(&mut connection, user_id, update.password()).map_err(error_status)?;
    drop_sessions_of(session_storage, user_id).map_err(error_status)?;

    Ok(Status::NoContent)
}

/// Applications, payments and audit entries of the user go with it.
#[delete("/admin/users/<user_id>")]
pub async fn delete_user(
    pool: &State<DatabasePool>,
    session_storage: &State<Mutex<SessionStorage>>,
    user_id: &str,
    admin: AdminSession,
) -> Result<Status, Status> {
    let mut connection = pool
        .get()
        .map_err(log_error_and_return(Status::InternalServerError))?;
    users::delete_user(&mut connection, user_id).map_err(error_status)?;
    drop_sessions_of(session_storage, user_id).map_err(error_status)?;
    debug!("User deletion done by {}", admin.session().user_id());

    Ok(Status::NoContent)
}
