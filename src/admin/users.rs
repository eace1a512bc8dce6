use crate::account::password::hash_password;
use crate::account::{account_error, normalize_email, validate_password};
use crate::database::dao;
use crate::error::Result;
use crate::tools::normalize;
use diesel::SqliteConnection;
use dto::profile::{Profile, Role};
use dto::user::UserSummary;

fn matches_search(profile: &Profile, search: &str) -> bool {
    let info = profile.personal_info();
    [
        Some(profile.email()),
        info.firstname().as_ref(),
        info.lastname().as_ref(),
    ]
    .into_iter()
    .flatten()
    .any(|field| normalize(field).contains(search))
}

/// All accounts, ordered by email, telling whether they have applied at least once.
pub fn list_users(connection: &mut SqliteConnection, search: Option<&str>) -> Result<Vec<UserSummary>> {
    let applicant_ids = dao::application::retrieve_applicant_ids(connection)?;
    let search = search
        .map(str::trim)
        .filter(|search| !search.is_empty())
        .map(normalize);

    Ok(dao::profile::retrieve_all_profiles(connection)?
        .into_iter()
        .filter(|profile| {
            search
                .as_deref()
                .is_none_or(|search| matches_search(profile, search))
        })
        .map(|profile| {
            let info = profile.personal_info();
            UserSummary::new(
                profile.id().clone(),
                profile.email().clone(),
                *profile.role(),
                info.firstname().clone(),
                info.lastname().clone(),
                applicant_ids.contains(profile.id()),
            )
        })
        .collect())
}

pub fn change_role(connection: &mut SqliteConnection, user_id: &str, role: Role) -> Result<()> {
    dao::profile::update_role(connection, user_id, role).map_err(account_error)?;
    info!("Role changed [user: {user_id}, role: {role}]");
    Ok(())
}

/// Returns the email as stored.
pub fn change_email(connection: &mut SqliteConnection, user_id: &str, email: &str) -> Result<String> {
    let email = normalize_email(email)?;
    dao::profile::update_email(connection, user_id, &email).map_err(account_error)?;
    info!("Email changed [user: {user_id}]");
    Ok(email)
}

pub fn reset_password(connection: &mut SqliteConnection, user_id: &str, password: &str) -> Result<()> {
    validate_password(password)?;
    dao::profile::update_password_hash(connection, user_id, &hash_password(password))
        .map_err(account_error)?;
    info!("Password reset [user: {user_id}]");
    Ok(())
}

pub fn delete_user(connection: &mut SqliteConnection, user_id: &str) -> Result<()> {
    dao::profile::delete_profile(connection, user_id).map_err(account_error)?;
    info!("User deleted [user: {user_id}]");
    Ok(())
}
