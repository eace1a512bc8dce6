use crate::account::error::AccountError;
use crate::account::password::{hash_password, verify_password};
use crate::database::dao;
use crate::database::error::DatabaseError;
use crate::error::{ApplicationError, Result};
use crate::tools::env_args::retrieve_arg_value;
use chrono::NaiveDateTime;
use diesel::SqliteConnection;
use dto::account::Credentials;
use dto::profile::{PersonalInfo, Profile, Role};
use regex::Regex;
use std::sync::LazyLock;
use uuid::Uuid;

pub(crate) mod error;
pub(crate) mod password;

pub const MIN_PASSWORD_LENGTH: usize = 8;
const ADMIN_EMAIL_ARG: &str = "--admin-email";

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

/// Emails are compared case-insensitively, so they're stored lowercase.
pub fn normalize_email(email: &str) -> Result<String, AccountError> {
    let email = email.trim().to_lowercase();
    if EMAIL_REGEX.is_match(&email) {
        Ok(email)
    } else {
        Err(AccountError::InvalidEmail(email))
    }
}

pub fn validate_password(password: &str) -> Result<(), AccountError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        Err(AccountError::PasswordTooShort(MIN_PASSWORD_LENGTH))
    } else {
        Ok(())
    }
}

/// Unknown profiles and unique violations on the email column become account errors.
pub(crate) fn account_error(error: DatabaseError) -> ApplicationError {
    match error {
        DatabaseError::NotFound => AccountError::UserNotFound.into(),
        DatabaseError::AlreadyExists => AccountError::EmailAlreadyUsed.into(),
        error => error.into(),
    }
}

/// Create a new account with the `user` role.
pub fn register(
    connection: &mut SqliteConnection,
    credentials: &Credentials,
    now: &NaiveDateTime,
) -> Result<Profile> {
    let email = normalize_email(credentials.email())?;
    validate_password(credentials.password())?;

    let id = Uuid::new_v4().to_string();
    let password_hash = hash_password(credentials.password());
    dao::profile::insert_profile(connection, &id, &email, &password_hash, Role::User, now)
        .map_err(account_error)?;
    info!("Account created [id: {id}]");

    Ok(dao::profile::retrieve_profile(connection, &id)?.ok_or(AccountError::UserNotFound)?)
}

/// Check credentials and return the matching profile.
/// Unknown email and wrong password are not told apart.
pub fn authenticate(connection: &mut SqliteConnection, credentials: &Credentials) -> Result<Profile> {
    let email = credentials.email().trim().to_lowercase();
    match dao::profile::retrieve_profile_by_email(connection, &email)? {
        Some((profile, password_hash)) if verify_password(credentials.password(), &password_hash) => {
            Ok(profile)
        }
        _ => {
            debug!("Failed login attempt [email: {email}]");
            Err(AccountError::WrongCredentials.into())
        }
    }
}

/// Grant the admin role to the account given by `--admin-email`, if any.
/// This is how the first administrator gets created.
pub fn promote_bootstrap_admin(connection: &mut SqliteConnection) -> Result<()> {
    let Some(email) = retrieve_arg_value(ADMIN_EMAIL_ARG) else {
        return Ok(());
    };
    let email = email.trim().to_lowercase();

    match dao::profile::retrieve_profile_by_email(connection, &email)? {
        Some((profile, _)) if *profile.role() == Role::Admin => {
            debug!("Bootstrap admin already has the admin role [email: {email}]");
        }
        Some((profile, _)) => {
            dao::profile::update_role(connection, profile.id(), Role::Admin)?;
            info!("Bootstrap admin promoted [email: {email}]");
        }
        None => warn!("No account matches the bootstrap admin [email: {email}]"),
    }

    Ok(())
}

pub fn retrieve_own_profile(connection: &mut SqliteConnection, user_id: &str) -> Result<Profile> {
    Ok(dao::profile::retrieve_profile(connection, user_id)?.ok_or(AccountError::UserNotFound)?)
}

/// Blank fields are stored as missing.
pub fn update_own_profile(
    connection: &mut SqliteConnection,
    user_id: &str,
    personal_info: PersonalInfo,
    now: &NaiveDateTime,
) -> Result<Profile> {
    let personal_info = personal_info.trimmed();
    dao::profile::update_personal_info(connection, user_id, &personal_info, now)
        .map_err(account_error)?;

    retrieve_own_profile(connection, user_id)
}
