use super::Result;
use crate::database::error::DatabaseError::NotFound;
use crate::database::model::format_datetime;
use crate::database::model::profile::Profile;
use crate::database::schema::profile::dsl::*;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use dto::profile::{PersonalInfo, Role};

fn ensure_updated(count: usize) -> Result<()> {
    if count == 0 { Err(NotFound) } else { Ok(()) }
}

pub fn insert_profile(
    connection: &mut SqliteConnection,
    profile_id: &str,
    profile_email: &str,
    profile_password_hash: &str,
    profile_role: Role,
    now: &NaiveDateTime,
) -> Result<()> {
    diesel::insert_into(profile)
        .values((
            id.eq(profile_id),
            email.eq(profile_email),
            password_hash.eq(profile_password_hash),
            role.eq(profile_role.code()),
            created_at.eq(format_datetime(now)),
            updated_at.eq(format_datetime(now)),
        ))
        .execute(connection)?;

    Ok(())
}

pub fn retrieve_profile(
    connection: &mut SqliteConnection,
    profile_id: &str,
) -> Result<Option<dto::profile::Profile>> {
    let result = profile
        .find(profile_id)
        .select(Profile::as_select())
        .first(connection)
        .optional()?;

    result.map(dto::profile::Profile::try_from).transpose()
}

/// Retrieve a profile along with its password hash, in order to check credentials.
pub fn retrieve_profile_by_email(
    connection: &mut SqliteConnection,
    profile_email: &str,
) -> Result<Option<(dto::profile::Profile, String)>> {
    let result = profile
        .filter(email.eq(profile_email))
        .select(Profile::as_select())
        .first(connection)
        .optional()?;

    match result {
        None => Ok(None),
        Some(result) => {
            let hash = result.password_hash().clone();
            Ok(Some((dto::profile::Profile::try_from(result)?, hash)))
        }
    }
}

pub fn retrieve_all_profiles(
    connection: &mut SqliteConnection,
) -> Result<Vec<dto::profile::Profile>> {
    let results = profile
        .order(email.asc())
        .select(Profile::as_select())
        .load(connection)?;

    results
        .into_iter()
        .map(dto::profile::Profile::try_from)
        .collect()
}

pub fn update_personal_info(
    connection: &mut SqliteConnection,
    profile_id: &str,
    personal_info: &PersonalInfo,
    now: &NaiveDateTime,
) -> Result<()> {
    let count = diesel::update(profile.find(profile_id))
        .set((
            firstname.eq(personal_info.firstname()),
            lastname.eq(personal_info.lastname()),
            birthdate.eq(personal_info.birthdate().map(|date| date.to_string())),
            phone.eq(personal_info.phone()),
            address.eq(personal_info.address()),
            postalcode.eq(personal_info.postalcode()),
            city.eq(personal_info.city()),
            emergencycontact.eq(personal_info.emergencycontact()),
            emergencyphone.eq(personal_info.emergencyphone()),
            ffglicense.eq(personal_info.ffglicense()),
            golfindex.eq(*personal_info.golfindex()),
            birthplace.eq(personal_info.birthplace()),
            updated_at.eq(format_datetime(now)),
        ))
        .execute(connection)?;

    ensure_updated(count)
}

pub fn update_role(
    connection: &mut SqliteConnection,
    profile_id: &str,
    new_role: Role,
) -> Result<()> {
    let count = diesel::update(profile.find(profile_id))
        .set(role.eq(new_role.code()))
        .execute(connection)?;

    ensure_updated(count)
}

pub fn update_email(
    connection: &mut SqliteConnection,
    profile_id: &str,
    new_email: &str,
) -> Result<()> {
    let count = diesel::update(profile.find(profile_id))
        .set(email.eq(new_email))
        .execute(connection)?;

    ensure_updated(count)
}

pub fn update_password_hash(
    connection: &mut SqliteConnection,
    profile_id: &str,
    new_password_hash: &str,
) -> Result<()> {
    let count = diesel::update(profile.find(profile_id))
        .set(password_hash.eq(new_password_hash))
        .execute(connection)?;

    ensure_updated(count)
}

/// Delete a profile. Its applications, payments and audit log go along.
pub fn delete_profile(connection: &mut SqliteConnection, profile_id: &str) -> Result<()> {
    let count = diesel::delete(profile.find(profile_id)).execute(connection)?;

    ensure_updated(count)
}
