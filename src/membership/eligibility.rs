use crate::database::dao;
use crate::database::error::DatabaseError;
use crate::error::Result;
use crate::membership::error::MembershipError;
use crate::membership::season::MembershipWindow;
use chrono::{NaiveDate, NaiveDateTime};
use diesel::SqliteConnection;
use dto::application::{ApplicationRequest, Eligibility, MembershipApplication};
use uuid::Uuid;

/// Where applications are looked up when checking whether a member may apply.
pub trait ApplicationLookup {
    /// Applications of the user created within `[since, until)`.
    fn applications_between(
        &mut self,
        user_id: &str,
        since: &NaiveDateTime,
        until: &NaiveDateTime,
    ) -> Result<Vec<MembershipApplication>, DatabaseError>;
}

impl ApplicationLookup for SqliteConnection {
    fn applications_between(
        &mut self,
        user_id: &str,
        since: &NaiveDateTime,
        until: &NaiveDateTime,
    ) -> Result<Vec<MembershipApplication>, DatabaseError> {
        dao::application::retrieve_applications_for_user(self, user_id, since, until)
    }
}

/// Whether the user has already applied during the membership window containing the reference date.
pub fn has_existing_application<L: ApplicationLookup>(
    store: &mut L,
    user_id: &str,
    reference: &NaiveDate,
) -> Result<bool, DatabaseError> {
    let window = MembershipWindow::containing(reference);
    let applications =
        store.applications_between(user_id, &window.start_time(), &window.end_time())?;

    Ok(!applications.is_empty())
}

pub fn check_eligibility<L: ApplicationLookup>(
    store: &mut L,
    user_id: &str,
    reference: &NaiveDate,
) -> Result<Eligibility> {
    let window = MembershipWindow::containing(reference);
    let has_existing_application = has_existing_application(store, user_id, reference)?;

    Ok(Eligibility::new(
        window.membership_year(),
        has_existing_application,
    ))
}

/// Record a membership application, and save the personal info it carries into the member's profile.
/// The check for an earlier application and the insertion happen in a single transaction,
/// so that two concurrent submissions can't both succeed.
pub fn submit_application(
    connection: &mut SqliteConnection,
    user_id: &str,
    request: ApplicationRequest,
    now: &NaiveDateTime,
) -> Result<MembershipApplication> {
    let personal_info = request.personal_info().clone().trimmed();
    let missing_fields = personal_info.missing_required_fields();
    if !missing_fields.is_empty() {
        return Err(MembershipError::IncompleteForm(missing_fields).into());
    }

    let application = MembershipApplication::new(
        Uuid::new_v4().to_string(),
        user_id.to_owned(),
        *request.membership_type(),
        *request.license_type(),
        *now,
    );

    connection.immediate_transaction(|connection| {
        if has_existing_application(connection, user_id, &now.date())? {
            let window = MembershipWindow::containing(&now.date());
            return Err(MembershipError::ApplicationAlreadyExists(window.membership_year()).into());
        }

        dao::profile::update_personal_info(connection, user_id, &personal_info, now)?;
        dao::application::insert_application(connection, &application)?;
        info!(
            "Application submitted [user: {user_id}, type: {}, licence: {}]",
            application.membership_type(),
            application.license_type()
        );

        Ok(application)
    })
}
