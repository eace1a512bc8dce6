use crate::tools::log_error_and_return;
use crate::web::error::WebError;
use crate::web::session::{Session, SessionStorage};
use derive_getters::Getters;
use dto::profile::Profile;
use rocket::State;
use rocket::http::{Cookie, CookieJar, Status};
use rocket::outcome::{Outcome, try_outcome};
use rocket::request::{self, FromRequest, Request};
use rocket::time::Duration;
use std::sync::Mutex;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "Golf-Session";

/// If an endpoint requires a logged-in user,
/// then its implementation should require a [Session] parameter.
/// Rocket will summon this guard to ensure such a session exists.
/// If it doesn't, then the caller receives an Unauthorized status.
///
/// The session token is passed from the caller to the server using a `Golf-Session` private cookie.
#[rocket::async_trait]
impl<'r> FromRequest<'r> for Session {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let Some(cookie) = req.cookies().get_private(SESSION_COOKIE) else {
            return Outcome::Forward(Status::Unauthorized);
        };

        let session_storage = try_outcome!(req.guard::<&State<Mutex<SessionStorage>>>().await);
        match session_storage.lock() {
            Ok(mut session_storage) => match session_storage.get(cookie.value()) {
                None => Outcome::Forward(Status::Unauthorized),
                Some(session) => Outcome::Success(session.clone()),
            },
            Err(error) => {
                log_error_and_return(Outcome::Error((Status::InternalServerError, ())))(error)
            }
        }
    }
}

/// A session whose user has the admin role.
/// Logged-in users without this role receive a Forbidden status.
#[derive(Debug, Getters, PartialEq, Eq, Clone)]
pub struct AdminSession {
    session: Session,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AdminSession {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let session = try_outcome!(req.guard::<Session>().await);
        if session.is_admin() {
            Outcome::Success(AdminSession { session })
        } else {
            debug!("Admin route refused [user: {}]", session.user_id());
            Outcome::Forward(Status::Forbidden)
        }
    }
}

/// Store a new session for the profile,
/// and hand its token to the caller through a private cookie.
pub fn open_session(
    session_storage: &Mutex<SessionStorage>,
    cookie_jar: &CookieJar<'_>,
    profile: &Profile,
) -> Result<(), WebError> {
    let token = Uuid::new_v4().to_string();
    let mut session_storage = session_storage
        .lock()
        .map_err(log_error_and_return(WebError::SessionStorageUnavailable))?;
    session_storage.store(token.clone(), Session::from(profile));

    let cookie = Cookie::build((SESSION_COOKIE, token))
        .max_age(Duration::days(30))
        .build();
    cookie_jar.add_private(cookie);

    Ok(())
}

pub fn close_session(
    session_storage: &Mutex<SessionStorage>,
    cookie_jar: &CookieJar<'_>,
) -> Result<(), WebError> {
    if let Some(cookie) = cookie_jar.get_private(SESSION_COOKIE) {
        session_storage
            .lock()
            .map_err(log_error_and_return(WebError::SessionStorageUnavailable))?
            .remove(cookie.value());
    }
    cookie_jar.remove_private(SESSION_COOKIE);

    Ok(())
}

/// Log a user out of every device, after their account has changed.
pub fn drop_sessions_of(
    session_storage: &Mutex<SessionStorage>,
    user_id: &str,
) -> Result<(), WebError> {
    let count = session_storage
        .lock()
        .map_err(log_error_and_return(WebError::SessionStorageUnavailable))?
        .remove_user(user_id);
    debug!("Sessions dropped [user: {user_id}, count: {count}]");

    Ok(())
}
