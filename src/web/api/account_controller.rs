use crate::account;
use crate::database::DatabasePool;
use crate::tools::{log_error_and_return, now};
use crate::web::authentication::{close_session, open_session};
use crate::web::error::error_status;
use crate::web::session::{Session, SessionStorage};
use dto::account::{AccountSummary, Credentials};
use dto::profile::{PersonalInfo, Profile};
use rocket::State;
use rocket::http::{CookieJar, Status};
use rocket::serde::json::{Json, json};
use std::sync::Mutex;

fn summary(profile: &Profile) -> String {
    json!(AccountSummary::new(
        profile.id().clone(),
        profile.email().clone(),
        *profile.role()
    ))
    .to_string()
}

/// Create an account with the `user` role, then log its owner in.
#[post("/account/register", format = "application/json", data = "<credentials>")]
pub async fn register(
    pool: &State<DatabasePool>,
    session_storage: &State<Mutex<SessionStorage>>,
    cookie_jar: &CookieJar<'_>,
    credentials: Json<Credentials>,
) -> Result<(Status, String), Status> {
    let mut connection = pool
        .get()
        .map_err(log_error_and_return(Status::InternalServerError))?;
    let profile = account::register(&mut connection, &credentials, &now()).map_err(error_status)?;
    open_session(session_storage, cookie_jar, &profile).map_err(error_status)?;

    Ok((Status::Created, summary(&profile)))
}

/// Check the credentials and open a session.
/// The session token is returned to the caller through a private cookie.
#[post("/account/login", format = "application/json", data = "<credentials>")]
pub async fn login(
    pool: &State<DatabasePool>,
    session_storage: &State<Mutex<SessionStorage>>,
    cookie_jar: &CookieJar<'_>,
    credentials: Json<Credentials>,
) -> Result<String, Status> {
    let mut connection = pool
        .get()
        .map_err(log_error_and_return(Status::InternalServerError))?;
    let profile = account::authenticate(&mut connection, &credentials).map_err(error_status)?;
    open_session(session_storage, cookie_jar, &profile).map_err(error_status)?;
    info!("User logged in [user: {}]", profile.id());

    Ok(summary(&profile))
}

#[post("/account/logout")]
pub async fn logout(
    session_storage: &State<Mutex<SessionStorage>>,
    cookie_jar: &CookieJar<'_>,
    _session: Session,
) -> Result<Status, Status> {
    close_session(session_storage, cookie_jar).map_err(error_status)?;

    Ok(Status::NoContent)
}

#[get("/account/profile")]
pub async fn get_profile(pool: &State<DatabasePool>, session: Session) -> Result<String, Status> {
    let mut connection = pool
        .get()
        .map_err(log_error_and_return(Status::InternalServerError))?;
    let profile =
        account::retrieve_own_profile(&mut connection, session.user_id()).map_err(error_status)?;

    Ok(json!(profile).to_string())
}

#[put("/account/profile", format = "application/json", data = "<personal_info>")]
pub async fn update_profile(
    pool: &State<DatabasePool>,
    session: Session,
    personal_info: Json<PersonalInfo>,
) -> Result<String, Status> {
    let mut connection = pool
        .get()
        .map_err(log_error_and_return(Status::InternalServerError))?;
    let profile = account::update_own_profile(
        &mut connection,
        session.user_id(),
        personal_info.into_inner(),
        &now(),
    )
    .map_err(error_status)?;

    Ok(json!(profile).to_string())
}

#[cfg(test)]
mod tests {
    mod register {
        use crate::database::{DatabasePool, with_temp_database};
        use crate::web::api::account_controller::{get_profile, register};
        use crate::web::authentication::SESSION_COOKIE;
        use crate::web::session::SessionStorage;
        use dto::account::{AccountSummary, Credentials};
        use dto::profile::Role;
        use rocket::http::{ContentType, Status};
        use rocket::local::asynchronous::Client;
        use rocket::serde::json::json;
        use rocket::tokio::runtime::Runtime;
        use std::sync::Mutex;

        #[test]
        fn should_open_session() {
            async fn test(pool: DatabasePool) {
                let rocket = rocket::build()
                    .manage(pool)
                    .manage(Mutex::new(SessionStorage::default()))
                    .mount("/", routes![register, get_profile]);
                let client = Client::tracked(rocket).await.unwrap();
                let credentials =
                    Credentials::new("Jon@Doe.com".to_owned(), "birdie-putt".to_owned());

                let response = client
                    .post("/account/register")
                    .header(ContentType::JSON)
                    .body(json!(credentials).to_string())
                    .dispatch()
                    .await;

                assert_eq!(Status::Created, response.status());
                assert!(response.cookies().get_private(SESSION_COOKIE).is_some());
                let summary: AccountSummary = response.into_json().await.unwrap();
                assert_eq!("jon@doe.com", summary.email());
                assert_eq!(&Role::User, summary.role());

                // The tracked client sends the session cookie back
                let response = client.get("/account/profile").dispatch().await;
                assert_eq!(Status::Ok, response.status());
            }

            with_temp_database(|pool| Runtime::new().unwrap().block_on(test(pool)));
        }

        #[test]
        fn should_refuse_used_email() {
            async fn test(pool: DatabasePool) {
                let rocket = rocket::build()
                    .manage(pool)
                    .manage(Mutex::new(SessionStorage::default()))
                    .mount("/", routes![register]);
                let client = Client::tracked(rocket).await.unwrap();
                let credentials =
                    Credentials::new("jon@doe.com".to_owned(), "birdie-putt".to_owned());

                for expected_status in [Status::Created, Status::Conflict] {
                    let response = client
                        .post("/account/register")
                        .header(ContentType::JSON)
                        .body(json!(credentials).to_string())
                        .dispatch()
                        .await;
                    assert_eq!(expected_status, response.status());
                }
            }

            with_temp_database(|pool| Runtime::new().unwrap().block_on(test(pool)));
        }

        #[test]
        fn should_refuse_short_password() {
            async fn test(pool: DatabasePool) {
                let rocket = rocket::build()
                    .manage(pool)
                    .manage(Mutex::new(SessionStorage::default()))
                    .mount("/", routes![register]);
                let client = Client::tracked(rocket).await.unwrap();
                let credentials = Credentials::new("jon@doe.com".to_owned(), "putt".to_owned());

                let response = client
                    .post("/account/register")
                    .header(ContentType::JSON)
                    .body(json!(credentials).to_string())
                    .dispatch()
                    .await;

                assert_eq!(Status::BadRequest, response.status());
            }

            with_temp_database(|pool| Runtime::new().unwrap().block_on(test(pool)));
        }
    }

    mod login {
        use crate::account::register;
        use crate::account::tests::{TEST_PASSWORD, get_test_credentials};
        use crate::database::{DatabasePool, with_temp_database};
        use crate::tools::test::tests::datetime;
        use crate::web::api::account_controller::{login, logout};
        use crate::web::authentication::SESSION_COOKIE;
        use crate::web::session::SessionStorage;
        use dto::account::Credentials;
        use rocket::http::{ContentType, Status};
        use rocket::local::asynchronous::Client;
        use rocket::serde::json::json;
        use rocket::tokio::runtime::Runtime;
        use std::sync::Mutex;

        #[test]
        fn should_login_then_logout() {
            async fn test(pool: DatabasePool) {
                let mut connection = pool.get().unwrap();
                register(
                    &mut connection,
                    &get_test_credentials("jon@doe.com"),
                    &datetime(2025, 9, 1, 8, 0),
                )
                .unwrap();

                let rocket = rocket::build()
                    .manage(pool)
                    .manage(Mutex::new(SessionStorage::default()))
                    .mount("/", routes![login, logout]);
                let client = Client::tracked(rocket).await.unwrap();

                let response = client
                    .post("/account/login")
                    .header(ContentType::JSON)
                    .body(json!(get_test_credentials("JON@doe.com")).to_string())
                    .dispatch()
                    .await;
                assert_eq!(Status::Ok, response.status());
                assert!(response.cookies().get_private(SESSION_COOKIE).is_some());

                let response = client.post("/account/logout").dispatch().await;
                assert_eq!(Status::NoContent, response.status());

                let response = client.post("/account/logout").dispatch().await;
                assert_eq!(Status::Unauthorized, response.status());
            }

            with_temp_database(|pool| Runtime::new().unwrap().block_on(test(pool)));
        }

        #[test]
        fn should_refuse_wrong_password() {
            async fn test(pool: DatabasePool) {
                let mut connection = pool.get().unwrap();
                register(
                    &mut connection,
                    &get_test_credentials("jon@doe.com"),
                    &datetime(2025, 9, 1, 8, 0),
                )
                .unwrap();

                let rocket = rocket::build()
                    .manage(pool)
                    .manage(Mutex::new(SessionStorage::default()))
                    .mount("/", routes![login]);
                let client = Client::tracked(rocket).await.unwrap();
                let credentials =
                    Credentials::new("jon@doe.com".to_owned(), format!("{TEST_PASSWORD}!"));

                let response = client
                    .post("/account/login")
                    .header(ContentType::JSON)
                    .body(json!(credentials).to_string())
                    .dispatch()
                    .await;

                assert_eq!(Status::Unauthorized, response.status());
                assert!(response.cookies().get_private(SESSION_COOKIE).is_none());
            }

            with_temp_database(|pool| Runtime::new().unwrap().block_on(test(pool)));
        }
    }

    mod profile {
        use crate::database::dao::profile::tests::insert_test_profile;
        use crate::database::{DatabasePool, with_temp_database};
        use crate::web::api::account_controller::{get_profile, update_profile};
        use crate::web::authentication::tests::open_test_session;
        use dto::profile::tests::jon_doe_info;
        use dto::profile::{Profile, Role};
        use rocket::http::{ContentType, Status};
        use rocket::local::asynchronous::Client;
        use rocket::serde::json::json;
        use rocket::tokio::runtime::Runtime;

        #[test]
        fn should_update_own_profile() {
            async fn test(pool: DatabasePool) {
                let mut connection = pool.get().unwrap();
                let user_id = insert_test_profile(&mut connection, "jon@doe.com");
                let (cookie, session_storage) =
                    open_test_session(&user_id, "jon@doe.com", Role::User);

                let rocket = rocket::build()
                    .manage(pool)
                    .manage(session_storage)
                    .mount("/", routes![get_profile, update_profile]);
                let client = Client::tracked(rocket).await.unwrap();

                let response = client
                    .put("/account/profile")
                    .private_cookie(cookie.clone())
                    .header(ContentType::JSON)
                    .body(json!(jon_doe_info()).to_string())
                    .dispatch()
                    .await;
                assert_eq!(Status::Ok, response.status());

                let response = client
                    .get("/account/profile")
                    .private_cookie(cookie)
                    .dispatch()
                    .await;
                assert_eq!(Status::Ok, response.status());
                let profile: Profile = response.into_json().await.unwrap();
                assert_eq!(&user_id, profile.id());
                assert_eq!(&jon_doe_info(), profile.personal_info());
            }

            with_temp_database(|pool| Runtime::new().unwrap().block_on(test(pool)));
        }

        #[test]
        fn should_require_session() {
            async fn test(pool: DatabasePool) {
                let (_, session_storage) = open_test_session("id", "jon@doe.com", Role::User);
                let rocket = rocket::build()
                    .manage(pool)
                    .manage(session_storage)
                    .mount("/", routes![get_profile]);
                let client = Client::tracked(rocket).await.unwrap();

                let response = client.get("/account/profile").dispatch().await;

                assert_eq!(Status::Unauthorized, response.status());
            }

            with_temp_database(|pool| Runtime::new().unwrap().block_on(test(pool)));
        }
    }
}
