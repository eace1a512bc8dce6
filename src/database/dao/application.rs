use super::Result;
use crate::database::model::application::MembershipApplication;
use crate::database::model::format_datetime;
use crate::database::schema::membership_application::dsl::{
    created_at, id, license_type, membership_application, membership_type, user_id,
};
use chrono::NaiveDateTime;
use diesel::prelude::*;
use std::collections::HashSet;

fn to_dtos(
    results: Vec<MembershipApplication>,
) -> Result<Vec<dto::application::MembershipApplication>> {
    results
        .into_iter()
        .map(dto::application::MembershipApplication::try_from)
        .collect()
}

/// Applications of a user created within `[since, until)`.
pub fn retrieve_applications_for_user(
    connection: &mut SqliteConnection,
    user: &str,
    since: &NaiveDateTime,
    until: &NaiveDateTime,
) -> Result<Vec<dto::application::MembershipApplication>> {
    let results = membership_application
        .filter(user_id.eq(user))
        .filter(created_at.ge(format_datetime(since)))
        .filter(created_at.lt(format_datetime(until)))
        .order(created_at.asc())
        .select(MembershipApplication::as_select())
        .load(connection)?;

    to_dtos(results)
}

pub fn retrieve_application(
    connection: &mut SqliteConnection,
    application_id: &str,
) -> Result<Option<dto::application::MembershipApplication>> {
    let result = membership_application
        .find(application_id)
        .select(MembershipApplication::as_select())
        .first(connection)
        .optional()?;

    result
        .map(dto::application::MembershipApplication::try_from)
        .transpose()
}

pub fn retrieve_all_applications(
    connection: &mut SqliteConnection,
) -> Result<Vec<dto::application::MembershipApplication>> {
    let results = membership_application
        .order((created_at.asc(), id.asc()))
        .select(MembershipApplication::as_select())
        .load(connection)?;

    to_dtos(results)
}

/// Ids of every user who has submitted at least one application.
pub fn retrieve_applicant_ids(connection: &mut SqliteConnection) -> Result<HashSet<String>> {
    let results = membership_application
        .select(user_id)
        .distinct()
        .load::<String>(connection)?;

    Ok(results.into_iter().collect())
}

pub fn insert_application(
    connection: &mut SqliteConnection,
    application: &dto::application::MembershipApplication,
) -> Result<()> {
    diesel::insert_into(membership_application)
        .values((
            id.eq(application.id()),
            user_id.eq(application.user_id()),
            membership_type.eq(application.membership_type().code()),
            license_type.eq(application.license_type().code()),
            created_at.eq(format_datetime(application.created_at())),
        ))
        .execute(connection)?;

    Ok(())
}

#[cfg(test)]
pub mod tests {
    use crate::database::dao::application::insert_application;
    use chrono::NaiveDateTime;
    use diesel::SqliteConnection;
    use dto::application::MembershipApplication;
    use dto::license_type::LicenseType;
    use dto::membership_type::MembershipType;
    use uuid::Uuid;

    pub fn insert_test_application(
        connection: &mut SqliteConnection,
        user_id: &str,
        created_at: NaiveDateTime,
    ) -> MembershipApplication {
        let application = MembershipApplication::new(
            Uuid::new_v4().to_string(),
            user_id.to_owned(),
            MembershipType::Golf,
            LicenseType::Adult,
            created_at,
        );
        insert_application(connection, &application).unwrap();

        application
    }

    mod retrieve_applications_for_user {
        use crate::database::dao::application::retrieve_applications_for_user;
        use crate::database::dao::application::tests::insert_test_application;
        use crate::database::dao::profile::tests::insert_test_profile;
        use crate::database::with_temp_database;
        use crate::tools::test::tests::datetime;

        #[test]
        fn should_only_retrieve_applications_within_bounds() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();
                let user_id = insert_test_profile(&mut connection, "jon@doe.com");
                let other_user_id = insert_test_profile(&mut connection, "jonette@snow.com");
                insert_test_application(&mut connection, &user_id, datetime(2025, 8, 31, 23, 59));
                let expected_application =
                    insert_test_application(&mut connection, &user_id, datetime(2025, 9, 1, 0, 0));
                insert_test_application(&mut connection, &user_id, datetime(2026, 9, 1, 0, 0));
                insert_test_application(
                    &mut connection,
                    &other_user_id,
                    datetime(2025, 10, 1, 0, 0),
                );

                let result = retrieve_applications_for_user(
                    &mut connection,
                    &user_id,
                    &datetime(2025, 9, 1, 0, 0),
                    &datetime(2026, 9, 1, 0, 0),
                )
                .unwrap();

                assert_eq!(vec![expected_application], result);
            })
        }
    }

    mod retrieve_application {
        use crate::database::dao::application::retrieve_application;
        use crate::database::dao::application::tests::insert_test_application;
        use crate::database::dao::profile::tests::insert_test_profile;
        use crate::database::with_temp_database;
        use crate::tools::test::tests::datetime;

        #[test]
        fn success() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();
                let user_id = insert_test_profile(&mut connection, "jon@doe.com");
                let application =
                    insert_test_application(&mut connection, &user_id, datetime(2025, 9, 2, 10, 0));

                let result = retrieve_application(&mut connection, application.id()).unwrap();

                assert_eq!(Some(application), result);
            })
        }

        #[test]
        fn success_when_unknown() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();

                let result = retrieve_application(&mut connection, "unknown").unwrap();

                assert_eq!(None, result);
            })
        }
    }

    mod retrieve_applicant_ids {
        use crate::database::dao::application::retrieve_applicant_ids;
        use crate::database::dao::application::tests::insert_test_application;
        use crate::database::dao::profile::tests::insert_test_profile;
        use crate::database::with_temp_database;
        use crate::tools::test::tests::datetime;
        use std::collections::HashSet;

        #[test]
        fn success() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();
                let user_id = insert_test_profile(&mut connection, "jon@doe.com");
                insert_test_profile(&mut connection, "jonette@snow.com");
                insert_test_application(&mut connection, &user_id, datetime(2024, 9, 2, 10, 0));
                insert_test_application(&mut connection, &user_id, datetime(2025, 9, 2, 10, 0));

                let result = retrieve_applicant_ids(&mut connection).unwrap();

                assert_eq!(HashSet::from([user_id]), result);
            })
        }
    }

    mod insert_application {
        use crate::database::dao::application::retrieve_all_applications;
        use crate::database::dao::application::tests::insert_test_application;
        use crate::database::dao::profile::tests::insert_test_profile;
        use crate::database::with_temp_database;
        use crate::tools::test::tests::datetime;

        #[test]
        fn success() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();
                let user_id = insert_test_profile(&mut connection, "jon@doe.com");
                let second =
                    insert_test_application(&mut connection, &user_id, datetime(2025, 9, 2, 10, 0));
                let first =
                    insert_test_application(&mut connection, &user_id, datetime(2024, 9, 2, 10, 0));

                let result = retrieve_all_applications(&mut connection).unwrap();

                assert_eq!(vec![first, second], result);
            })
        }
    }
}
