use crate::database::error::DatabaseError;
use crate::database::error::DatabaseError::MissingDatabaseUrl;
use crate::database::migrations::run_migrations;
use crate::tools::env_args::retrieve_expected_arg_value;
use diesel::SqliteConnection;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};

pub mod dao;
pub(crate) mod error;
mod migrations;
mod model;
mod schema;

pub type DatabasePool = Pool<ConnectionManager<SqliteConnection>>;

const POOL_SIZE: u32 = 8;

/// Each SQLite connection has to enable foreign keys on its own,
/// otherwise deleting a profile wouldn't cascade.
#[derive(Debug)]
struct ConnectionOptions;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, connection: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        connection
            .batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Create the connection pool onto the database given by `--database-url`
/// and bring its schema up to date.
pub fn init_db() -> Result<DatabasePool, DatabaseError> {
    let database_url = retrieve_expected_arg_value("--database-url", MissingDatabaseUrl)?;
    let pool = create_pool(&database_url)?;

    let mut connection = pool.get()?;
    run_migrations(&mut connection)?;
    info!("Database is ready [url: {database_url}]");

    Ok(pool)
}

fn create_pool(database_url: &str) -> Result<DatabasePool, DatabaseError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);

    Ok(Pool::builder()
        .max_size(POOL_SIZE)
        .connection_customizer(Box::new(ConnectionOptions))
        .build(manager)?)
}

/// Run a function against a brand-new database, migrated and stored in a temp folder.
#[cfg(test)]
pub fn with_temp_database<F, T>(function: F) -> T
where
    F: FnOnce(DatabasePool) -> T,
{
    use crate::tools::test::tests::temp_dir;

    let database_url = temp_dir()
        .join("database.db")
        .to_str()
        .unwrap()
        .to_owned();
    let pool = create_pool(&database_url).unwrap();
    run_migrations(&mut pool.get().unwrap()).unwrap();

    function(pool)
}

#[cfg(test)]
mod tests {
    mod init_db {
        use crate::database::error::DatabaseError;
        use crate::database::init_db;
        use crate::tools::env_args::with_env_args;
        use crate::tools::test::tests::temp_dir;
        use diesel::RunQueryDsl;

        #[test]
        fn success() {
            let database_url = temp_dir().join("golf.db").to_str().unwrap().to_owned();

            let pool = with_env_args(vec![format!("--database-url={database_url}")], init_db)
                .unwrap();

            let mut connection = pool.get().unwrap();
            let count = diesel::delete(crate::database::schema::price::table)
                .execute(&mut connection)
                .unwrap();
            assert_eq!(0, count);
        }

        #[test]
        fn fail_when_no_database_url() {
            let result = with_env_args(vec![], init_db);

            assert_eq!(Some(DatabaseError::MissingDatabaseUrl), result.err());
        }
    }
}
