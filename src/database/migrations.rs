use crate::database::error::DatabaseError;
use diesel::sqlite::Sqlite;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub(crate) fn run_migrations(
    connection: &mut impl MigrationHarness<Sqlite>,
) -> Result<(), DatabaseError> {
    let applied_migrations = connection.run_pending_migrations(MIGRATIONS)?;
    if !applied_migrations.is_empty() {
        info!("Applied {} migration(s)", applied_migrations.len());
    }

    Ok(())
}
