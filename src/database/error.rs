use crate::database::error::DatabaseError::{InvalidData, UnderlyingDatabase};
use diesel::result::DatabaseErrorKind;
use dto::error::UnknownCode;
use std::error::Error;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DatabaseError {
    #[error("The --database-url argument is missing.")]
    MissingDatabaseUrl,
    #[error("The connection to the database failed.")]
    ConnectionFailed,
    #[error("The element already exists.")]
    AlreadyExists,
    #[error("The element has not been found.")]
    NotFound,
    #[error("A stored value can't be read: {0}")]
    InvalidData(String),
    #[error("An error occurred within the database.")]
    UnderlyingDatabase(String),
}

impl From<Box<dyn Error + Send + Sync + 'static>> for DatabaseError {
    fn from(value: Box<dyn Error + Send + Sync + 'static>) -> Self {
        UnderlyingDatabase(value.to_string())
    }
}

impl From<diesel::result::Error> for DatabaseError {
    fn from(value: diesel::result::Error) -> Self {
        match value {
            diesel::result::Error::NotFound => DatabaseError::NotFound,
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                DatabaseError::AlreadyExists
            }
            error => UnderlyingDatabase(error.to_string()),
        }
    }
}

impl From<diesel::r2d2::PoolError> for DatabaseError {
    fn from(value: diesel::r2d2::PoolError) -> Self {
        error!("Can't get a connection from the pool\n{value:#?}");
        DatabaseError::ConnectionFailed
    }
}

impl From<chrono::ParseError> for DatabaseError {
    fn from(value: chrono::ParseError) -> Self {
        InvalidData(value.to_string())
    }
}

impl From<UnknownCode> for DatabaseError {
    fn from(value: UnknownCode) -> Self {
        InvalidData(value.to_string())
    }
}
