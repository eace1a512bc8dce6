use crate::account::error::AccountError;
use crate::admin::error::AdminError;
use crate::database::error::DatabaseError;
use crate::membership::error::MembershipError;
use crate::web::error::WebError;
use thiserror::Error;

pub type Result<T, E = ApplicationError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("An error has occurred with the database.")]
    Database(#[from] DatabaseError),
    #[error("Error while working with memberships.")]
    Membership(#[from] MembershipError),
    #[error("Error while working with accounts.")]
    Account(#[from] AccountError),
    #[error("Error while administrating members.")]
    Admin(#[from] AdminError),
    #[error("Error while serving a request.")]
    Web(#[from] WebError),
}

impl From<diesel::result::Error> for ApplicationError {
    fn from(value: diesel::result::Error) -> Self {
        ApplicationError::Database(DatabaseError::from(value))
    }
}

impl From<diesel::r2d2::PoolError> for ApplicationError {
    fn from(value: diesel::r2d2::PoolError) -> Self {
        ApplicationError::Database(DatabaseError::from(value))
    }
}
