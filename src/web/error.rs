use crate::account::error::AccountError;
use crate::admin::error::AdminError;
use crate::database::error::DatabaseError;
use crate::error::ApplicationError;
use crate::membership::error::MembershipError;
use rocket::http::Status;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum WebError {
    #[error("The session storage can't be accessed.")]
    SessionStorageUnavailable,
}

fn status_of(error: &ApplicationError) -> Status {
    match error {
        ApplicationError::Database(DatabaseError::NotFound) => Status::NotFound,
        ApplicationError::Database(DatabaseError::AlreadyExists) => Status::Conflict,
        ApplicationError::Database(_) => Status::InternalServerError,
        ApplicationError::Membership(error) => match error {
            MembershipError::ApplicationAlreadyExists(_)
            | MembershipError::TargetYearNotEmpty(_) => Status::Conflict,
            MembershipError::ApplicationNotFound | MembershipError::NothingToCopy(_) => {
                Status::NotFound
            }
            MembershipError::NotApplicationOwner => Status::Forbidden,
            MembershipError::IncompleteForm(_)
            | MembershipError::InvalidAmount { .. }
            | MembershipError::UnknownPriceCode { .. }
            | MembershipError::DuplicatedPrice { .. }
            | MembershipError::YearOutOfRange(_) => Status::BadRequest,
            MembershipError::MissingBankDetails(_) => Status::InternalServerError,
        },
        ApplicationError::Account(error) => match error {
            AccountError::InvalidEmail(_) | AccountError::PasswordTooShort(_) => Status::BadRequest,
            AccountError::EmailAlreadyUsed => Status::Conflict,
            AccountError::WrongCredentials => Status::Unauthorized,
            AccountError::UserNotFound => Status::NotFound,
        },
        ApplicationError::Admin(error) => match error {
            AdminError::MemberNotFound | AdminError::PaymentNotFound(_) => Status::NotFound,
            AdminError::InvalidFilter { .. } => Status::BadRequest,
            AdminError::CantWriteCsv(_) | AdminError::CantWriteXlsx(_) => {
                Status::InternalServerError
            }
        },
        ApplicationError::Web(_) => Status::InternalServerError,
    }
}

/// Turn an error into the status sent back to the caller.
/// Server failures are logged as errors, the caller's mistakes only for debugging.
pub fn error_status<E: Into<ApplicationError>>(error: E) -> Status {
    let error = error.into();
    let status = status_of(&error);
    if status.code >= 500 {
        error!("{error:#?}");
    } else {
        debug!("Request refused [status: {status}, error: {error}]");
    }

    status
}
