use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum AccountError {
    #[error("The email address is invalid [email: {0}]")]
    InvalidEmail(String),
    #[error("The password must contain at least {0} characters.")]
    PasswordTooShort(usize),
    #[error("The email address is already used.")]
    EmailAlreadyUsed,
    #[error("The credentials don't match any known account.")]
    WrongCredentials,
    #[error("The user has not been found.")]
    UserNotFound,
}
