use dto::price::PriceType;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum MembershipError {
    #[error("An application already exists for the membership year {0}.")]
    ApplicationAlreadyExists(i32),
    #[error("The application has not been found.")]
    ApplicationNotFound,
    #[error("The application belongs to another member.")]
    NotApplicationOwner,
    #[error("Some required fields are missing: {0:?}")]
    IncompleteForm(Vec<&'static str>),
    #[error("Prices of year {0} already exist.")]
    TargetYearNotEmpty(i32),
    #[error("There is no price to copy from year {0}.")]
    NothingToCopy(i32),
    #[error("Year {0} has no following year.")]
    YearOutOfRange(i32),
    #[error("The amount is invalid [type: {price_type}, code: {code}, amount: {amount}]")]
    InvalidAmount {
        price_type: PriceType,
        code: String,
        amount: f64,
    },
    #[error("The code doesn't match any catalog entry [type: {price_type}, code: {code}]")]
    UnknownPriceCode { price_type: PriceType, code: String },
    #[error("The same price is given twice [type: {price_type}, code: {code}]")]
    DuplicatedPrice { price_type: PriceType, code: String },
    #[error("The {0} argument is missing.")]
    MissingBankDetails(&'static str),
}
