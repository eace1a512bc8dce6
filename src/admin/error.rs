use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum AdminError {
    #[error("The member has not been found.")]
    MemberNotFound,
    #[error("No payment has been recorded for this member and year [year: {0}]")]
    PaymentNotFound(i32),
    #[error("The filter is invalid [name: {name}, value: {value}]")]
    InvalidFilter { name: &'static str, value: String },
    #[error("The CSV export can't be written: {0}")]
    CantWriteCsv(String),
    #[error("The spreadsheet export can't be written: {0}")]
    CantWriteXlsx(String),
}

impl AdminError {
    pub fn invalid_filter(name: &'static str, value: &str) -> Self {
        AdminError::InvalidFilter {
            name,
            value: value.to_owned(),
        }
    }
}
