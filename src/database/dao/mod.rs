use crate::database::error::DatabaseError;

pub mod application;
pub mod audit_log;
pub mod payment;
pub mod price;
pub mod profile;

type Result<T, E = DatabaseError> = std::result::Result<T, E>;
