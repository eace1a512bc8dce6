pub mod account;
pub mod application;
pub mod audit_log;
pub mod error;
pub mod license_type;
pub mod listing;
pub mod membership_type;
pub mod payment;
pub mod payment_info;
pub mod price;
pub mod profile;
pub mod season;
pub mod total;
pub mod user;
