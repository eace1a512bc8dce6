pub(crate) mod error;
pub(crate) mod export;
pub(crate) mod listing;
pub(crate) mod payments;
pub(crate) mod users;
