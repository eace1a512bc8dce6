pub(crate) mod catalog;
pub(crate) mod config;
pub(crate) mod eligibility;
pub(crate) mod error;
pub(crate) mod reference;
pub(crate) mod season;
pub(crate) mod total;
