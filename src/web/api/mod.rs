mod account_controller;
mod admin_controller;
mod membership_controller;
mod price_controller;
pub(crate) mod server;
mod user_controller;
