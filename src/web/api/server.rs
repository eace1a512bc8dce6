use crate::membership::config::retrieve_bank_details;
use crate::web::api::{
    account_controller, admin_controller, membership_controller, price_controller,
    user_controller,
};
use crate::web::server::Server;
use crate::web::session::SessionStorage;
use rocket::{Build, Rocket};
use std::sync::Mutex;

pub struct ApiServer {}

impl ApiServer {
    pub fn new() -> Self {
        Self {}
    }
}

impl Server for ApiServer {
    fn configure(&self, rocket_build: Rocket<Build>) -> Rocket<Build> {
        let bank_details = match retrieve_bank_details() {
            Ok(bank_details) => bank_details,
            Err(error) => {
                error!("{error:#?}");
                panic!("Initialization failed, aborting.");
            }
        };

        rocket_build
            .manage(bank_details)
            .manage(Mutex::new(SessionStorage::default()))
            .mount(
                "/api/",
                routes![
                    account_controller::register,
                    account_controller::login,
                    account_controller::logout,
                    account_controller::get_profile,
                    account_controller::update_profile,
                    membership_controller::get_season,
                    membership_controller::get_prices,
                    membership_controller::get_total,
                    membership_controller::get_eligibility,
                    membership_controller::submit_application,
                    membership_controller::get_payment_info,
                    admin_controller::list_applications,
                    admin_controller::export_applications,
                    admin_controller::get_payment_history,
                    admin_controller::toggle_payment,
                    admin_controller::set_member_type,
                    admin_controller::set_validation,
                    admin_controller::get_audit_log,
                    admin_controller::update_member_profile,
                    price_controller::get_prices,
                    price_controller::save_prices,
                    price_controller::copy_prices_forward,
                    price_controller::get_missing_prices,
                    user_controller::list_users,
                    user_controller::change_role,
                    user_controller::change_email,
                    user_controller::reset_password,
                    user_controller::delete_user,
                ],
            )
    }
}
