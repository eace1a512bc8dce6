use crate::database::DatabasePool;
use crate::web::server::build_server;
use rocket::{Build, Rocket};

mod api;
pub(crate) mod authentication;
pub(crate) mod error;
mod server;
pub(crate) mod session;

pub fn start_servers(pool: DatabasePool) -> Rocket<Build> {
    build_server(pool)
}
