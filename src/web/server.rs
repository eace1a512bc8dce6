use crate::database::DatabasePool;
use crate::tools::env_args::retrieve_parsed_arg_value;
use crate::web::api::server::ApiServer;
use rocket::{Build, Rocket};

const PORT_ENV_ARG: &str = "--port";
const DEFAULT_PORT: u16 = 8000;

pub trait Server {
    fn configure(&self, rocket_build: Rocket<Build>) -> Rocket<Build>;
}

pub fn build_server(pool: DatabasePool) -> Rocket<Build> {
    let api_port = get_api_port();
    let rocket_build = rocket::build()
        .configure(rocket::Config::figment().merge(("port", api_port)))
        .manage(pool);

    let servers: Vec<Box<dyn Server>> = vec![Box::new(ApiServer::new())];
    servers
        .iter()
        .fold(rocket_build, |rocket_build, server| server.configure(rocket_build))
}

fn get_api_port() -> u16 {
    retrieve_parsed_arg_value(PORT_ENV_ARG, DEFAULT_PORT)
}
