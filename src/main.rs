mod account;
mod admin;
mod database;
mod error;
mod membership;
mod tools;
mod web;

#[macro_use]
extern crate rocket;

use crate::account::promote_bootstrap_admin;
use crate::database::{DatabasePool, init_db};
use crate::web::start_servers;

#[launch]
fn rocket() -> _ {
    env_logger::init();

    let pool = open_database();
    start_servers(pool)
}

fn open_database() -> DatabasePool {
    let pool = match init_db() {
        Ok(pool) => pool,
        Err(e) => {
            error!("Can't open database, aborting...\n{e:#?}");
            panic!();
        }
    };

    match pool.get() {
        Ok(mut connection) => {
            if let Err(e) = promote_bootstrap_admin(&mut connection) {
                error!("Can't promote bootstrap administrator\n{e:#?}");
            }
        }
        Err(e) => error!("Can't reach database to promote bootstrap administrator\n{e:#?}"),
    }

    pool
}
