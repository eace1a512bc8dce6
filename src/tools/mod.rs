use chrono::{Local, NaiveDateTime};
use std::fmt::Debug;

pub mod env_args;

/// Log the error it receives, then return the given value.
/// Meant to be used with `map_err` at the edges of the application.
pub fn log_error_and_return<E: Debug, T>(value_to_return: T) -> impl FnOnce(E) -> T {
    |e| {
        error!("{e:#?}");
        value_to_return
    }
}

/// Local date and time, as stored in database.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Lowercase and strip accents, so that "Élodie" matches "elodie".
pub fn normalize(value: &str) -> String {
    diacritics::remove_diacritics(value).to_lowercase()
}
