use chrono::NaiveDate;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Describes the membership season a date belongs to.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct Season {
    membership_year: i32,
    window_start: NaiveDate,
    window_end: NaiveDate,
    renewal_period: bool,
}

impl Season {
    pub fn new(
        membership_year: i32,
        window_start: NaiveDate,
        window_end: NaiveDate,
        renewal_period: bool,
    ) -> Self {
        Self {
            membership_year,
            window_start,
            window_end,
            renewal_period,
        }
    }
}
