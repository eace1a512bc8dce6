use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use derive_getters::Getters;
use dto::season::Season;

/// Month from which the upcoming membership year applies.
pub const SEASON_START_MONTH: u32 = 9;

/// Whether the reference date falls in the renewal period,
/// during which memberships already count for the following year.
pub fn is_renewal_period(reference: &NaiveDate) -> bool {
    reference.month() >= SEASON_START_MONTH
}

/// The membership year a date belongs to.
/// From September onward, this is the next calendar year.
pub fn membership_year(reference: &NaiveDate) -> i32 {
    if is_renewal_period(reference) {
        reference.year() + 1
    } else {
        reference.year()
    }
}

/// First day of the membership window the reference date falls into.
pub fn window_start(reference: &NaiveDate) -> NaiveDate {
    season_start(membership_year(reference) - 1)
}

/// Years out of chrono's range saturate to its bounds.
fn season_start(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, SEASON_START_MONTH, 1).unwrap_or(if year < 0 {
        NaiveDate::MIN
    } else {
        NaiveDate::MAX
    })
}

/// Period during which a single membership application is allowed.
/// `start` is included, `end` is not.
#[derive(Debug, Getters, PartialEq, Eq, Clone)]
pub struct MembershipWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl MembershipWindow {
    pub fn containing(reference: &NaiveDate) -> Self {
        let start = window_start(reference);
        Self {
            start,
            end: season_start(start.year() + 1),
        }
    }

    pub fn for_membership_year(year: i32) -> Self {
        Self {
            start: season_start(year.saturating_sub(1)),
            end: season_start(year),
        }
    }

    pub fn contains(&self, datetime: &NaiveDateTime) -> bool {
        let date = datetime.date();
        self.start <= date && date < self.end
    }

    pub fn membership_year(&self) -> i32 {
        self.end.year()
    }

    pub fn start_time(&self) -> NaiveDateTime {
        self.start.and_time(NaiveTime::MIN)
    }

    pub fn end_time(&self) -> NaiveDateTime {
        self.end.and_time(NaiveTime::MIN)
    }
}

pub fn season(reference: &NaiveDate) -> Season {
    let window = MembershipWindow::containing(reference);
    Season::new(
        window.membership_year(),
        window.start,
        window.end,
        is_renewal_period(reference),
    )
}
