use chrono::{NaiveDate, NaiveDateTime};
use std::str::FromStr;

pub(crate) mod application;
pub(crate) mod audit_log;
pub(crate) mod payment;
pub(crate) mod price;
pub(crate) mod profile;

/// Dates and times are stored as text, as written by [NaiveDateTime]'s `Display`.
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

pub(crate) fn format_datetime(datetime: &NaiveDateTime) -> String {
    datetime.to_string()
}

pub(crate) fn parse_datetime(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, DATETIME_FORMAT)
}

pub(crate) fn parse_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::from_str(value)
}

#[cfg(test)]
mod tests {
    use crate::database::model::{format_datetime, parse_datetime};
    use chrono::NaiveDate;

    #[test]
    fn should_read_what_has_been_written() {
        let datetime = NaiveDate::from_ymd_opt(2025, 9, 2)
            .unwrap()
            .and_hms_micro_opt(10, 30, 0, 123456)
            .unwrap();

        assert_eq!(datetime, parse_datetime(&format_datetime(&datetime)).unwrap());
    }

    #[test]
    fn should_read_datetime_without_fraction() {
        let expected_datetime = NaiveDate::from_ymd_opt(2025, 9, 2)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();

        assert_eq!(expected_datetime, parse_datetime("2025-09-02 10:30:00").unwrap());
    }

    #[test]
    fn should_keep_chronological_order_as_text() {
        let before = NaiveDate::from_ymd_opt(2025, 8, 31)
            .unwrap()
            .and_hms_micro_opt(23, 59, 59, 999999)
            .unwrap();
        let after = NaiveDate::from_ymd_opt(2025, 9, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();

        assert!(format_datetime(&before) < format_datetime(&after));
    }
}
