// Date utility functions
// Wall-clock helpers shared by the layout passes and the drag handler

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

pub fn is_same_day(date1: NaiveDateTime, date2: NaiveDateTime) -> bool {
    date1.date() == date2.date()
}

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Exclusive end of `date`, i.e. midnight of the following day.
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    start_of_day(date) + Duration::days(1)
}

/// Timestamp for `hour` o'clock on `date`. `hour` may be 24, which yields the
/// following midnight.
pub fn at_hour(date: NaiveDate, hour: u32) -> NaiveDateTime {
    start_of_day(date) + Duration::hours(i64::from(hour))
}

/// Hours since midnight as a fraction (10:30 -> 10.5).
pub fn fractional_hour(time: NaiveTime) -> f64 {
    time.hour() as f64 + time.minute() as f64 / 60.0 + time.second() as f64 / 3600.0
}

/// Fractional hour of `instant` measured from the start of `day`. Instants on
/// later days report values past 24.
pub fn hours_since_day_start(day: NaiveDate, instant: NaiveDateTime) -> f64 {
    (instant - start_of_day(day)).num_seconds() as f64 / 3600.0
}

/// Calculate the start of the week containing the given date.
///
/// # Arguments
/// * `date` - The date to find the week start for
/// * `first_day_of_week` - 0 = Sunday, 1 = Monday, etc.
pub fn get_week_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let offset = (weekday - first_day_of_week as i64 + 7) % 7;
    date - Duration::days(offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_get_week_start_sunday() {
        // Wednesday, Dec 4, 2024
        let date = NaiveDate::from_ymd_opt(2024, 12, 4).unwrap();
        let start = get_week_start(date, 0);
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
    }

    #[test]
    fn test_get_week_start_monday() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 4).unwrap();
        let start = get_week_start(date, 1);
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 12, 2).unwrap());
    }

    #[test]
    fn test_is_same_day() {
        assert!(is_same_day(dt(3, 0, 0), dt(3, 23, 59)));
        assert!(!is_same_day(dt(3, 23, 59), dt(4, 0, 0)));
    }

    #[test]
    fn test_end_of_day_is_next_midnight() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        assert_eq!(end_of_day(day), dt(4, 0, 0));
        assert_eq!(at_hour(day, 24), dt(4, 0, 0));
    }

    #[test]
    fn test_fractional_hour() {
        assert_eq!(fractional_hour(NaiveTime::from_hms_opt(10, 30, 0).unwrap()), 10.5);
        assert_eq!(fractional_hour(NaiveTime::from_hms_opt(8, 15, 0).unwrap()), 8.25);
    }

    #[test]
    fn test_hours_since_day_start_crosses_midnight() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        assert_eq!(hours_since_day_start(day, dt(4, 2, 0)), 26.0);
    }
}
