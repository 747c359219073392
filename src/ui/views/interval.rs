//! Interval utilities: overlap tests, day membership and event classification.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::models::event::CalendarEvent;
use crate::utils::date::{end_of_day, start_of_day};

/// Visual floor for zero or near-zero length events, in minutes.
pub const MIN_EVENT_MINUTES: i64 = 15;

/// Half-open overlap test on `[start, end)` intervals.
pub fn overlaps(
    a_start: NaiveDateTime,
    a_end: NaiveDateTime,
    b_start: NaiveDateTime,
    b_end: NaiveDateTime,
) -> bool {
    a_start < b_end && b_start < a_end
}

pub fn is_multi_day(event: &CalendarEvent) -> bool {
    event.is_multi_day()
}

/// True when the event's interval intersects `[day, day + 1)`. A zero-length
/// event belongs to the day its start falls on.
pub fn intersects_day(event: &CalendarEvent, day: NaiveDate) -> bool {
    let day_start = start_of_day(day);
    let day_end = end_of_day(day);

    if event.start >= day_end {
        return false;
    }
    event.start >= day_start || event.end > day_start
}

pub fn starts_on(event: &CalendarEvent, day: NaiveDate) -> bool {
    event.start.date() == day
}

/// Last calendar date the event actually occupies. An end at exactly
/// midnight does not occupy the new day.
pub fn last_covered_date(event: &CalendarEvent) -> NaiveDate {
    if event.end > event.start && event.end.time() == NaiveTime::MIN {
        event.end.date() - Duration::days(1)
    } else {
        event.end.date()
    }
}

/// End used for collision and height calculations, padded so every event
/// spans at least [`MIN_EVENT_MINUTES`].
pub fn effective_end(start: NaiveDateTime, end: NaiveDateTime) -> NaiveDateTime {
    end.max(start + Duration::minutes(MIN_EVENT_MINUTES))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn event(start: NaiveDateTime, end: NaiveDateTime) -> CalendarEvent {
        CalendarEvent::new("e", "Session", start, end).unwrap()
    }

    #[test]
    fn test_overlaps_is_half_open() {
        assert!(overlaps(at(3, 9, 0), at(3, 11, 0), at(3, 10, 0), at(3, 12, 0)));
        assert!(!overlaps(at(3, 9, 0), at(3, 10, 0), at(3, 10, 0), at(3, 11, 0)));
    }

    #[test]
    fn test_intersects_day() {
        let spanning = event(at(3, 9, 0), at(5, 12, 0));
        assert!(!intersects_day(&spanning, day(2)));
        assert!(intersects_day(&spanning, day(3)));
        assert!(intersects_day(&spanning, day(4)));
        assert!(intersects_day(&spanning, day(5)));
        assert!(!intersects_day(&spanning, day(6)));
    }

    #[test]
    fn test_intersects_day_midnight_end_excluded() {
        let late = event(at(3, 22, 0), at(4, 0, 0));
        assert!(intersects_day(&late, day(3)));
        assert!(!intersects_day(&late, day(4)));
        assert_eq!(last_covered_date(&late), day(3));
    }

    #[test]
    fn test_zero_length_event_belongs_to_its_day() {
        let instant = event(at(4, 0, 0), at(4, 0, 0));
        assert!(!intersects_day(&instant, day(3)));
        assert!(intersects_day(&instant, day(4)));
        assert_eq!(last_covered_date(&instant), day(4));
    }

    #[test]
    fn test_effective_end_pads_degenerate_events() {
        assert_eq!(effective_end(at(3, 9, 0), at(3, 9, 0)), at(3, 9, 15));
        assert_eq!(effective_end(at(3, 9, 0), at(3, 10, 0)), at(3, 10, 0));
    }
}
