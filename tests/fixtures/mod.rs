// Test fixtures - reusable test data
// Training sessions laid out around the week of Monday 3 March 2025

#![allow(dead_code)]

use chrono::{Duration, NaiveDate, NaiveDateTime};
use formation_calendar::models::event::{CalendarEvent, EventColor};

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Monday, 3 March 2025
    pub fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
    }

    pub fn tuesday() -> NaiveDate {
        monday() + Duration::days(1)
    }

    pub fn wednesday() -> NaiveDate {
        monday() + Duration::days(2)
    }

    pub fn thursday() -> NaiveDate {
        monday() + Duration::days(3)
    }

    /// Sunday to Saturday around [`monday`]
    pub fn week() -> Vec<NaiveDate> {
        let sunday = monday() - Duration::days(1);
        (0..7).map(|offset| sunday + Duration::days(offset)).collect()
    }

    pub fn at(date: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
        date.and_hms_opt(hour, minute, 0).unwrap()
    }
}

/// Sample sessions
pub mod sessions {
    use super::dates::*;
    use super::*;

    pub fn timed(id: &str, start: NaiveDateTime, end: NaiveDateTime) -> CalendarEvent {
        CalendarEvent::builder()
            .id(id)
            .title(format!("Session {}", id))
            .start(start)
            .end(end)
            .formation_id("f-safety")
            .participant_count(8)
            .build()
            .unwrap()
    }

    /// All-day session covering `first` through `last` inclusive.
    pub fn all_day(id: &str, first: NaiveDate, last: NaiveDate) -> CalendarEvent {
        CalendarEvent::builder()
            .id(id)
            .title(format!("Course {}", id))
            .start(at(first, 0, 0))
            .end(at(last + Duration::days(1), 0, 0))
            .all_day(true)
            .color(EventColor::Violet)
            .build()
            .unwrap()
    }

    /// Event A: Monday 09:00-11:00
    pub fn event_a() -> CalendarEvent {
        timed("a", at(monday(), 9, 0), at(monday(), 11, 0))
    }

    /// Event B: Monday 10:00-12:00
    pub fn event_b() -> CalendarEvent {
        timed("b", at(monday(), 10, 0), at(monday(), 12, 0))
    }

    /// Event C: all-day Monday through Wednesday
    pub fn event_c() -> CalendarEvent {
        all_day("c", monday(), wednesday())
    }

    pub fn sample_week() -> Vec<CalendarEvent> {
        vec![
            event_a(),
            event_b(),
            event_c(),
            timed("d", at(tuesday(), 14, 0), at(tuesday(), 15, 30)),
            timed("e", at(thursday(), 8, 0), at(thursday(), 8, 0)),
        ]
    }
}
