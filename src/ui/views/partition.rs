//! Day partitioner: selects the events visible on a given day.
//!
//! All functions borrow from the caller's snapshot and return events sorted by
//! start time, ties broken by end time then id so the order is deterministic.

use chrono::NaiveDate;

use super::interval::{intersects_day, starts_on};
use crate::models::event::CalendarEvent;

/// Events that start on `day`.
pub fn events_for_day<'a>(events: &'a [CalendarEvent], day: NaiveDate) -> Vec<&'a CalendarEvent> {
    let mut selected: Vec<_> = events.iter().filter(|e| starts_on(e, day)).collect();
    sort_by_start(&mut selected);
    selected
}

/// Multi-day events covering `day` that started on an earlier day.
pub fn spanning_events_for_day<'a>(
    events: &'a [CalendarEvent],
    day: NaiveDate,
) -> Vec<&'a CalendarEvent> {
    let mut selected: Vec<_> = events
        .iter()
        .filter(|e| e.is_multi_day() && !starts_on(e, day) && intersects_day(e, day))
        .collect();
    sort_by_start(&mut selected);
    selected
}

/// Every event whose interval intersects `day`.
pub fn all_events_for_day<'a>(
    events: &'a [CalendarEvent],
    day: NaiveDate,
) -> Vec<&'a CalendarEvent> {
    let mut selected: Vec<_> = events.iter().filter(|e| intersects_day(e, day)).collect();
    sort_by_start(&mut selected);
    selected
}

pub(crate) fn sort_by_start(events: &mut [&CalendarEvent]) {
    events.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then_with(|| a.end.cmp(&b.end))
            .then_with(|| a.id.cmp(&b.id))
    });
}
