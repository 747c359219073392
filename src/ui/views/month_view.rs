//! Month grid layout: whole weeks, per-day event chips and "+N more"
//! overflow counts.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::interval::last_covered_date;
use super::partition::all_events_for_day;
use crate::models::event::CalendarEvent;
use crate::models::settings::CalendarSettings;
use crate::models::ui::ViewMode;

/// Space taken by the day number at the top of a month cell.
pub const MONTH_CELL_HEADER_HEIGHT: f32 = 24.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthEntry<'a> {
    pub event: &'a CalendarEvent,
    pub is_first_day: bool,
    pub is_last_day: bool,
    pub is_placeholder: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthCell<'a> {
    pub date: NaiveDate,
    pub in_current_month: bool,
    pub is_today: bool,
    /// Chips that fit in the cell, all-day and multi-day events first.
    pub events: Vec<MonthEntry<'a>>,
    /// Events hidden behind the "+N more" button.
    pub overflow: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthLayout<'a> {
    pub weeks: Vec<Vec<MonthCell<'a>>>,
}

/// How many chips fit in a cell of `cell_height`.
pub fn max_visible_events(cell_height: f32, settings: &CalendarSettings) -> usize {
    let available = cell_height - MONTH_CELL_HEADER_HEIGHT;
    if available <= 0.0 {
        return 0;
    }
    let row = settings.event_height + settings.event_gap;
    ((available + settings.event_gap) / row).floor() as usize
}

/// Chips shown for `total` events when `max_visible` fit. When some events
/// are hidden, one row is given up for the "+N more" button.
pub fn visible_event_count(total: usize, max_visible: usize) -> usize {
    if total <= max_visible {
        total
    } else {
        max_visible.saturating_sub(1)
    }
}

impl<'a> MonthLayout<'a> {
    pub fn build(
        events: &'a [CalendarEvent],
        anchor: NaiveDate,
        settings: &CalendarSettings,
        today: NaiveDate,
        cell_height: f32,
        dragging: Option<&str>,
    ) -> Self {
        let max_visible = max_visible_events(cell_height, settings);
        let dates = ViewMode::Month.visible_dates(anchor, settings);

        let cells: Vec<MonthCell<'a>> = dates
            .iter()
            .map(|date| {
                let mut day_events = all_events_for_day(events, *date);
                // Stable sort keeps start order inside each group
                day_events.sort_by_key(|event| !event.is_multi_day());

                let shown = visible_event_count(day_events.len(), max_visible);
                let overflow = day_events.len() - shown;
                let entries = day_events
                    .into_iter()
                    .take(shown)
                    .map(|event| MonthEntry {
                        event,
                        is_first_day: event.start.date() == *date,
                        is_last_day: last_covered_date(event) == *date,
                        is_placeholder: dragging == Some(event.id.as_str()),
                    })
                    .collect();

                MonthCell {
                    date: *date,
                    in_current_month: date.month() == anchor.month()
                        && date.year() == anchor.year(),
                    is_today: *date == today,
                    events: entries,
                    overflow,
                }
            })
            .collect();

        let weeks = cells.chunks(7).map(|week| week.to_vec()).collect();
        Self { weeks }
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&MonthCell<'a>> {
        self.weeks.iter().flatten().find(|cell| cell.date == date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn at(d: u32, h: u32) -> NaiveDateTime {
        day(d).and_hms_opt(h, 0, 0).unwrap()
    }

    #[test]
    fn test_max_visible_events() {
        let settings = CalendarSettings::default();
        assert_eq!(max_visible_events(24.0, &settings), 0);
        assert_eq!(max_visible_events(48.0, &settings), 1);
        assert_eq!(max_visible_events(104.0, &settings), 3);
        assert_eq!(max_visible_events(10.0, &settings), 0);
    }

    #[test]
    fn test_visible_event_count_reserves_more_row() {
        assert_eq!(visible_event_count(2, 3), 2);
        assert_eq!(visible_event_count(3, 3), 3);
        assert_eq!(visible_event_count(5, 3), 2);
        assert_eq!(visible_event_count(5, 0), 0);
    }

    #[test]
    fn test_month_grid_shape() {
        let settings = CalendarSettings::default();
        let layout = MonthLayout::build(&[], day(14), &settings, day(14), 104.0, None);

        assert_eq!(layout.weeks.len(), 6);
        assert!(layout.weeks.iter().all(|week| week.len() == 7));
        let leading = NaiveDate::from_ymd_opt(2025, 2, 23).unwrap();
        assert!(!layout.cell(leading).unwrap().in_current_month);
        assert!(layout.cell(day(14)).unwrap().is_today);
    }

    #[test]
    fn test_cell_overflow_and_ordering() {
        let events = vec![
            CalendarEvent::new("t1", "T1", at(10, 9), at(10, 10)).unwrap(),
            CalendarEvent::new("t2", "T2", at(10, 11), at(10, 12)).unwrap(),
            CalendarEvent::new("t3", "T3", at(10, 13), at(10, 14)).unwrap(),
            CalendarEvent::new("multi", "Multi", at(9, 9), at(11, 17)).unwrap(),
        ];
        let settings = CalendarSettings::default();
        let layout = MonthLayout::build(&events, day(14), &settings, day(1), 104.0, None);

        let cell = layout.cell(day(10)).unwrap();
        let shown: Vec<&str> = cell.events.iter().map(|e| e.event.id.as_str()).collect();
        assert_eq!(shown, vec!["multi", "t1"]);
        assert_eq!(cell.overflow, 2);
        assert!(!cell.events[0].is_first_day);
        assert!(!cell.events[0].is_last_day);
    }
}
