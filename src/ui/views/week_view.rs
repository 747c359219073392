//! Week and day view layout pipeline.
//!
//! events -> per-day partition -> all-day strip / position calculator ->
//! positioned boxes. Nothing is cached between calls.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use super::partition::events_for_day;
use super::position::{position_events_for_day, PositionedEvent};
use super::ribbon::RibbonLayout;
use super::time_grid::{current_time_indicator, hour_labels, TimeIndicator};
use crate::models::event::CalendarEvent;
use crate::models::settings::CalendarSettings;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayColumn<'a> {
    pub date: NaiveDate,
    pub is_today: bool,
    pub events: Vec<PositionedEvent<'a>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekLayout<'a> {
    pub dates: Vec<NaiveDate>,
    /// Labels for the hour gutter.
    pub hours: Vec<String>,
    pub ribbon: RibbonLayout<'a>,
    pub days: Vec<DayColumn<'a>>,
    pub time_indicator: TimeIndicator,
}

impl<'a> WeekLayout<'a> {
    /// Lay out `events` over `dates` (seven dates for the week view, one for
    /// the day view). `dragging` names the event under an active drag; it
    /// stays in the layout as a placeholder.
    pub fn build(
        events: &'a [CalendarEvent],
        dates: &[NaiveDate],
        settings: &CalendarSettings,
        now: NaiveDateTime,
        dragging: Option<&str>,
    ) -> Self {
        let all: Vec<&'a CalendarEvent> = events.iter().collect();
        let mut ribbon = RibbonLayout::build(&all, dates);
        for column in &mut ribbon.columns {
            for entry in &mut column.entries {
                entry.is_placeholder = dragging == Some(entry.event.id.as_str());
            }
        }

        let days = dates
            .iter()
            .map(|date| {
                let timed: Vec<&'a CalendarEvent> = events_for_day(events, *date)
                    .into_iter()
                    .filter(|event| !event.is_multi_day())
                    .collect();
                let mut positioned = position_events_for_day(&timed, *date, settings);
                for item in &mut positioned {
                    item.is_placeholder = dragging == Some(item.event.id.as_str());
                }
                DayColumn {
                    date: *date,
                    is_today: *date == now.date(),
                    events: positioned,
                }
            })
            .collect();

        Self {
            dates: dates.to_vec(),
            hours: hour_labels(settings),
            ribbon,
            days,
            time_indicator: current_time_indicator(now, dates, settings),
        }
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DayColumn<'a>> {
        self.days.iter().find(|column| column.date == date)
    }

    /// Positioned box for `event_id` on `date`.
    pub fn find(&self, date: NaiveDate, event_id: &str) -> Option<&PositionedEvent<'a>> {
        self.day(date)?
            .events
            .iter()
            .find(|item| item.event.id == event_id)
    }
}
