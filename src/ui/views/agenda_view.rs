//! Agenda listing: upcoming days that have sessions, each with its events in
//! start order.

use chrono::NaiveDate;
use serde::Serialize;

use super::partition::all_events_for_day;
use crate::models::event::CalendarEvent;
use crate::models::settings::CalendarSettings;
use crate::models::ui::ViewMode;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgendaDay<'a> {
    pub date: NaiveDate,
    pub is_today: bool,
    pub events: Vec<&'a CalendarEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgendaLayout<'a> {
    pub days: Vec<AgendaDay<'a>>,
}

impl<'a> AgendaLayout<'a> {
    pub fn build(
        events: &'a [CalendarEvent],
        anchor: NaiveDate,
        settings: &CalendarSettings,
        today: NaiveDate,
    ) -> Self {
        let days = ViewMode::Agenda
            .visible_dates(anchor, settings)
            .into_iter()
            .filter_map(|date| {
                let day_events = all_events_for_day(events, date);
                (!day_events.is_empty()).then(|| AgendaDay {
                    date,
                    is_today: date == today,
                    events: day_events,
                })
            })
            .collect();
        Self { days }
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
