//! All-day strip ("ribbon") shown above the time grid.
//!
//! Multi-day and all-day events bypass the position calculator. Each one is
//! listed once per visible day it covers, on a lane chosen by the track
//! assignment engine over whole-day spans.

use chrono::NaiveDate;
use serde::Serialize;

use super::interval::{intersects_day, last_covered_date};
use super::tracks::{assign_tracks_by, TrackAssignment};
use crate::models::event::CalendarEvent;
use crate::models::settings::CalendarSettings;
use crate::utils::date::{end_of_day, start_of_day};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RibbonEntry<'a> {
    pub event: &'a CalendarEvent,
    pub lane: usize,
    /// Rounded leading corner.
    pub is_first_day: bool,
    /// Rounded trailing corner.
    pub is_last_day: bool,
    pub is_placeholder: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RibbonColumn<'a> {
    pub date: NaiveDate,
    pub entries: Vec<RibbonEntry<'a>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RibbonLayout<'a> {
    pub columns: Vec<RibbonColumn<'a>>,
    pub lane_count: usize,
}

impl<'a> RibbonLayout<'a> {
    /// Build the strip for `dates` from `events`; events that are neither
    /// all-day nor multi-day are ignored.
    pub fn build(events: &[&'a CalendarEvent], dates: &[NaiveDate]) -> Self {
        let strip_events: Vec<&'a CalendarEvent> = events
            .iter()
            .copied()
            .filter(|event| event.is_multi_day())
            .filter(|event| dates.iter().any(|date| intersects_day(event, *date)))
            .collect();

        let lanes: TrackAssignment = assign_tracks_by(&strip_events, |event| {
            (
                start_of_day(event.start.date()),
                end_of_day(last_covered_date(event)),
            )
        });

        let columns = dates
            .iter()
            .map(|date| {
                let mut entries: Vec<RibbonEntry<'a>> = strip_events
                    .iter()
                    .filter(|event| intersects_day(event, *date))
                    .map(|event| RibbonEntry {
                        event: *event,
                        lane: lanes.track_of(&event.id).unwrap_or(0),
                        is_first_day: event.start.date() == *date,
                        is_last_day: last_covered_date(event) == *date,
                        is_placeholder: false,
                    })
                    .collect();
                entries.sort_by_key(|entry| entry.lane);
                RibbonColumn {
                    date: *date,
                    entries,
                }
            })
            .collect();

        Self {
            columns,
            lane_count: lanes.track_count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lane_count == 0
    }

    /// Strip height for the current number of lanes, at least one lane tall.
    pub fn height(&self, settings: &CalendarSettings) -> f32 {
        self.lane_count.max(1) as f32 * (settings.event_height + settings.event_gap)
    }

    pub fn column(&self, date: NaiveDate) -> Option<&RibbonColumn<'a>> {
        self.columns.iter().find(|column| column.date == date)
    }
}
