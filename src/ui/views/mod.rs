//! Render-time layout for every calendar view.
//!
//! Each call consumes one immutable snapshot of events and returns borrowed
//! layout data; nothing is retained between renders.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::models::event::CalendarEvent;
use crate::models::settings::CalendarSettings;
use crate::models::ui::ViewMode;

pub mod agenda_view;
pub mod interval;
pub mod month_view;
pub mod partition;
pub mod position;
pub mod ribbon;
pub mod time_grid;
pub mod tracks;
pub mod utils;
pub mod week_view;

pub use agenda_view::AgendaLayout;
pub use month_view::MonthLayout;
pub use partition::{all_events_for_day, events_for_day, spanning_events_for_day};
pub use position::PositionedEvent;
pub use tracks::{assign_tracks, TrackAssignment};
pub use week_view::WeekLayout;

/// Default month cell height used when the caller has no measurement yet.
pub const DEFAULT_MONTH_CELL_HEIGHT: f32 = 120.0;

/// Per-render inputs shared by all views.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'s> {
    pub view: ViewMode,
    pub anchor: NaiveDate,
    pub now: NaiveDateTime,
    pub settings: &'s CalendarSettings,
    pub dragging: Option<&'s str>,
    pub month_cell_height: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum ViewLayout<'a> {
    Month(MonthLayout<'a>),
    Week(WeekLayout<'a>),
    Day(WeekLayout<'a>),
    Agenda(AgendaLayout<'a>),
}

impl<'a> ViewLayout<'a> {
    pub fn build(events: &'a [CalendarEvent], context: &RenderContext<'_>) -> Self {
        let settings = context.settings;
        let today = context.now.date();
        match context.view {
            ViewMode::Month => ViewLayout::Month(MonthLayout::build(
                events,
                context.anchor,
                settings,
                today,
                context.month_cell_height,
                context.dragging,
            )),
            ViewMode::Week | ViewMode::Day => {
                let dates = context.view.visible_dates(context.anchor, settings);
                let layout =
                    WeekLayout::build(events, &dates, settings, context.now, context.dragging);
                if context.view == ViewMode::Week {
                    ViewLayout::Week(layout)
                } else {
                    ViewLayout::Day(layout)
                }
            }
            ViewMode::Agenda => {
                ViewLayout::Agenda(AgendaLayout::build(events, context.anchor, settings, today))
            }
        }
    }
}
