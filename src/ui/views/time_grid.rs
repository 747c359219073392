//! Time grid geometry for week-based views.
//!
//! Slot rows, hour labels and the current time indicator.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::models::settings::{CalendarSettings, SLOTS_PER_HOUR, SNAP_MINUTES};
use crate::utils::date::fractional_hour;

/// Where the "now" line sits in the rendered range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeIndicator {
    pub visible: bool,
    /// Position within the visible hours, 0.0 at the top edge.
    pub offset_fraction: f32,
    /// Column of today within the rendered dates.
    pub day_index: Option<usize>,
}

impl TimeIndicator {
    const HIDDEN: TimeIndicator = TimeIndicator {
        visible: false,
        offset_fraction: 0.0,
        day_index: None,
    };

    /// Pixel offset from the top of the grid.
    pub fn offset(&self, settings: &CalendarSettings) -> f32 {
        self.offset_fraction * settings.grid_height()
    }
}

/// Locate `now` in the grid. Visible only when one of `dates` is today and
/// the time falls inside `[start_hour, end_hour)`.
pub fn current_time_indicator(
    now: NaiveDateTime,
    dates: &[NaiveDate],
    settings: &CalendarSettings,
) -> TimeIndicator {
    let Some(day_index) = dates.iter().position(|date| *date == now.date()) else {
        return TimeIndicator::HIDDEN;
    };

    let hour = fractional_hour(now.time());
    let first = settings.start_hour as f64;
    let last = settings.end_hour as f64;
    if hour < first || hour >= last {
        return TimeIndicator {
            day_index: Some(day_index),
            ..TimeIndicator::HIDDEN
        };
    }

    TimeIndicator {
        visible: true,
        offset_fraction: ((hour - first) / (last - first)) as f32,
        day_index: Some(day_index),
    }
}

/// Start time of every quarter-hour row in the visible window.
pub fn grid_slots(settings: &CalendarSettings) -> Vec<NaiveTime> {
    (settings.start_hour..settings.end_hour)
        .flat_map(|hour| {
            (0..SLOTS_PER_HOUR)
                .filter_map(move |slot| NaiveTime::from_hms_opt(hour, slot * SNAP_MINUTES, 0))
        })
        .collect()
}

/// "08:00"-style labels, one per visible hour.
pub fn hour_labels(settings: &CalendarSettings) -> Vec<String> {
    (settings.start_hour..settings.end_hour)
        .map(|hour| format!("{:02}:00", hour))
        .collect()
}

/// Height of a single quarter-hour row.
pub fn slot_height(settings: &CalendarSettings) -> f32 {
    settings.week_cells_height / SLOTS_PER_HOUR as f32
}
