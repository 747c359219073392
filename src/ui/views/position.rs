//! Position calculator for the week and day time grids.
//!
//! Events are clipped to the rendered day, packed into columns, and then
//! sized so every concurrent cluster splits the row width evenly. Positions
//! are recomputed from scratch for each render.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use super::interval::{effective_end, overlaps, MIN_EVENT_MINUTES};
use crate::models::event::CalendarEvent;
use crate::models::settings::CalendarSettings;
use crate::utils::date::{at_hour, hours_since_day_start};

/// Paint order of the first column; later columns stack above it.
pub const BASE_Z_INDEX: u32 = 10;

/// Grid coordinates for one event on one day.
///
/// `top` and `height` are in the same unit as `week_cells_height`;
/// `left` and `width` are fractions of the day column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedEvent<'a> {
    pub event: &'a CalendarEvent,
    pub adjusted_start: NaiveDateTime,
    pub adjusted_end: NaiveDateTime,
    pub top: f32,
    pub height: f32,
    pub left: f32,
    pub width: f32,
    pub z_index: u32,
    pub column: usize,
    /// Set while the event is being dragged; rendered with zero opacity.
    pub is_placeholder: bool,
}

impl PositionedEvent<'_> {
    pub fn opacity(&self) -> f32 {
        if self.is_placeholder {
            0.0
        } else {
            1.0
        }
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Clip `event` to `day`: a start on an earlier day becomes the first
/// visible hour, an end on a later day becomes the last visible hour. The
/// result always has `end > start`.
pub fn adjusted_interval(
    event: &CalendarEvent,
    day: NaiveDate,
    settings: &CalendarSettings,
) -> (NaiveDateTime, NaiveDateTime) {
    let start = if event.start.date() < day {
        at_hour(day, settings.start_hour)
    } else {
        event.start
    };
    let end = if event.end.date() > day {
        at_hour(day, settings.end_hour)
    } else {
        event.end
    };

    (start, effective_end(start, end))
}

/// Vertical placement `(top, height)` of an adjusted interval. Intervals
/// outside the visible window collapse to a zero-height box at the nearest
/// edge; visible ones are at least one snap slot tall.
fn vertical_extent(
    day: NaiveDate,
    start: NaiveDateTime,
    end: NaiveDateTime,
    settings: &CalendarSettings,
) -> (f32, f32) {
    let first = settings.start_hour as f64;
    let last = settings.end_hour as f64;
    let unit = settings.week_cells_height as f64;

    let start_hour = hours_since_day_start(day, start).clamp(first, last);
    let end_hour = hours_since_day_start(day, end).clamp(first, last);

    let top = (start_hour - first) * unit;

    let visible =
        start < at_hour(day, settings.end_hour) && end > at_hour(day, settings.start_hour);
    if !visible {
        return (top as f32, 0.0);
    }

    let min_height = MIN_EVENT_MINUTES as f64 / 60.0 * unit;
    let height = ((end_hour - start_hour) * unit).max(min_height);
    let grid_height = (last - first) * unit;
    let top = top.min(grid_height - height).max(0.0);
    (top as f32, height as f32)
}

/// Lay out the timed events of `day`.
///
/// Pass 1 places each event, in start order, into the first column whose
/// last interval it does not overlap. Pass 2 counts, per event, the columns
/// holding anything that overlaps it; that count divides the width.
pub fn position_events_for_day<'a>(
    events: &[&'a CalendarEvent],
    day: NaiveDate,
    settings: &CalendarSettings,
) -> Vec<PositionedEvent<'a>> {
    let mut clipped: Vec<(&'a CalendarEvent, NaiveDateTime, NaiveDateTime)> = events
        .iter()
        .map(|event| {
            let (start, end) = adjusted_interval(event, day, settings);
            (*event, start, end)
        })
        .collect();

    clipped.sort_by(|(a, a_start, a_end), (b, b_start, b_end)| {
        a_start
            .cmp(b_start)
            .then_with(|| b_end.cmp(a_end))
            .then_with(|| a.id.cmp(&b.id))
    });

    // Pass 1: column packing
    let mut columns: Vec<Vec<(NaiveDateTime, NaiveDateTime)>> = Vec::new();
    let mut placed_columns = Vec::with_capacity(clipped.len());

    for (_, start, end) in &clipped {
        let free = columns.iter().position(|column| match column.last() {
            Some((last_start, last_end)) => !overlaps(*last_start, *last_end, *start, *end),
            None => true,
        });
        let column_index = match free {
            Some(index) => index,
            None => {
                columns.push(Vec::new());
                columns.len() - 1
            }
        };
        columns[column_index].push((*start, *end));
        placed_columns.push(column_index);
    }

    // Pass 2: width and offset per concurrent cluster
    let positioned: Vec<PositionedEvent<'a>> = clipped
        .into_iter()
        .zip(placed_columns)
        .map(|((event, start, end), column)| {
            let overlapping_columns = columns
                .iter()
                .filter(|intervals| {
                    intervals.iter().any(|(other_start, other_end)| {
                        overlaps(start, end, *other_start, *other_end)
                    })
                })
                .count()
                .max(1);

            let width = 1.0 / overlapping_columns as f32;
            let left = column as f32 / overlapping_columns as f32;
            let (top, height) = vertical_extent(day, start, end, settings);

            PositionedEvent {
                event,
                adjusted_start: start,
                adjusted_end: end,
                top,
                height,
                left,
                width,
                z_index: BASE_Z_INDEX + column as u32,
                column,
                is_placeholder: false,
            }
        })
        .collect();

    log::debug!(
        "positioned {} events on {} across {} columns",
        positioned.len(),
        day,
        columns.len()
    );

    positioned
}
