// Drag-to-reschedule gesture handler
//
// Idle -> Dragging -> (Dropped | Cancelled) -> Idle. The handler never
// mutates an event store: a drop yields the proposed event and the caller
// forwards it to its persistence collaborator.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::models::event::CalendarEvent;
use crate::models::settings::{CalendarSettings, SNAP_MINUTES};
use crate::ui::views::time_grid::{grid_slots, slot_height};

/// Screen-space position or offset, in the renderer's length unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// Floor `time` to the quarter-hour slot that contains it (10:07 -> 10:00).
pub fn snap_to_quarter_hour(time: NaiveTime) -> NaiveTime {
    let minute = time.minute() / SNAP_MINUTES * SNAP_MINUTES;
    NaiveTime::from_hms_opt(time.hour(), minute, 0).unwrap_or(time)
}

/// Grid cell under the pointer. Time-grid cells carry a quarter-hour start;
/// month cells carry only a date.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropTarget {
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
}

impl DropTarget {
    /// Time-grid cell containing `time` on `date`.
    pub fn at(date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            date,
            time: Some(snap_to_quarter_hour(time)),
        }
    }

    /// Month cell.
    pub fn day(date: NaiveDate) -> Self {
        Self { date, time: None }
    }

    /// Cell at vertical offset `y` from the top of the day column. Offsets
    /// outside the grid land in the first or last slot.
    pub fn from_offset(date: NaiveDate, y: f32, settings: &CalendarSettings) -> Self {
        let slots = grid_slots(settings);
        let slot = if y <= 0.0 {
            0
        } else {
            ((y / slot_height(settings)).floor() as usize).min(slots.len().saturating_sub(1))
        };

        Self {
            date,
            time: Some(slots.get(slot).copied().unwrap_or(NaiveTime::MIN)),
        }
    }

    /// Hour of the cell as a fraction in quarter steps (14:45 -> 14.75).
    pub fn fractional_hour(&self) -> Option<f64> {
        self.time
            .map(|time| time.hour() as f64 + time.minute() as f64 / 60.0)
    }

    /// New start for `event` dropped here. Month cells keep the original time
    /// of day.
    pub fn resolve_start(&self, event: &CalendarEvent) -> NaiveDateTime {
        let time = self.time.unwrap_or_else(|| event.start.time());
        self.date.and_time(time)
    }
}

/// State of an in-flight drag.
#[derive(Clone, Debug, PartialEq)]
pub struct DragContext {
    pub event_id: String,
    pub original: CalendarEvent,
    pub duration: Duration,
    /// Pointer position relative to the event box at grab time.
    pub pointer_offset: Point,
    pub pointer_kind: PointerKind,
    pub pointer_pos: Option<Point>,
    pub hovered: Option<DropTarget>,
}

impl DragContext {
    pub fn from_event(
        event: &CalendarEvent,
        pointer_offset: Point,
        pointer_kind: PointerKind,
    ) -> Self {
        Self {
            event_id: event.id.clone(),
            original: event.clone(),
            duration: event.duration(),
            pointer_offset,
            pointer_kind,
            pointer_pos: None,
            hovered: None,
        }
    }

    pub fn hovered_start(&self) -> Option<NaiveDateTime> {
        self.hovered.map(|target| target.resolve_start(&self.original))
    }

    /// Top-left corner of the drag preview, keeping the grabbed point under
    /// the pointer.
    pub fn preview_origin(&self) -> Option<Point> {
        self.pointer_pos.map(|pos| pos - self.pointer_offset)
    }

    /// Event as it would be after dropping on `target`.
    pub fn proposed_event(&self, target: DropTarget) -> CalendarEvent {
        self.original.moved_to(target.resolve_start(&self.original))
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragContext),
}

#[derive(Clone, Debug, PartialEq)]
pub enum DragOutcome {
    /// Dropped on a new slot; carries the rescheduled event.
    Moved(CalendarEvent),
    /// Dropped where it started.
    Unchanged,
    Cancelled,
}

#[derive(Debug, Default)]
pub struct DragManager {
    state: DragState,
}

impl DragManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Start dragging `event`. Ignored while another drag is active.
    pub fn begin(
        &mut self,
        event: &CalendarEvent,
        pointer_offset: Point,
        pointer_kind: PointerKind,
    ) -> bool {
        if let DragState::Dragging(current) = &self.state {
            log::debug!(
                "ignoring drag of {} while {} is active",
                event.id,
                current.event_id
            );
            return false;
        }
        log::debug!("drag started for event {} ({:?})", event.id, pointer_kind);
        self.state =
            DragState::Dragging(DragContext::from_event(event, pointer_offset, pointer_kind));
        true
    }

    pub fn active(&self) -> Option<&DragContext> {
        match &self.state {
            DragState::Dragging(context) => Some(context),
            DragState::Idle => None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active().is_some()
    }

    pub fn dragged_event_id(&self) -> Option<&str> {
        self.active().map(|context| context.event_id.as_str())
    }

    pub fn update_hover(&mut self, target: DropTarget, pointer_pos: Point) {
        if let DragState::Dragging(context) = &mut self.state {
            context.hovered = Some(target);
            context.pointer_pos = Some(pointer_pos);
        }
    }

    /// End the drag. `target` is the cell under the pointer at release; when
    /// absent the last hovered cell is used, and with neither the drag is
    /// cancelled.
    pub fn finish(&mut self, target: Option<DropTarget>) -> DragOutcome {
        let DragState::Dragging(context) = std::mem::take(&mut self.state) else {
            return DragOutcome::Cancelled;
        };

        let Some(target) = target.or(context.hovered) else {
            log::debug!("drag of {} released outside the grid", context.event_id);
            return DragOutcome::Cancelled;
        };

        let moved = context.proposed_event(target);
        if moved.start == context.original.start {
            return DragOutcome::Unchanged;
        }
        if let Err(err) = moved.validate() {
            log::warn!("Drop would create invalid event {}, ignoring: {}", moved.id, err);
            return DragOutcome::Cancelled;
        }

        log::debug!(
            "event {} moved from {} to {}",
            moved.id,
            context.original.start,
            moved.start
        );
        DragOutcome::Moved(moved)
    }

    pub fn cancel(&mut self) -> Option<DragContext> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(context) => Some(context),
            DragState::Idle => None,
        }
    }
}
