// Calendar interaction controller
//
// Glues the drag state machine and the click tracker to an EventSink. Each
// handler returns what the caller should do next; persistence happens behind
// the sink.

use std::time::Instant;

use chrono::Duration;

use crate::models::event::CalendarEvent;
use crate::models::settings::CalendarSettings;
use crate::services::event::EventSink;

use super::click::{ClickOutcome, ClickTracker};
use super::drag::{DragManager, DragOutcome, DropTarget, Point, PointerKind};

/// Title given to sessions created by clicking an empty slot.
pub const NEW_EVENT_TITLE: &str = "New session";

/// Prefix of the provisional ids handed to unsaved sessions. Persistence
/// replaces them with real ids when it confirms the create.
pub const PROVISIONAL_ID_PREFIX: &str = "tmp-";

pub fn is_provisional_id(event_id: &str) -> bool {
    event_id.starts_with(PROVISIONAL_ID_PREFIX)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerDownResult {
    /// A drag is armed for the event.
    DragStarted,
    /// Second click: open the editor for this event.
    OpenEditor(String),
    /// Another drag is already running.
    Ignored,
}

/// Event proposed by clicking `target`: it starts at the slot (or at the
/// first visible hour for month cells) and lasts the default duration.
/// `id` is provisional until persistence assigns the real one.
pub fn propose_new_event(
    id: impl Into<String>,
    target: DropTarget,
    settings: &CalendarSettings,
) -> CalendarEvent {
    let start = match target.time {
        Some(time) => target.date.and_time(time),
        None => crate::utils::date::at_hour(target.date, settings.start_hour),
    };
    let end = start + Duration::minutes(i64::from(settings.default_event_minutes));

    CalendarEvent {
        id: id.into(),
        title: NEW_EVENT_TITLE.to_string(),
        description: None,
        start,
        end,
        all_day: false,
        color: Default::default(),
        formation_id: String::new(),
        participant_count: 0,
        reference: None,
    }
}

pub struct CalendarController<S: EventSink> {
    sink: S,
    settings: CalendarSettings,
    drag: DragManager,
    clicks: ClickTracker,
    next_provisional_id: u64,
}

impl<S: EventSink> CalendarController<S> {
    pub fn new(sink: S, settings: CalendarSettings) -> Self {
        Self {
            sink,
            settings,
            drag: DragManager::new(),
            clicks: ClickTracker::new(),
            next_provisional_id: 1,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn settings(&self) -> &CalendarSettings {
        &self.settings
    }

    /// Event currently being dragged, if any. The layout renders it as a
    /// placeholder.
    pub fn dragging_event_id(&self) -> Option<&str> {
        self.drag.dragged_event_id()
    }

    pub fn drag(&self) -> &DragManager {
        &self.drag
    }

    /// Pointer or touch press on an event box. `grab_offset` is the pointer
    /// position relative to the box.
    pub fn pointer_down(
        &mut self,
        event: &CalendarEvent,
        grab_offset: Point,
        pointer_kind: PointerKind,
        now: Instant,
    ) -> PointerDownResult {
        match self.clicks.register_click(&event.id, now) {
            ClickOutcome::DoubleClick { event_id } => {
                // Swallow the press so the second click does not start a drag
                self.drag.cancel();
                PointerDownResult::OpenEditor(event_id)
            }
            ClickOutcome::Armed => {
                if self.drag.begin(event, grab_offset, pointer_kind) {
                    PointerDownResult::DragStarted
                } else {
                    PointerDownResult::Ignored
                }
            }
        }
    }

    pub fn pointer_moved(&mut self, target: DropTarget, pointer_pos: Point) {
        self.drag.update_hover(target, pointer_pos);
    }

    /// Release. A move is forwarded to the sink; the caller keeps rendering
    /// its current list until new data arrives. A press that became a move
    /// no longer counts toward a double-click.
    pub fn pointer_up(&mut self, target: Option<DropTarget>) -> DragOutcome {
        let outcome = self.drag.finish(target);
        if let DragOutcome::Moved(updated) = &outcome {
            self.clicks.reset();
            self.sink.on_event_update(updated.clone());
        }
        outcome
    }

    pub fn pointer_cancelled(&mut self) {
        if let Some(context) = self.drag.cancel() {
            log::debug!("drag of {} cancelled", context.event_id);
        }
    }

    /// Click on an empty grid cell.
    pub fn empty_cell_clicked(&mut self, target: DropTarget) -> CalendarEvent {
        let id = format!("{}{}", PROVISIONAL_ID_PREFIX, self.next_provisional_id);
        self.next_provisional_id += 1;
        let proposed = propose_new_event(id, target, &self.settings);
        self.sink.on_event_create(proposed.clone());
        proposed
    }

    pub fn delete_event(&mut self, event_id: &str) {
        self.sink.on_event_delete(event_id.to_string());
    }

    /// Expire a pending single click. Returns the event id once the
    /// double-click window has passed.
    pub fn tick(&mut self, now: Instant) -> Option<String> {
        self.clicks.poll(now)
    }
}
