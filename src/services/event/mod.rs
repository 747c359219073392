//! Mutation boundary between the calendar core and event persistence.
//!
//! The core never stores events. Gestures turn into [`EventMutation`]s that
//! are handed to an [`EventSink`]; the sink's owner persists them and feeds
//! the next event snapshot back into the layout.

use serde::{Deserialize, Serialize};

use crate::models::event::CalendarEvent;

pub mod optimistic;

pub use optimistic::OptimisticEvents;

/// Mutation intent emitted by the calendar core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "lowercase")]
pub enum EventMutation {
    Create(CalendarEvent),
    Update(CalendarEvent),
    Delete(String),
}

impl EventMutation {
    /// Id of the event the mutation applies to.
    pub fn event_id(&self) -> &str {
        match self {
            EventMutation::Create(event) | EventMutation::Update(event) => &event.id,
            EventMutation::Delete(id) => id,
        }
    }
}

/// Receiver of create/update/delete intents.
#[cfg_attr(test, mockall::automock)]
pub trait EventSink {
    fn on_event_create(&mut self, proposed: CalendarEvent);
    fn on_event_update(&mut self, updated: CalendarEvent);
    fn on_event_delete(&mut self, event_id: String);
}

/// Sink that keeps every mutation in arrival order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub mutations: Vec<EventMutation>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<EventMutation> {
        std::mem::take(&mut self.mutations)
    }
}

impl EventSink for RecordingSink {
    fn on_event_create(&mut self, proposed: CalendarEvent) {
        self.mutations.push(EventMutation::Create(proposed));
    }

    fn on_event_update(&mut self, updated: CalendarEvent) {
        self.mutations.push(EventMutation::Update(updated));
    }

    fn on_event_delete(&mut self, event_id: String) {
        self.mutations.push(EventMutation::Delete(event_id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> CalendarEvent {
        let start = NaiveDate::from_ymd_opt(2025, 3, 3)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        CalendarEvent::new("s-1", "Induction", start, start + chrono::Duration::hours(1)).unwrap()
    }

    #[test]
    fn test_recording_sink_keeps_order() {
        let mut sink = RecordingSink::new();
        sink.on_event_update(sample());
        sink.on_event_delete("s-1".to_string());

        let mutations = sink.take();
        assert_eq!(mutations.len(), 2);
        assert_eq!(mutations[0].event_id(), "s-1");
        assert!(matches!(mutations[1], EventMutation::Delete(ref id) if id == "s-1"));
        assert!(sink.mutations.is_empty());
    }

    #[test]
    fn test_mutation_wire_format() {
        let json = serde_json::to_value(EventMutation::Delete("s-1".to_string())).unwrap();
        assert_eq!(json["kind"], "delete");
        assert_eq!(json["payload"], "s-1");
    }
}
