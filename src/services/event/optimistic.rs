//! Optimistic event state kept by the caller of the layout engine.
//!
//! `confirmed` is the last server-acknowledged list; `pending` holds
//! mutations still in flight. Each render consumes the merged
//! [`OptimisticEvents::displayed`] snapshot and nothing else.

use crate::models::event::CalendarEvent;

use super::{EventMutation, EventSink};

#[derive(Debug, Clone, Default)]
pub struct OptimisticEvents {
    confirmed: Vec<CalendarEvent>,
    pending: Vec<EventMutation>,
}

impl OptimisticEvents {
    pub fn new(confirmed: Vec<CalendarEvent>) -> Self {
        Self {
            confirmed,
            pending: Vec::new(),
        }
    }

    pub fn confirmed(&self) -> &[CalendarEvent] {
        &self.confirmed
    }

    pub fn pending(&self) -> &[EventMutation] {
        &self.pending
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Record a mutation.
    ///
    /// Creates are always kept. An update or delete aimed at a pending
    /// create folds into it; otherwise it replaces any older update or
    /// delete for the same event.
    pub fn propose(&mut self, mutation: EventMutation) {
        let pending_create = self.pending.iter().position(|existing| {
            matches!(existing, EventMutation::Create(event) if event.id == mutation.event_id())
        });

        match (mutation, pending_create) {
            (EventMutation::Create(event), _) => self.pending.push(EventMutation::Create(event)),
            (EventMutation::Update(event), Some(index)) => {
                self.pending[index] = EventMutation::Create(event);
            }
            (EventMutation::Delete(_), Some(index)) => {
                self.pending.remove(index);
            }
            (mutation, None) => {
                self.pending
                    .retain(|existing| existing.event_id() != mutation.event_id());
                self.pending.push(mutation);
            }
        }
    }

    /// Confirmed events with pending mutations applied.
    pub fn displayed(&self) -> Vec<CalendarEvent> {
        let mut events = self.confirmed.clone();
        for mutation in &self.pending {
            apply(&mut events, mutation);
        }
        events
    }

    /// The server accepted the mutation for `event_id`.
    pub fn confirm(&mut self, event_id: &str) -> bool {
        let Some(index) = self
            .pending
            .iter()
            .position(|mutation| mutation.event_id() == event_id)
        else {
            return false;
        };
        let mutation = self.pending.remove(index);
        apply(&mut self.confirmed, &mutation);
        true
    }

    /// The server accepted the mutation for `event_id` and returned `saved`,
    /// which may carry a new id for a created session.
    pub fn confirm_saved(&mut self, event_id: &str, saved: CalendarEvent) -> bool {
        let Some(index) = self
            .pending
            .iter()
            .position(|mutation| mutation.event_id() == event_id)
        else {
            return false;
        };
        self.pending.remove(index);
        self.confirmed.retain(|existing| existing.id != event_id);
        apply(&mut self.confirmed, &EventMutation::Update(saved));
        true
    }

    /// The server rejected the mutation for `event_id`; the display falls
    /// back to the confirmed state.
    pub fn revert(&mut self, event_id: &str) -> Option<EventMutation> {
        let index = self
            .pending
            .iter()
            .position(|mutation| mutation.event_id() == event_id)?;
        log::info!("reverting pending change to event {}", event_id);
        Some(self.pending.remove(index))
    }

    /// Replace the confirmed list with a fresh server snapshot. Pending
    /// mutations stay in flight.
    pub fn replace_confirmed(&mut self, confirmed: Vec<CalendarEvent>) {
        self.confirmed = confirmed;
    }
}

fn apply(events: &mut Vec<CalendarEvent>, mutation: &EventMutation) {
    match mutation {
        EventMutation::Create(event) | EventMutation::Update(event) => {
            match events.iter_mut().find(|existing| existing.id == event.id) {
                Some(existing) => *existing = event.clone(),
                None => events.push(event.clone()),
            }
        }
        EventMutation::Delete(id) => events.retain(|existing| &existing.id != id),
    }
}

impl EventSink for OptimisticEvents {
    fn on_event_create(&mut self, proposed: CalendarEvent) {
        self.propose(EventMutation::Create(proposed));
    }

    fn on_event_update(&mut self, updated: CalendarEvent) {
        self.propose(EventMutation::Update(updated));
    }

    fn on_event_delete(&mut self, event_id: String) {
        self.propose(EventMutation::Delete(event_id));
    }
}
