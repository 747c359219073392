//! Track assignment engine.
//!
//! Greedy interval colouring: events are visited from the latest end time
//! backwards (ties: earlier start first) and each one takes the lowest track
//! whose occupied span begins at or after the event's end. Visiting in
//! reverse time order is the mirror image of the classic earliest-start
//! sweep, so the number of tracks opened equals the largest set of mutually
//! overlapping events, and long-running events claim the low tracks first.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::models::event::CalendarEvent;

/// Event id -> track index for one render pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrackAssignment {
    tracks: HashMap<String, usize>,
    track_count: usize,
}

impl TrackAssignment {
    pub fn track_of(&self, event_id: &str) -> Option<usize> {
        self.tracks.get(event_id).copied()
    }

    /// Number of tracks opened (0 when no events were assigned).
    pub fn track_count(&self) -> usize {
        self.track_count
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.tracks.iter().map(|(id, track)| (id.as_str(), *track))
    }
}

/// Assign tracks using each event's own `[start, end)` interval.
pub fn assign_tracks(events: &[&CalendarEvent]) -> TrackAssignment {
    assign_tracks_by(events, |event| (event.start, event.end))
}

/// Assign tracks using the interval returned by `span` for each event, e.g.
/// the day-granular span used by the all-day strip.
pub fn assign_tracks_by<F>(events: &[&CalendarEvent], span: F) -> TrackAssignment
where
    F: Fn(&CalendarEvent) -> (NaiveDateTime, NaiveDateTime),
{
    let mut spans: Vec<(&CalendarEvent, NaiveDateTime, NaiveDateTime)> = events
        .iter()
        .map(|event| {
            let (start, end) = span(event);
            (*event, start, end)
        })
        .collect();

    spans.sort_by(|(a, a_start, a_end), (b, b_start, b_end)| {
        b_end
            .cmp(a_end)
            .then_with(|| a_start.cmp(b_start))
            .then_with(|| a.id.cmp(&b.id))
    });

    // Earliest start placed on each track so far.
    let mut track_frontiers: Vec<NaiveDateTime> = Vec::new();
    let mut tracks = HashMap::with_capacity(spans.len());

    for (event, start, end) in spans {
        let track = match track_frontiers.iter().position(|frontier| end <= *frontier) {
            Some(track) => track,
            None => {
                track_frontiers.push(start);
                track_frontiers.len() - 1
            }
        };
        track_frontiers[track] = start;
        log::trace!("event {} -> track {}", event.id, track);
        tracks.insert(event.id.clone(), track);
    }

    log::debug!(
        "assigned {} events to {} tracks",
        tracks.len(),
        track_frontiers.len()
    );

    TrackAssignment {
        tracks,
        track_count: track_frontiers.len(),
    }
}
