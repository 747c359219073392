// Event module
// Training session event as consumed and re-emitted by the calendar core

use chrono::{DateTime, Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation failures for a [`CalendarEvent`].
///
/// These belong to the validation layer in front of the layout engine; the
/// layout functions themselves assume well-formed input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    #[error("Event title cannot be empty")]
    EmptyTitle,
    #[error("Event end time ({end}) is before its start time ({start})")]
    InvalidInterval {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    #[error("Event {0} is required")]
    MissingField(&'static str),
}

/// Fixed palette a training session can be painted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventColor {
    #[default]
    Sky,
    Amber,
    Violet,
    Rose,
    Emerald,
    Orange,
}

/// A scheduled training session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(deserialize_with = "wall_clock::deserialize")]
    pub start: NaiveDateTime,
    #[serde(deserialize_with = "wall_clock::deserialize")]
    pub end: NaiveDateTime,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default)]
    pub color: EventColor,
    #[serde(default)]
    pub formation_id: String,
    #[serde(default, rename = "nombreParticipants")]
    pub participant_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// Parse a timestamp from the wire. RFC 3339 instants (`Z` or an offset)
/// keep the clock reading as written and drop the offset; plain ISO-8601
/// local timestamps are taken as is.
pub fn parse_wall_clock(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(instant) => Ok(instant.naive_local()),
        Err(_) => raw.parse::<NaiveDateTime>(),
    }
}

mod wall_clock {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_wall_clock(&raw).map_err(serde::de::Error::custom)
    }
}

impl CalendarEvent {
    /// Create a new event with required fields
    ///
    /// # Examples
    /// ```
    /// use formation_calendar::models::event::CalendarEvent;
    /// use chrono::NaiveDate;
    ///
    /// let start = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap().and_hms_opt(9, 0, 0).unwrap();
    /// let end = start + chrono::Duration::hours(2);
    /// let event = CalendarEvent::new("evt-1", "Safety induction", start, end).unwrap();
    /// assert_eq!(event.duration(), chrono::Duration::hours(2));
    /// ```
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self, EventError> {
        let event = Self {
            id: id.into(),
            title: title.into(),
            description: None,
            start,
            end,
            all_day: false,
            color: EventColor::default(),
            formation_id: String::new(),
            participant_count: 0,
            reference: None,
        };
        event.validate()?;
        Ok(event)
    }

    /// Create a builder for constructing events with optional fields
    pub fn builder() -> EventBuilder {
        EventBuilder::new()
    }

    /// Validate the event. Zero-length sessions are allowed.
    pub fn validate(&self) -> Result<(), EventError> {
        if self.title.trim().is_empty() {
            return Err(EventError::EmptyTitle);
        }

        if self.end < self.start {
            return Err(EventError::InvalidInterval {
                start: self.start,
                end: self.end,
            });
        }

        Ok(())
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// True for all-day events and for events whose start and end fall on
    /// different calendar dates.
    pub fn is_multi_day(&self) -> bool {
        self.all_day || self.start.date() != self.end.date()
    }

    /// Copy of this event moved to `new_start`, keeping its duration.
    pub fn moved_to(&self, new_start: NaiveDateTime) -> Self {
        let mut moved = self.clone();
        moved.start = new_start;
        moved.end = new_start + self.duration();
        moved
    }
}

/// Builder for creating events with optional fields
#[derive(Default)]
pub struct EventBuilder {
    id: Option<String>,
    title: Option<String>,
    description: Option<String>,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    all_day: bool,
    color: EventColor,
    formation_id: Option<String>,
    participant_count: u32,
    reference: Option<String>,
}

impl EventBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn start(mut self, start: NaiveDateTime) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    pub fn all_day(mut self, all_day: bool) -> Self {
        self.all_day = all_day;
        self
    }

    pub fn color(mut self, color: EventColor) -> Self {
        self.color = color;
        self
    }

    /// Link the session to its training-catalog entry
    pub fn formation_id(mut self, formation_id: impl Into<String>) -> Self {
        self.formation_id = Some(formation_id.into());
        self
    }

    pub fn participant_count(mut self, count: u32) -> Self {
        self.participant_count = count;
        self
    }

    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Build the event
    pub fn build(self) -> Result<CalendarEvent, EventError> {
        let id = self.id.ok_or(EventError::MissingField("id"))?;
        let title = self.title.ok_or(EventError::MissingField("title"))?;
        let start = self.start.ok_or(EventError::MissingField("start time"))?;
        let end = self.end.ok_or(EventError::MissingField("end time"))?;

        let event = CalendarEvent {
            id,
            title,
            description: self.description,
            start,
            end,
            all_day: self.all_day,
            color: self.color,
            formation_id: self.formation_id.unwrap_or_default(),
            participant_count: self.participant_count,
            reference: self.reference,
        };

        event.validate()?;
        Ok(event)
    }
}
