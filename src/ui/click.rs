// Click vs double-click disambiguation
//
// The drag gesture swallows the platform's double-click detection, so clicks
// on events are counted here: a first click arms a deadline, a second click
// on the same event before it expires fires a double-click.

use std::time::{Duration, Instant};

/// Window within which a second click counts as a double-click.
pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(300);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ClickState {
    #[default]
    Idle,
    ArmedSingleClick {
        event_id: String,
        deadline: Instant,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// First click; may still become a double-click or a drag.
    Armed,
    /// Second click inside the window. The caller opens the editor and must
    /// not start a drag for this press.
    DoubleClick { event_id: String },
}

#[derive(Clone, Debug)]
pub struct ClickTracker {
    state: ClickState,
    window: Duration,
}

impl Default for ClickTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ClickTracker {
    pub fn new() -> Self {
        Self::with_window(DOUBLE_CLICK_WINDOW)
    }

    pub fn with_window(window: Duration) -> Self {
        Self {
            state: ClickState::Idle,
            window,
        }
    }

    pub fn state(&self) -> &ClickState {
        &self.state
    }

    pub fn register_click(&mut self, event_id: &str, now: Instant) -> ClickOutcome {
        if let ClickState::ArmedSingleClick {
            event_id: armed_id,
            deadline,
        } = &self.state
        {
            if armed_id == event_id && now <= *deadline {
                self.state = ClickState::Idle;
                return ClickOutcome::DoubleClick {
                    event_id: event_id.to_string(),
                };
            }
        }

        self.state = ClickState::ArmedSingleClick {
            event_id: event_id.to_string(),
            deadline: now + self.window,
        };
        ClickOutcome::Armed
    }

    /// Expire an armed click whose window has passed, returning its event id.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let expired = matches!(
            &self.state,
            ClickState::ArmedSingleClick { deadline, .. } if now > *deadline
        );
        if !expired {
            return None;
        }
        match std::mem::take(&mut self.state) {
            ClickState::ArmedSingleClick { event_id, .. } => Some(event_id),
            ClickState::Idle => None,
        }
    }

    pub fn reset(&mut self) {
        self.state = ClickState::Idle;
    }
}
