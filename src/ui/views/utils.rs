//! Text helpers for event chips and tooltips.

use crate::models::event::CalendarEvent;

/// Time range label, e.g. "09:00 - 11:00", "All day" or a date span for
/// multi-day sessions.
pub fn format_time_range(event: &CalendarEvent) -> String {
    if event.all_day {
        return "All day".to_string();
    }
    if event.start.date() != event.end.date() {
        return format!(
            "{} - {}",
            event.start.format("%d/%m %H:%M"),
            event.end.format("%d/%m %H:%M")
        );
    }
    format!("{} - {}", event.start.format("%H:%M"), event.end.format("%H:%M"))
}

/// Generate a rich tooltip string for a session.
/// Shows title, time range, participants and reference.
pub fn format_event_tooltip(event: &CalendarEvent) -> String {
    let mut lines = vec![event.title.clone()];

    lines.push(format!(
        "{} ({})",
        format_time_range(event),
        event.start.format("%A %d %B")
    ));

    if event.participant_count > 0 {
        let noun = if event.participant_count == 1 {
            "participant"
        } else {
            "participants"
        };
        lines.push(format!("{} {}", event.participant_count, noun));
    }

    if let Some(reference) = event.reference.as_deref().filter(|r| !r.is_empty()) {
        lines.push(format!("Ref. {}", reference));
    }

    if let Some(ref description) = event.description {
        if !description.is_empty() {
            let preview = if description.chars().count() > 100 {
                format!("{}...", description.chars().take(100).collect::<String>())
            } else {
                description.clone()
            };
            lines.push(String::new());
            lines.push(preview);
        }
    }

    lines.join("\n")
}
