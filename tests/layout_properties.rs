// Property-based tests for track assignment, day partitioning and the
// position calculator

mod fixtures;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use fixtures::dates::*;
use fixtures::sessions::timed;
use formation_calendar::models::event::CalendarEvent;
use formation_calendar::models::settings::CalendarSettings;
use formation_calendar::ui::views::interval::{intersects_day, overlaps};
use formation_calendar::ui::views::position::{adjusted_interval, position_events_for_day};
use formation_calendar::ui::views::{all_events_for_day, assign_tracks};
use proptest::prelude::*;

/// (start slot, length in slots) pairs on a quarter-hour grid starting at
/// Monday 00:00. Slots may run into the following days.
fn slot_grid(max_len: u32) -> impl Strategy<Value = Vec<(u32, u32)>> {
    prop::collection::vec((0u32..288, 1u32..max_len), 0..24)
}

fn slot_time(slot: u32) -> NaiveDateTime {
    at(monday(), 0, 0) + Duration::minutes(i64::from(slot) * 15)
}

fn build_events(slots: &[(u32, u32)]) -> Vec<CalendarEvent> {
    slots
        .iter()
        .enumerate()
        .map(|(i, (start, len))| {
            timed(&format!("e{:02}", i), slot_time(*start), slot_time(start + len))
        })
        .collect()
}

/// Events that all contain Monday 12:00, each reaching back `before` and
/// forward `after` quarter hours. Everything stays inside the 08:00-17:00
/// window.
fn events_around_noon(reach: &[(u32, u32)]) -> Vec<CalendarEvent> {
    let noon = at(monday(), 12, 0);
    reach
        .iter()
        .enumerate()
        .map(|(i, (before, after))| {
            let start = noon - Duration::minutes(i64::from(*before) * 15);
            let end = noon + Duration::minutes(i64::from(*after) * 15);
            timed(&format!("n{}", i), start, end)
        })
        .collect()
}

fn max_concurrency(events: &[CalendarEvent]) -> usize {
    events
        .iter()
        .map(|probe| {
            events
                .iter()
                .filter(|other| other.start <= probe.start && probe.start < other.end)
                .count()
        })
        .max()
        .unwrap_or(0)
}

proptest! {
    #[test]
    fn prop_sequential_events_share_first_track(
        lengths in prop::collection::vec((0u32..8, 1u32..12), 1..20)
    ) {
        let mut cursor = 0;
        let mut slots = Vec::new();
        for (gap, len) in lengths {
            cursor += gap;
            slots.push((cursor, len));
            cursor += len;
        }
        let events = build_events(&slots);
        let refs: Vec<_> = events.iter().collect();

        let tracks = assign_tracks(&refs);
        prop_assert_eq!(tracks.track_count(), 1);
        for event in &events {
            prop_assert_eq!(tracks.track_of(&event.id), Some(0));
        }
    }

    #[test]
    fn prop_overlapping_events_never_share_track(slots in slot_grid(40)) {
        let events = build_events(&slots);
        let refs: Vec<_> = events.iter().collect();
        let tracks = assign_tracks(&refs);

        prop_assert_eq!(tracks.len(), events.len());
        for (i, a) in events.iter().enumerate() {
            for b in &events[i + 1..] {
                if overlaps(a.start, a.end, b.start, b.end) {
                    prop_assert_ne!(tracks.track_of(&a.id), tracks.track_of(&b.id));
                }
            }
        }
    }

    #[test]
    fn prop_track_count_matches_peak_concurrency(slots in slot_grid(40)) {
        let events = build_events(&slots);
        let refs: Vec<_> = events.iter().collect();

        prop_assert_eq!(assign_tracks(&refs).track_count(), max_concurrency(&events));
    }

    #[test]
    fn prop_day_partition_intersects_and_sorted(slots in slot_grid(200), offset in 0i64..4) {
        let events = build_events(&slots);
        let day: NaiveDate = monday() + Duration::days(offset);
        let selected = all_events_for_day(&events, day);

        for event in &selected {
            prop_assert!(intersects_day(event, day));
        }
        for pair in selected.windows(2) {
            prop_assert!(pair[0].start <= pair[1].start);
        }
        let expected = events.iter().filter(|e| intersects_day(e, day)).count();
        prop_assert_eq!(selected.len(), expected);
    }

    #[test]
    fn prop_clipped_interval_is_never_empty(slots in slot_grid(200), offset in 0i64..4) {
        let settings = CalendarSettings::default();
        let events = build_events(&slots);
        let day = monday() + Duration::days(offset);

        for event in all_events_for_day(&events, day) {
            let (start, end) = adjusted_interval(event, day, &settings);
            prop_assert!(end > start, "{} clipped to {} - {}", event.id, start, end);
        }
    }

    #[test]
    fn prop_positions_stay_inside_column(slots in slot_grid(24)) {
        let settings = CalendarSettings::default();
        let events = build_events(&slots);
        let day = monday();
        let timed: Vec<_> = events.iter().filter(|e| e.start.date() == day).collect();

        let positioned = position_events_for_day(&timed, day, &settings);
        prop_assert_eq!(positioned.len(), timed.len());

        for item in &positioned {
            prop_assert!(item.width > 0.0 && item.width <= 1.0);
            prop_assert!(item.left >= 0.0);
            prop_assert!(item.left + item.width <= 1.0 + 1e-5);
            prop_assert!(item.top >= 0.0);
            prop_assert!(item.bottom() <= settings.grid_height() + 1e-3);
        }

        for (i, a) in positioned.iter().enumerate() {
            for b in &positioned[i + 1..] {
                if overlaps(a.adjusted_start, a.adjusted_end, b.adjusted_start, b.adjusted_end) {
                    prop_assert_ne!(a.column, b.column);
                }
            }
        }
    }

    #[test]
    fn prop_concurrent_widths_fill_the_column(
        reach in prop::collection::vec((0u32..16, 1u32..16), 1..8)
    ) {
        let settings = CalendarSettings::default();
        let events = events_around_noon(&reach);
        let refs: Vec<_> = events.iter().collect();

        let positioned = position_events_for_day(&refs, monday(), &settings);
        prop_assert_eq!(positioned.len(), events.len());

        let total: f32 = positioned.iter().map(|item| item.width).sum();
        prop_assert!((total - 1.0).abs() < 1e-5, "widths sum to {}", total);

        let mut columns: Vec<usize> = positioned.iter().map(|item| item.column).collect();
        columns.sort_unstable();
        prop_assert_eq!(columns, (0..events.len()).collect::<Vec<_>>());
    }
}
