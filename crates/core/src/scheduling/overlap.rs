use chrono::{DateTime, Utc};

use crate::storage::TimeWindow;

use super::types::Event;

/// Half-open interval intersection test.
///
/// An event intersects the window exactly when it starts before the
/// window ends and ends after the window starts. This single test covers
/// all four cases a calendar view cares about: fully contained, starting
/// before and ending inside, starting inside and ending after, and fully
/// spanning the window. Boundary policy is inclusive-start,
/// exclusive-end on both intervals, so an event ending exactly at the
/// window start does not overlap.
pub fn overlaps(window: &TimeWindow, starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> bool {
    starts_at < window.end && ends_at > window.start
}

/// Filters events down to those intersecting the query window.
pub fn events_overlapping<'a>(events: &'a [Event], window: &TimeWindow) -> Vec<&'a Event> {
    events
        .iter()
        .filter(|event| overlaps(window, event.starts_at, event.ends_at))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduling::types::Event;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn instant(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, d, h, 0, 0).unwrap()
    }

    fn window(d0: u32, h0: u32, d1: u32, h1: u32) -> TimeWindow {
        TimeWindow::new(instant(d0, h0), instant(d1, h1)).unwrap()
    }

    #[test]
    fn test_fully_contained_event_overlaps() {
        assert!(overlaps(&window(1, 0, 30, 0), instant(10, 9), instant(10, 17)));
    }

    #[test]
    fn test_event_straddling_window_start_overlaps() {
        assert!(overlaps(&window(10, 12, 30, 0), instant(10, 9), instant(10, 17)));
    }

    #[test]
    fn test_event_straddling_window_end_overlaps() {
        assert!(overlaps(&window(1, 0, 10, 12), instant(10, 9), instant(10, 17)));
    }

    #[test]
    fn test_event_spanning_entire_window_overlaps() {
        assert!(overlaps(&window(10, 10, 10, 11), instant(10, 9), instant(10, 17)));
    }

    #[test]
    fn test_event_strictly_before_window_does_not_overlap() {
        assert!(!overlaps(&window(20, 0, 30, 0), instant(10, 9), instant(10, 17)));
    }

    #[test]
    fn test_event_strictly_after_window_does_not_overlap() {
        assert!(!overlaps(&window(1, 0, 5, 0), instant(10, 9), instant(10, 17)));
    }

    #[test]
    fn test_event_ending_at_window_start_does_not_overlap() {
        // Touching boundaries share no instant under the half-open policy.
        assert!(!overlaps(&window(10, 17, 30, 0), instant(10, 9), instant(10, 17)));
    }

    #[test]
    fn test_event_starting_at_window_end_does_not_overlap() {
        assert!(!overlaps(&window(1, 0, 10, 9), instant(10, 9), instant(10, 17)));
    }

    #[test]
    fn test_event_starting_at_window_start_overlaps() {
        assert!(overlaps(&window(10, 9, 30, 0), instant(10, 9), instant(10, 17)));
    }

    #[test]
    fn test_events_overlapping_filters_list() {
        let user = Uuid::new_v4();
        let events = vec![
            Event::new(user, "inside", instant(10, 9), instant(10, 17)),
            Event::new(user, "before", instant(1, 9), instant(1, 17)),
            Event::new(user, "after", instant(28, 9), instant(28, 17)),
        ];

        let hits = events_overlapping(&events, &window(5, 0, 20, 0));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "inside");
    }
}
