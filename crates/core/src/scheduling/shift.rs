use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use super::error::EventError;
use super::types::Event;

/// A (day-count, minute-count) delta produced by dragging an event on
/// the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct TimeShift {
    pub days: i64,
    pub minutes: i64,
}

impl TimeShift {
    pub fn new(days: i64, minutes: i64) -> Self {
        Self { days, minutes }
    }

    /// Applies the shift to an instant: days first, then minutes.
    ///
    /// With instants on a fixed timeline the two additions commute, so
    /// applying two shifts in sequence equals applying their sum.
    pub fn apply(&self, instant: DateTime<Utc>) -> DateTime<Utc> {
        instant + Duration::days(self.days) + Duration::minutes(self.minutes)
    }

    pub fn is_zero(&self) -> bool {
        self.days == 0 && self.minutes == 0
    }
}

/// Drag-move: shifts both ends of the event by the same delta and takes
/// the all-day flag from the request.
pub fn move_event(event: &mut Event, shift: TimeShift, all_day: bool) -> Result<(), EventError> {
    let starts_at = shift.apply(event.starts_at);
    let ends_at = shift.apply(event.ends_at);
    if ends_at <= starts_at {
        return Err(EventError::InvalidTimeRange);
    }
    event.starts_at = starts_at;
    event.ends_at = ends_at;
    event.all_day = all_day;
    Ok(())
}

/// Drag-resize: shifts only the end of the event. A shift that would
/// leave the event ending at or before its start is rejected and the
/// event is left untouched.
pub fn resize_event(event: &mut Event, shift: TimeShift) -> Result<(), EventError> {
    let ends_at = shift.apply(event.ends_at);
    if ends_at <= event.starts_at {
        return Err(EventError::InvalidTimeRange);
    }
    event.ends_at = ends_at;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn instant(d: u32, h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, d, h, m, 0).unwrap()
    }

    fn sample_event() -> Event {
        Event::new(Uuid::new_v4(), "Boarding", instant(10, 9, 0), instant(10, 17, 0))
    }

    #[test]
    fn test_shift_adds_days_then_minutes() {
        let shift = TimeShift::new(1, 30);
        assert_eq!(shift.apply(instant(10, 9, 0)), instant(11, 9, 30));
    }

    #[test]
    fn test_shift_composition_is_additive() {
        let t = instant(10, 9, 0);
        let a = TimeShift::new(2, -15);
        let b = TimeShift::new(-1, 45);
        let sum = TimeShift::new(a.days + b.days, a.minutes + b.minutes);

        assert_eq!(b.apply(a.apply(t)), sum.apply(t));
    }

    #[test]
    fn test_negative_shift_moves_backwards() {
        let shift = TimeShift::new(-1, -30);
        assert_eq!(shift.apply(instant(10, 9, 30)), instant(9, 9, 0));
    }

    #[test]
    fn test_move_shifts_both_ends_and_sets_all_day() {
        let mut event = sample_event();
        move_event(&mut event, TimeShift::new(1, 30), true).unwrap();

        assert_eq!(event.starts_at, instant(11, 9, 30));
        assert_eq!(event.ends_at, instant(11, 17, 30));
        assert!(event.all_day);
    }

    #[test]
    fn test_resize_shifts_only_the_end() {
        let mut event = sample_event();
        resize_event(&mut event, TimeShift::new(0, -15)).unwrap();

        assert_eq!(event.starts_at, instant(10, 9, 0));
        assert_eq!(event.ends_at, instant(10, 16, 45));
    }

    #[test]
    fn test_resize_past_the_start_is_rejected() {
        let mut event = sample_event();
        let before = event.clone();

        let result = resize_event(&mut event, TimeShift::new(-1, 0));

        assert_eq!(result, Err(EventError::InvalidTimeRange));
        assert_eq!(event, before);
    }

    #[test]
    fn test_resize_to_zero_length_is_rejected() {
        let mut event = sample_event();
        let result = resize_event(&mut event, TimeShift::new(0, -480));
        assert_eq!(result, Err(EventError::InvalidTimeRange));
    }

    #[test]
    fn test_zero_shift() {
        assert!(TimeShift::default().is_zero());
        assert!(!TimeShift::new(0, 1).is_zero());
    }
}
