use chrono::{DateTime, Utc};

use super::TimeWindowError;

/// A half-open query window `[start, end)` over calendar time.
///
/// The inclusive-start / exclusive-end policy is the one boundary rule
/// used everywhere in the engine: an event touching `end` exactly is
/// outside the window, one starting exactly at `start` is inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Creates a new window, validating that it is non-empty.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, TimeWindowError> {
        if start >= end {
            return Err(TimeWindowError::InvalidWindow);
        }
        Ok(Self { start, end })
    }

    /// Creates a window from the unix-second pair a calendar view sends.
    pub fn from_timestamps(start: i64, end: i64) -> Result<Self, TimeWindowError> {
        let start = DateTime::from_timestamp(start, 0)
            .ok_or(TimeWindowError::InvalidTimestamp(start))?;
        let end =
            DateTime::from_timestamp(end, 0).ok_or(TimeWindowError::InvalidTimestamp(end))?;
        Self::new(start, end)
    }

    /// Returns true if the window contains the given instant.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}
