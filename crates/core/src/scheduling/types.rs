use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::EventError;

/// A dog boarded during an event. Dogs have no identity of their own;
/// they are owned by their event and persisted as an ordered list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dog {
    pub name: String,
    pub owner: String,
    pub address: String,
    pub phone: String,
    pub fixed: bool,
    pub notes: Option<String>,
}

/// The set of weekdays a recurring series falls on.
///
/// Stored Sunday-first to match the booking form's checkbox order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WeekdaySet([bool; 7]);

impl WeekdaySet {
    /// Builds a set from the seven submitted checkbox flags, Sunday first.
    pub fn from_flags(flags: [bool; 7]) -> Self {
        Self(flags)
    }

    /// Returns true if no weekday is selected.
    pub fn is_empty(&self) -> bool {
        !self.0.iter().any(|&f| f)
    }

    /// Returns true if the set contains the given weekday.
    pub fn contains(&self, weekday: Weekday) -> bool {
        self.0[weekday.num_days_from_sunday() as usize]
    }

    /// Adds a weekday to the set.
    pub fn insert(&mut self, weekday: Weekday) {
        self.0[weekday.num_days_from_sunday() as usize] = true;
    }

    /// Builds a set containing a single weekday.
    pub fn only(weekday: Weekday) -> Self {
        let mut set = Self::default();
        set.insert(weekday);
        set
    }
}

/// How often a series repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Period {
    DoesNotRepeat,
    Daily,
    Weekly,
    Monthly,
}

impl Period {
    /// The sentinel label the booking form submits for non-repeating events.
    pub const DOES_NOT_REPEAT_LABEL: &'static str = "Does not repeat";

    /// Parses the period label submitted by the booking form.
    pub fn parse_label(label: &str) -> Option<Self> {
        match label.trim() {
            Self::DOES_NOT_REPEAT_LABEL => Some(Period::DoesNotRepeat),
            "Daily" => Some(Period::Daily),
            "Weekly" => Some(Period::Weekly),
            "Monthly" => Some(Period::Monthly),
            _ => None,
        }
    }

    /// The form label for this period.
    pub fn as_label(&self) -> &'static str {
        match self {
            Period::DoesNotRepeat => Self::DOES_NOT_REPEAT_LABEL,
            Period::Daily => "Daily",
            Period::Weekly => "Weekly",
            Period::Monthly => "Monthly",
        }
    }

    /// Returns true if events with this period form a series.
    pub fn repeats(&self) -> bool {
        !matches!(self, Period::DoesNotRepeat)
    }
}

/// Recurrence definition for an event series: a weekday mask plus a
/// period/frequency stride and an expansion horizon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recurrence {
    pub weekdays: WeekdaySet,
    pub period: Period,
    /// Repeat every N periods (minimum 1).
    pub frequency: u32,
    /// Last date (inclusive) a new occurrence may fall on.
    pub until: NaiveDate,
}

impl Recurrence {
    /// Expands the recurrence into concrete occurrence dates, ascending.
    ///
    /// A date is included when its weekday is in the mask and the period
    /// bucket it falls in (days, weeks, or months elapsed since `start`)
    /// is a whole multiple of `frequency`.
    pub fn occurrence_dates(&self, start: NaiveDate) -> Vec<NaiveDate> {
        if !self.period.repeats() || self.weekdays.is_empty() {
            return Vec::new();
        }
        let frequency = i64::from(self.frequency.max(1));
        let mut dates = Vec::new();
        let mut date = start;
        while date <= self.until {
            let bucket = match self.period {
                Period::DoesNotRepeat => unreachable!("checked above"),
                Period::Daily => (date - start).num_days(),
                Period::Weekly => (date - start).num_days() / 7,
                Period::Monthly => months_between(start, date),
            };
            if bucket % frequency == 0 && self.weekdays.contains(date.weekday()) {
                dates.push(date);
            }
            match date.succ_opt() {
                Some(next) => date = next,
                None => break,
            }
        }
        dates
    }
}

/// Whole calendar months elapsed from `start` to `date`.
fn months_between(start: NaiveDate, date: NaiveDate) -> i64 {
    let years = i64::from(date.year() - start.year());
    years * 12 + i64::from(date.month() as i32 - start.month() as i32)
}

/// A single bookable occurrence on the calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    /// Set when this event is an occurrence of a recurring series.
    pub series_id: Option<Uuid>,
    /// The user whose calendar owns this event.
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub all_day: bool,
    pub rate: f64,
    pub dogs: Vec<Dog>,
    pub holiday_surcharge: bool,
    pub allow_discount: bool,
    pub taxable: bool,
}

impl Event {
    /// Creates a new single (non-recurring) event.
    pub fn new(
        user_id: Uuid,
        title: impl Into<String>,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            series_id: None,
            user_id,
            title: title.into(),
            description: None,
            starts_at,
            ends_at,
            all_day: false,
            rate: 0.0,
            dogs: Vec::new(),
            holiday_surcharge: false,
            allow_discount: false,
            taxable: false,
        }
    }

    /// Returns true if this event belongs to a series.
    pub fn is_recurring(&self) -> bool {
        self.series_id.is_some()
    }

    /// Sets the description for this event.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the boarding rate for this event.
    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }

    /// Attaches a dog roster to this event.
    pub fn with_dogs(mut self, dogs: Vec<Dog>) -> Self {
        self.dogs = dogs;
        self
    }

    /// Sets a specific ID for this event (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

/// A recurrence template owning zero or more [`Event`] occurrences.
///
/// The non-time attributes here are shared by every occurrence; a
/// "following"-scoped edit may diverge a suffix of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSeries {
    pub id: Uuid,
    pub user_id: Uuid,
    pub recurrence: Recurrence,
    pub title: String,
    pub description: Option<String>,
    pub all_day: bool,
    pub rate: f64,
    pub dogs: Vec<Dog>,
    pub holiday_surcharge: bool,
    pub allow_discount: bool,
    pub taxable: bool,
}

impl EventSeries {
    /// Stamps out one occurrence of this series at the given times.
    pub fn occurrence(&self, starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Event {
        Event {
            id: Uuid::new_v4(),
            series_id: Some(self.id),
            user_id: self.user_id,
            title: self.title.clone(),
            description: self.description.clone(),
            starts_at,
            ends_at,
            all_day: self.all_day,
            rate: self.rate,
            dogs: self.dogs.clone(),
            holiday_surcharge: self.holiday_surcharge,
            allow_discount: self.allow_discount,
            taxable: self.taxable,
        }
    }

    /// Expands the series into its occurrences.
    ///
    /// Each occurrence keeps the time-of-day and duration of the
    /// submitted first interval, placed on each recurrence date.
    pub fn expand(&self, starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Vec<Event> {
        let duration = ends_at - starts_at;
        let start_time = starts_at.time();
        self.recurrence
            .occurrence_dates(starts_at.date_naive())
            .into_iter()
            .map(|date| {
                let occurrence_start = date.and_time(start_time).and_utc();
                self.occurrence(occurrence_start, occurrence_start + duration)
            })
            .collect()
    }
}

/// Validates an event before it is persisted.
pub fn validate_event(event: &Event) -> Result<(), EventError> {
    if event.title.trim().is_empty() {
        return Err(EventError::EmptyTitle);
    }
    if event.ends_at <= event.starts_at {
        return Err(EventError::InvalidTimeRange);
    }
    if event.rate < 0.0 {
        return Err(EventError::NegativeRate);
    }
    Ok(())
}
