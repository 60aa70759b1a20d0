//! Request payloads for the events API.
//!
//! These wrap the core request types with the field names and loose
//! value spellings the booking UI submits (weekday checkboxes, period
//! labels, the positional dog roster), marshalled once at the boundary.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use kennelcal_core::scheduling::{
    normalize_roster, CreateEventRequest, DogRoster, EventChangeset, EventError, Period, TimeShift,
    UpdateScope, WeekdaySet,
};
use kennelcal_core::serde::{
    deserialize_flag, deserialize_optional_flag, deserialize_optional_string,
};

fn default_period() -> String {
    Period::DOES_NOT_REPEAT_LABEL.to_string()
}

fn default_frequency() -> u32 {
    1
}

/// Payload for creating an event or a recurring series.
#[derive(Debug, Deserialize)]
pub struct EventPayload {
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub description: Option<String>,
    pub starttime: DateTime<Utc>,
    pub endtime: DateTime<Utc>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub all_day: bool,
    #[serde(default)]
    pub rate: f64,
    #[serde(default)]
    pub dogs: DogRoster,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub holiday_surcharge: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub allow_discount: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub taxable: bool,
    // Weekday checkboxes, one per day as the form submits them.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub sunday: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub monday: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub tuesday: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub wednesday: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub thursday: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub friday: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub saturday: bool,
    #[serde(default = "default_period")]
    pub period: String,
    #[serde(default = "default_frequency")]
    pub frequency: u32,
    #[serde(default)]
    pub repeat_until: Option<NaiveDate>,
}

impl EventPayload {
    /// Marshals the payload into the core creation request.
    pub fn into_request(self) -> Result<CreateEventRequest, EventError> {
        let period = Period::parse_label(&self.period)
            .ok_or_else(|| EventError::UnknownPeriod(self.period.clone()))?;
        Ok(CreateEventRequest {
            title: self.title,
            description: self.description,
            starts_at: self.starttime,
            ends_at: self.endtime,
            all_day: self.all_day,
            rate: self.rate,
            dogs: normalize_roster(self.dogs),
            holiday_surcharge: self.holiday_surcharge,
            allow_discount: self.allow_discount,
            taxable: self.taxable,
            weekdays: WeekdaySet::from_flags([
                self.sunday,
                self.monday,
                self.tuesday,
                self.wednesday,
                self.thursday,
                self.friday,
                self.saturday,
            ]),
            period,
            frequency: self.frequency,
            until: self.repeat_until,
        })
    }
}

/// Payload for updating an event, carrying the commit button that
/// selects the mutation scope.
#[derive(Debug, Deserialize)]
pub struct UpdateEventPayload {
    #[serde(default)]
    pub commit_button: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub description: Option<String>,
    #[serde(default)]
    pub starttime: Option<DateTime<Utc>>,
    #[serde(default)]
    pub endtime: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_optional_flag")]
    pub all_day: Option<bool>,
    #[serde(default)]
    pub rate: Option<f64>,
    #[serde(default)]
    pub dogs: Option<DogRoster>,
    #[serde(default, deserialize_with = "deserialize_optional_flag")]
    pub holiday_surcharge: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_optional_flag")]
    pub allow_discount: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_optional_flag")]
    pub taxable: Option<bool>,
}

impl UpdateEventPayload {
    /// The scope the edit form was confirmed with.
    pub fn scope(&self) -> UpdateScope {
        UpdateScope::from_commit_label(self.commit_button.as_deref())
    }

    /// Marshals the payload into the core changeset.
    pub fn into_changeset(self) -> EventChangeset {
        EventChangeset {
            title: self.title,
            description: self.description,
            starts_at: self.starttime,
            ends_at: self.endtime,
            all_day: self.all_day,
            rate: self.rate,
            dogs: self.dogs.map(normalize_roster),
            holiday_surcharge: self.holiday_surcharge,
            allow_discount: self.allow_discount,
            taxable: self.taxable,
        }
    }
}

/// Query parameters for the calendar feed: the view's window as unix
/// seconds.
#[derive(Debug, Deserialize)]
pub struct EventsQuery {
    pub start: i64,
    pub end: i64,
}

/// Payload for drag-move: shift both ends and set the all-day flag.
#[derive(Debug, Deserialize)]
pub struct MoveParams {
    #[serde(default)]
    pub day_delta: i64,
    #[serde(default)]
    pub minute_delta: i64,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub all_day: bool,
}

impl MoveParams {
    pub fn shift(&self) -> TimeShift {
        TimeShift::new(self.day_delta, self.minute_delta)
    }
}

/// Payload for drag-resize: shift only the end.
#[derive(Debug, Deserialize)]
pub struct ResizeParams {
    #[serde(default)]
    pub day_delta: i64,
    #[serde(default)]
    pub minute_delta: i64,
}

impl ResizeParams {
    pub fn shift(&self) -> TimeShift {
        TimeShift::new(self.day_delta, self.minute_delta)
    }
}

/// Query parameters for event deletion.
#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    /// "true" removes the whole series, "future" the following
    /// occurrences, anything else only the target.
    #[serde(default)]
    pub delete_all: Option<String>,
}
