use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::types::{Dog, Event, Period, WeekdaySet};

/// Typed, closed attribute set for creating an event or series. The web
/// layer marshals the raw submission into this once; nothing downstream
/// works with loose attribute bags.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateEventRequest {
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
    pub weekdays: WeekdaySet,
    pub period: Period,
    pub frequency: u32,
    /// Expansion horizon; when absent the classifier applies the
    /// configured default.
    pub until: Option<NaiveDate>,
}

/// Typed changeset for an event update. Only `Some` fields are applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventChangeset {
    pub title: Option<String>,
    pub description: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub all_day: Option<bool>,
    pub rate: Option<f64>,
    pub dogs: Option<Vec<Dog>>,
    pub holiday_surcharge: Option<bool>,
    pub allow_discount: Option<bool>,
    pub taxable: Option<bool>,
}

impl EventChangeset {
    /// Applies every populated field to the event.
    pub fn apply_to(&self, event: &mut Event) {
        if let Some(title) = &self.title {
            event.title = title.clone();
        }
        if let Some(description) = &self.description {
            event.description = Some(description.clone());
        }
        if let Some(starts_at) = self.starts_at {
            event.starts_at = starts_at;
        }
        if let Some(ends_at) = self.ends_at {
            event.ends_at = ends_at;
        }
        if let Some(all_day) = self.all_day {
            event.all_day = all_day;
        }
        if let Some(rate) = self.rate {
            event.rate = rate;
        }
        if let Some(dogs) = &self.dogs {
            event.dogs = dogs.clone();
        }
        if let Some(holiday_surcharge) = self.holiday_surcharge {
            event.holiday_surcharge = holiday_surcharge;
        }
        if let Some(allow_discount) = self.allow_discount {
            event.allow_discount = allow_discount;
        }
        if let Some(taxable) = self.taxable {
            event.taxable = taxable;
        }
    }

    /// A copy carrying only the attributes shared across a series.
    /// Start and end instants are per-occurrence and never change under
    /// a group scope.
    pub fn shared_only(&self) -> EventChangeset {
        EventChangeset {
            starts_at: None,
            ends_at: None,
            ..self.clone()
        }
    }
}

/// Projection of an event for the calendar feed. Field names are part
/// of the wire contract consumed by the calendar view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventView {
    pub id: Uuid,
    pub title: String,
    /// Empty string when the event has no description.
    pub description: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(rename = "allDay")]
    pub all_day: bool,
    /// True exactly when the event belongs to a series.
    pub recurring: bool,
    pub rate: f64,
    pub dogs: Vec<Dog>,
    pub holiday_surcharge: bool,
    pub allow_discount: bool,
    pub taxable: bool,
}

impl From<&Event> for EventView {
    fn from(event: &Event) -> Self {
        EventView {
            id: event.id,
            title: event.title.clone(),
            description: event.description.clone().unwrap_or_default(),
            start: event.starts_at,
            end: event.ends_at,
            all_day: event.all_day,
            recurring: event.is_recurring(),
            rate: event.rate,
            dogs: event.dogs.clone(),
            holiday_surcharge: event.holiday_surcharge,
            allow_discount: event.allow_discount,
            taxable: event.taxable,
        }
    }
}
