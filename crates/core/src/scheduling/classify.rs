//! Recurrence classification at creation time.

use chrono::Duration;
use uuid::Uuid;

use super::error::EventError;
use super::requests::CreateEventRequest;
use super::types::{validate_event, Event, EventSeries, Period, Recurrence};

/// Result of classifying a creation request: either one event or a
/// series with its expanded occurrences.
#[derive(Debug, Clone, PartialEq)]
pub enum NewEvent {
    Single(Event),
    Series {
        series: EventSeries,
        occurrences: Vec<Event>,
    },
}

/// Decides whether the submitted attributes describe a single [`Event`]
/// or an [`EventSeries`], and builds the chosen shape.
///
/// If no weekday is selected the period is forced to
/// [`Period::DoesNotRepeat`] regardless of what was submitted. The
/// resolved user identity is passed in explicitly; the engine keeps no
/// ambient current-user state. `default_horizon_days` bounds the
/// expansion when the request names no `until` date.
pub fn classify(
    user_id: Uuid,
    request: CreateEventRequest,
    default_horizon_days: i64,
) -> Result<NewEvent, EventError> {
    let period = if request.weekdays.is_empty() {
        Period::DoesNotRepeat
    } else {
        request.period
    };

    if period == Period::DoesNotRepeat {
        let mut event = Event::new(user_id, request.title, request.starts_at, request.ends_at);
        event.description = request.description;
        event.all_day = request.all_day;
        event.rate = request.rate;
        event.dogs = request.dogs;
        event.holiday_surcharge = request.holiday_surcharge;
        event.allow_discount = request.allow_discount;
        event.taxable = request.taxable;
        validate_event(&event)?;
        return Ok(NewEvent::Single(event));
    }

    if request.frequency == 0 {
        return Err(EventError::ZeroFrequency);
    }

    let until = request
        .until
        .unwrap_or_else(|| (request.starts_at + Duration::days(default_horizon_days)).date_naive());

    let series = EventSeries {
        id: Uuid::new_v4(),
        user_id,
        recurrence: Recurrence {
            weekdays: request.weekdays,
            period,
            frequency: request.frequency,
            until,
        },
        title: request.title,
        description: request.description,
        all_day: request.all_day,
        rate: request.rate,
        dogs: request.dogs,
        holiday_surcharge: request.holiday_surcharge,
        allow_discount: request.allow_discount,
        taxable: request.taxable,
    };

    let occurrences = series.expand(request.starts_at, request.ends_at);
    for occurrence in &occurrences {
        validate_event(occurrence)?;
    }

    Ok(NewEvent::Series {
        series,
        occurrences,
    })
}
