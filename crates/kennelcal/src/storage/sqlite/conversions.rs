//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types,
//! testable in isolation without database access.

use chrono::{DateTime, Utc};
use rusqlite::Row;
use uuid::Uuid;

use kennelcal_core::scheduling::{Dog, Event, EventSeries, Recurrence};
use kennelcal_core::storage::RepositoryError;

/// Convert a SQLite row to an Event.
///
/// Expected columns: id, series_id, user_id, title, description,
/// starts_at, ends_at, all_day, rate, dogs, holiday_surcharge,
/// allow_discount, taxable
pub fn row_to_event(row: &Row) -> rusqlite::Result<Event> {
    let id: String = row.get(0)?;
    let series_id: Option<String> = row.get(1)?;
    let user_id: String = row.get(2)?;
    let title: String = row.get(3)?;
    let description: Option<String> = row.get(4)?;
    let starts_at: String = row.get(5)?;
    let ends_at: String = row.get(6)?;
    let all_day: bool = row.get(7)?;
    let rate: f64 = row.get(8)?;
    let dogs_json: String = row.get(9)?;
    let holiday_surcharge: bool = row.get(10)?;
    let allow_discount: bool = row.get(11)?;
    let taxable: bool = row.get(12)?;

    Ok(Event {
        id: parse_uuid(&id)?,
        series_id: series_id.as_deref().map(parse_uuid).transpose()?,
        user_id: parse_uuid(&user_id)?,
        title,
        description,
        starts_at: parse_datetime(&starts_at)?,
        ends_at: parse_datetime(&ends_at)?,
        all_day,
        rate,
        dogs: json_to_dogs_internal(&dogs_json)?,
        holiday_surcharge,
        allow_discount,
        taxable,
    })
}

/// Convert a SQLite row to an EventSeries.
///
/// Expected columns: id, user_id, recurrence, title, description,
/// all_day, rate, dogs, holiday_surcharge, allow_discount, taxable
pub fn row_to_series(row: &Row) -> rusqlite::Result<EventSeries> {
    let id: String = row.get(0)?;
    let user_id: String = row.get(1)?;
    let recurrence_json: String = row.get(2)?;
    let title: String = row.get(3)?;
    let description: Option<String> = row.get(4)?;
    let all_day: bool = row.get(5)?;
    let rate: f64 = row.get(6)?;
    let dogs_json: String = row.get(7)?;
    let holiday_surcharge: bool = row.get(8)?;
    let allow_discount: bool = row.get(9)?;
    let taxable: bool = row.get(10)?;

    Ok(EventSeries {
        id: parse_uuid(&id)?,
        user_id: parse_uuid(&user_id)?,
        recurrence: json_to_recurrence_internal(&recurrence_json)?,
        title,
        description,
        all_day,
        rate,
        dogs: json_to_dogs_internal(&dogs_json)?,
        holiday_surcharge,
        allow_discount,
        taxable,
    })
}

/// Serialize a dog roster to a JSON string column.
pub fn dogs_to_json(dogs: &[Dog]) -> Result<String, RepositoryError> {
    serde_json::to_string(dogs).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

/// Serialize a recurrence to a JSON string column.
pub fn recurrence_to_json(recurrence: &Recurrence) -> Result<String, RepositoryError> {
    serde_json::to_string(recurrence).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

fn json_to_dogs_internal(json: &str) -> rusqlite::Result<Vec<Dog>> {
    serde_json::from_str(json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn json_to_recurrence_internal(json: &str) -> rusqlite::Result<Recurrence> {
    serde_json::from_str(json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn parse_uuid(s: &str) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(s).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn parse_datetime(s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
}

/// Format a DateTime<Utc> for SQLite storage (RFC 3339).
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}
