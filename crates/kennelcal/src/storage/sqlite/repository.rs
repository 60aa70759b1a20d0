//! SQLite repository implementation.
//!
//! Implements the repository traits from `kennelcal_core::storage` using
//! `rusqlite` wrapped by `tokio-rusqlite`. Bulk mutations run inside a
//! single transaction so series edits commit all-or-nothing.

use async_trait::async_trait;
use tokio_rusqlite::Connection;
use uuid::Uuid;

use kennelcal_core::scheduling::{Event, EventSeries};
use kennelcal_core::storage::{
    EventRepository, RepositoryError, Result, SeriesRepository, TimeWindow,
};

use super::conversions::{dogs_to_json, format_datetime, recurrence_to_json, row_to_event, row_to_series};
use super::error::map_tokio_rusqlite_error;
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// Column values for one event row, prepared outside the connection
/// closure so JSON serialization errors surface before any I/O.
struct EventRow {
    id: String,
    series_id: Option<String>,
    user_id: String,
    title: String,
    description: Option<String>,
    starts_at: String,
    ends_at: String,
    all_day: bool,
    rate: f64,
    dogs: String,
    holiday_surcharge: bool,
    allow_discount: bool,
    taxable: bool,
}

impl EventRow {
    fn from_event(event: &Event) -> Result<Self> {
        Ok(Self {
            id: event.id.to_string(),
            series_id: event.series_id.map(|id| id.to_string()),
            user_id: event.user_id.to_string(),
            title: event.title.clone(),
            description: event.description.clone(),
            starts_at: format_datetime(&event.starts_at),
            ends_at: format_datetime(&event.ends_at),
            all_day: event.all_day,
            rate: event.rate,
            dogs: dogs_to_json(&event.dogs)?,
            holiday_surcharge: event.holiday_surcharge,
            allow_discount: event.allow_discount,
            taxable: event.taxable,
        })
    }

    fn insert(&self, conn: &rusqlite::Connection) -> rusqlite::Result<usize> {
        conn.execute(
            schema::INSERT_EVENT,
            rusqlite::params![
                self.id,
                self.series_id,
                self.user_id,
                self.title,
                self.description,
                self.starts_at,
                self.ends_at,
                self.all_day,
                self.rate,
                self.dogs,
                self.holiday_surcharge,
                self.allow_discount,
                self.taxable,
            ],
        )
    }

    fn update(&self, conn: &rusqlite::Connection) -> rusqlite::Result<usize> {
        conn.execute(
            schema::UPDATE_EVENT,
            rusqlite::params![
                self.id,
                self.series_id,
                self.title,
                self.description,
                self.starts_at,
                self.ends_at,
                self.all_day,
                self.rate,
                self.dogs,
                self.holiday_surcharge,
                self.allow_discount,
                self.taxable,
            ],
        )
    }
}

/// SQLite-based repository implementation.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file is created if it doesn't exist and the schema
    /// is applied automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing; data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

#[async_trait]
impl EventRepository for SqliteRepository {
    async fn get_event(&self, id: Uuid) -> Result<Option<Event>> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_EVENT_BY_ID).map_err(wrap_err)?;
                match stmt.query_row([&id_str], row_to_event) {
                    Ok(event) => Ok(Some(event)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Event", id.to_string()))
    }

    async fn events_in_window(&self, user_id: Uuid, window: TimeWindow) -> Result<Vec<Event>> {
        let user_id_str = user_id.to_string();
        let start_str = format_datetime(&window.start);
        let end_str = format_datetime(&window.end);

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_EVENTS_IN_WINDOW)
                    .map_err(wrap_err)?;
                let rows = stmt
                    .query_map([&user_id_str, &start_str, &end_str], row_to_event)
                    .map_err(wrap_err)?;

                let mut events = Vec::new();
                for row_result in rows {
                    events.push(row_result.map_err(wrap_err)?);
                }
                Ok(events)
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    async fn create_event(&self, event: &Event) -> Result<()> {
        let row = EventRow::from_event(event)?;
        let id = event.id;

        self.conn
            .call(move |conn| {
                row.insert(conn).map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Event", id.to_string()))
    }

    async fn update_event(&self, event: &Event) -> Result<()> {
        let row = EventRow::from_event(event)?;
        let id = event.id;

        let changed = self
            .conn
            .call(move |conn| row.update(conn).map_err(wrap_err))
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Event", id.to_string()))?;

        if changed == 0 {
            return Err(RepositoryError::event_not_found(id));
        }
        Ok(())
    }

    async fn delete_event(&self, id: Uuid) -> Result<()> {
        let id_str = id.to_string();

        let changed = self
            .conn
            .call(move |conn| conn.execute(schema::DELETE_EVENT, [&id_str]).map_err(wrap_err))
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Event", id.to_string()))?;

        if changed == 0 {
            return Err(RepositoryError::event_not_found(id));
        }
        Ok(())
    }

    async fn update_events(&self, events: &[Event]) -> Result<()> {
        let rows = events
            .iter()
            .map(EventRow::from_event)
            .collect::<Result<Vec<_>>>()?;

        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;
                for row in &rows {
                    // A missing row aborts the transaction; nothing commits.
                    if row.update(&tx).map_err(wrap_err)? == 0 {
                        return Ok(Err(row.id.clone()));
                    }
                }
                tx.commit().map_err(wrap_err)?;
                Ok(Ok(()))
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?
            .map_err(|missing_id| RepositoryError::NotFound {
                entity_type: "Event",
                id: missing_id,
            })
    }

    async fn delete_events(&self, ids: &[Uuid]) -> Result<()> {
        let id_strs: Vec<String> = ids.iter().map(|id| id.to_string()).collect();

        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;
                for id in &id_strs {
                    if tx.execute(schema::DELETE_EVENT, [id]).map_err(wrap_err)? == 0 {
                        return Ok(Err(id.clone()));
                    }
                }
                tx.commit().map_err(wrap_err)?;
                Ok(Ok(()))
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?
            .map_err(|missing_id| RepositoryError::NotFound {
                entity_type: "Event",
                id: missing_id,
            })
    }
}

#[async_trait]
impl SeriesRepository for SqliteRepository {
    async fn get_series(&self, id: Uuid) -> Result<Option<EventSeries>> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_SERIES_BY_ID)
                    .map_err(wrap_err)?;
                match stmt.query_row([&id_str], row_to_series) {
                    Ok(series) => Ok(Some(series)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "EventSeries", id.to_string()))
    }

    async fn series_events(&self, series_id: Uuid) -> Result<Vec<Event>> {
        let series_id_str = series_id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_EVENTS_BY_SERIES)
                    .map_err(wrap_err)?;
                let rows = stmt
                    .query_map([&series_id_str], row_to_event)
                    .map_err(wrap_err)?;

                let mut events = Vec::new();
                for row_result in rows {
                    events.push(row_result.map_err(wrap_err)?);
                }
                Ok(events)
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    async fn create_series(&self, series: &EventSeries, occurrences: &[Event]) -> Result<()> {
        let id = series.id;
        let id_str = id.to_string();
        let user_id = series.user_id.to_string();
        let recurrence = recurrence_to_json(&series.recurrence)?;
        let title = series.title.clone();
        let description = series.description.clone();
        let all_day = series.all_day;
        let rate = series.rate;
        let dogs = dogs_to_json(&series.dogs)?;
        let holiday_surcharge = series.holiday_surcharge;
        let allow_discount = series.allow_discount;
        let taxable = series.taxable;
        let rows = occurrences
            .iter()
            .map(EventRow::from_event)
            .collect::<Result<Vec<_>>>()?;

        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;
                tx.execute(
                    schema::INSERT_SERIES,
                    rusqlite::params![
                        id_str,
                        user_id,
                        recurrence,
                        title,
                        description,
                        all_day,
                        rate,
                        dogs,
                        holiday_surcharge,
                        allow_discount,
                        taxable,
                    ],
                )
                .map_err(wrap_err)?;
                for row in &rows {
                    row.insert(&tx).map_err(wrap_err)?;
                }
                tx.commit().map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "EventSeries", id.to_string()))
    }

    async fn delete_series(&self, id: Uuid) -> Result<()> {
        let id_str = id.to_string();

        let changed = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;
                tx.execute(schema::DELETE_EVENTS_BY_SERIES, [&id_str])
                    .map_err(wrap_err)?;
                let changed = tx.execute(schema::DELETE_SERIES, [&id_str]).map_err(wrap_err)?;
                tx.commit().map_err(wrap_err)?;
                Ok(changed)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "EventSeries", id.to_string()))?;

        if changed == 0 {
            return Err(RepositoryError::series_not_found(id));
        }
        Ok(())
    }
}
