use async_trait::async_trait;
use uuid::Uuid;

use crate::scheduling::{Event, EventSeries};

use super::{Result, TimeWindow};

/// Repository for event occurrences.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Gets an event by its ID.
    async fn get_event(&self, id: Uuid) -> Result<Option<Event>>;

    /// Gets all of a user's events that overlap the query window, using
    /// the half-open `[start, end)` intersection policy.
    async fn events_in_window(&self, user_id: Uuid, window: TimeWindow) -> Result<Vec<Event>>;

    /// Creates a new event.
    async fn create_event(&self, event: &Event) -> Result<()>;

    /// Updates an existing event in place.
    async fn update_event(&self, event: &Event) -> Result<()>;

    /// Deletes an event by its ID.
    async fn delete_event(&self, id: Uuid) -> Result<()>;

    /// Updates a batch of events as a single atomic commit.
    ///
    /// Either every event in the batch is written or none is; a
    /// concurrent reader must never observe a partially applied batch.
    async fn update_events(&self, events: &[Event]) -> Result<()>;

    /// Deletes a batch of events as a single atomic commit.
    async fn delete_events(&self, ids: &[Uuid]) -> Result<()>;
}

/// Repository for event series and their owned occurrences.
#[async_trait]
pub trait SeriesRepository: Send + Sync {
    /// Gets a series by its ID.
    async fn get_series(&self, id: Uuid) -> Result<Option<EventSeries>>;

    /// Gets every occurrence of a series, ascending by start instant.
    async fn series_events(&self, series_id: Uuid) -> Result<Vec<Event>>;

    /// Creates a series together with its expanded occurrences, atomically.
    async fn create_series(&self, series: &EventSeries, occurrences: &[Event]) -> Result<()>;

    /// Deletes a series and cascades to all of its occurrences.
    async fn delete_series(&self, id: Uuid) -> Result<()>;
}
