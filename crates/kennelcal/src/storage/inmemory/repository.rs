//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use kennelcal_core::scheduling::{events_overlapping, Event, EventSeries};
use kennelcal_core::storage::{
    EventRepository, RepositoryError, Result, SeriesRepository, TimeWindow,
};

/// In-memory storage backend.
///
/// Both maps live behind one `RwLock` pair; the bulk primitives take a
/// single write guard for the whole batch, which is what makes them
/// atomic with respect to concurrent readers.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    events: Arc<RwLock<HashMap<Uuid, Event>>>,
    series: Arc<RwLock<HashMap<Uuid, EventSeries>>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventRepository for InMemoryRepository {
    async fn get_event(&self, id: Uuid) -> Result<Option<Event>> {
        let events = self.events.read().await;
        Ok(events.get(&id).cloned())
    }

    async fn events_in_window(&self, user_id: Uuid, window: TimeWindow) -> Result<Vec<Event>> {
        let events = self.events.read().await;
        let owned: Vec<Event> = events
            .values()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        let mut hits: Vec<Event> = events_overlapping(&owned, &window)
            .into_iter()
            .cloned()
            .collect();
        hits.sort_by_key(|e| e.starts_at);
        Ok(hits)
    }

    async fn create_event(&self, event: &Event) -> Result<()> {
        let mut events = self.events.write().await;
        if events.contains_key(&event.id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Event",
                id: event.id.to_string(),
            });
        }
        events.insert(event.id, event.clone());
        Ok(())
    }

    async fn update_event(&self, event: &Event) -> Result<()> {
        let mut events = self.events.write().await;
        if !events.contains_key(&event.id) {
            return Err(RepositoryError::event_not_found(event.id));
        }
        events.insert(event.id, event.clone());
        Ok(())
    }

    async fn delete_event(&self, id: Uuid) -> Result<()> {
        let mut events = self.events.write().await;
        if events.remove(&id).is_none() {
            return Err(RepositoryError::event_not_found(id));
        }
        Ok(())
    }

    async fn update_events(&self, batch: &[Event]) -> Result<()> {
        let mut events = self.events.write().await;
        // Check the whole batch before touching anything.
        for event in batch {
            if !events.contains_key(&event.id) {
                return Err(RepositoryError::event_not_found(event.id));
            }
        }
        for event in batch {
            events.insert(event.id, event.clone());
        }
        Ok(())
    }

    async fn delete_events(&self, ids: &[Uuid]) -> Result<()> {
        let mut events = self.events.write().await;
        for id in ids {
            if !events.contains_key(id) {
                return Err(RepositoryError::event_not_found(id));
            }
        }
        for id in ids {
            events.remove(id);
        }
        Ok(())
    }
}

#[async_trait]
impl SeriesRepository for InMemoryRepository {
    async fn get_series(&self, id: Uuid) -> Result<Option<EventSeries>> {
        let series = self.series.read().await;
        Ok(series.get(&id).cloned())
    }

    async fn series_events(&self, series_id: Uuid) -> Result<Vec<Event>> {
        let events = self.events.read().await;
        let mut occurrences: Vec<Event> = events
            .values()
            .filter(|e| e.series_id == Some(series_id))
            .cloned()
            .collect();
        occurrences.sort_by_key(|e| e.starts_at);
        Ok(occurrences)
    }

    async fn create_series(&self, series: &EventSeries, occurrences: &[Event]) -> Result<()> {
        let mut all_series = self.series.write().await;
        let mut events = self.events.write().await;
        if all_series.contains_key(&series.id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "EventSeries",
                id: series.id.to_string(),
            });
        }
        all_series.insert(series.id, series.clone());
        for occurrence in occurrences {
            events.insert(occurrence.id, occurrence.clone());
        }
        Ok(())
    }

    async fn delete_series(&self, id: Uuid) -> Result<()> {
        let mut all_series = self.series.write().await;
        let mut events = self.events.write().await;
        if all_series.remove(&id).is_none() {
            return Err(RepositoryError::series_not_found(id));
        }
        events.retain(|_, event| event.series_id != Some(id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc, Weekday};
    use kennelcal_core::scheduling::{
        apply_scoped_delete, apply_scoped_update, DeleteScope, EventChangeset, MutationError,
        Period, Recurrence, UpdateScope, WeekdaySet,
    };

    fn instant(d: u32, h: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, d, h, 0, 0).unwrap()
    }

    /// A weekly Monday series over June 2025 with five occurrences.
    async fn seed_series(repo: &InMemoryRepository, user_id: Uuid) -> (EventSeries, Vec<Event>) {
        let series = EventSeries {
            id: Uuid::new_v4(),
            user_id,
            recurrence: Recurrence {
                weekdays: WeekdaySet::only(Weekday::Mon),
                period: Period::Weekly,
                frequency: 1,
                until: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
            },
            title: "Weekly boarding".to_string(),
            description: None,
            all_day: false,
            rate: 45.0,
            dogs: Vec::new(),
            holiday_surcharge: false,
            allow_discount: false,
            taxable: true,
        };
        let occurrences = series.expand(instant(2, 9), instant(2, 17));
        assert_eq!(occurrences.len(), 5);
        repo.create_series(&series, &occurrences).await.unwrap();
        (series, occurrences)
    }

    #[tokio::test]
    async fn test_event_crud_round_trip() {
        let repo = InMemoryRepository::new();
        let user = Uuid::new_v4();
        let event = Event::new(user, "Boarding", instant(10, 9), instant(10, 17));

        repo.create_event(&event).await.unwrap();
        assert_eq!(repo.get_event(event.id).await.unwrap(), Some(event.clone()));

        repo.delete_event(event.id).await.unwrap();
        assert_eq!(repo.get_event(event.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_window_query_filters_by_owner_and_overlap() {
        let repo = InMemoryRepository::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        repo.create_event(&Event::new(alice, "inside", instant(10, 9), instant(10, 17)))
            .await
            .unwrap();
        repo.create_event(&Event::new(alice, "outside", instant(25, 9), instant(25, 17)))
            .await
            .unwrap();
        repo.create_event(&Event::new(bob, "other user", instant(10, 9), instant(10, 17)))
            .await
            .unwrap();

        let window = TimeWindow::new(instant(1, 0), instant(20, 0)).unwrap();
        let hits = repo.events_in_window(alice, window).await.unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "inside");
    }

    #[tokio::test]
    async fn test_window_query_excludes_boundary_touching_event() {
        let repo = InMemoryRepository::new();
        let user = Uuid::new_v4();

        // Ends exactly where the window starts.
        repo.create_event(&Event::new(user, "before", instant(1, 0), instant(5, 0)))
            .await
            .unwrap();
        repo.create_event(&Event::new(user, "inside", instant(6, 9), instant(6, 17)))
            .await
            .unwrap();

        let window = TimeWindow::new(instant(5, 0), instant(10, 0)).unwrap();
        let hits = repo.events_in_window(user, window).await.unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "inside");
    }

    #[tokio::test]
    async fn test_series_events_sorted_by_start() {
        let repo = InMemoryRepository::new();
        let (series, occurrences) = seed_series(&repo, Uuid::new_v4()).await;

        let stored = repo.series_events(series.id).await.unwrap();
        let starts: Vec<_> = stored.iter().map(|e| e.starts_at).collect();
        let mut expected: Vec<_> = occurrences.iter().map(|e| e.starts_at).collect();
        expected.sort();
        assert_eq!(starts, expected);
    }

    #[tokio::test]
    async fn test_bulk_update_is_all_or_nothing() {
        let repo = InMemoryRepository::new();
        let user = Uuid::new_v4();
        let event = Event::new(user, "kept", instant(10, 9), instant(10, 17));
        repo.create_event(&event).await.unwrap();

        let mut renamed = event.clone();
        renamed.title = "changed".to_string();
        let phantom = Event::new(user, "phantom", instant(11, 9), instant(11, 17));

        let result = repo.update_events(&[renamed, phantom]).await;
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));

        // The existing event must be untouched.
        let stored = repo.get_event(event.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "kept");
    }

    #[tokio::test]
    async fn test_bulk_delete_is_all_or_nothing() {
        let repo = InMemoryRepository::new();
        let user = Uuid::new_v4();
        let event = Event::new(user, "kept", instant(10, 9), instant(10, 17));
        repo.create_event(&event).await.unwrap();

        let result = repo.delete_events(&[event.id, Uuid::new_v4()]).await;
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
        assert!(repo.get_event(event.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_scoped_update_single_leaves_siblings_alone() {
        let repo = InMemoryRepository::new();
        let (series, occurrences) = seed_series(&repo, Uuid::new_v4()).await;
        let target = &occurrences[1];

        let changeset = EventChangeset {
            title: Some("Special day".to_string()),
            ..Default::default()
        };
        apply_scoped_update(&repo, &repo, target, UpdateScope::Single, &changeset)
            .await
            .unwrap();

        let stored = repo.series_events(series.id).await.unwrap();
        let renamed: Vec<_> = stored.iter().filter(|e| e.title == "Special day").collect();
        assert_eq!(renamed.len(), 1);
        assert_eq!(renamed[0].id, target.id);
    }

    #[tokio::test]
    async fn test_scoped_update_following_changes_later_occurrences_only() {
        let repo = InMemoryRepository::new();
        let (series, _) = seed_series(&repo, Uuid::new_v4()).await;
        let stored = repo.series_events(series.id).await.unwrap();
        let target = &stored[1]; // 2nd of 5

        let changeset = EventChangeset {
            rate: Some(60.0),
            ..Default::default()
        };
        apply_scoped_update(&repo, &repo, target, UpdateScope::Following, &changeset)
            .await
            .unwrap();

        let after = repo.series_events(series.id).await.unwrap();
        let rates: Vec<f64> = after.iter().map(|e| e.rate).collect();
        assert_eq!(rates, vec![45.0, 45.0, 60.0, 60.0, 60.0]);
    }

    #[tokio::test]
    async fn test_scoped_update_all_changes_every_occurrence() {
        let repo = InMemoryRepository::new();
        let (series, _) = seed_series(&repo, Uuid::new_v4()).await;
        let stored = repo.series_events(series.id).await.unwrap();

        let changeset = EventChangeset {
            taxable: Some(false),
            ..Default::default()
        };
        apply_scoped_update(&repo, &repo, &stored[2], UpdateScope::All, &changeset)
            .await
            .unwrap();

        let after = repo.series_events(series.id).await.unwrap();
        assert!(after.iter().all(|e| !e.taxable));
    }

    #[tokio::test]
    async fn test_group_update_does_not_touch_occurrence_times() {
        let repo = InMemoryRepository::new();
        let (series, _) = seed_series(&repo, Uuid::new_v4()).await;
        let before = repo.series_events(series.id).await.unwrap();

        let changeset = EventChangeset {
            starts_at: Some(instant(1, 0)),
            ends_at: Some(instant(1, 1)),
            title: Some("Rescheduled".to_string()),
            ..Default::default()
        };
        apply_scoped_update(&repo, &repo, &before[0], UpdateScope::All, &changeset)
            .await
            .unwrap();

        let after = repo.series_events(series.id).await.unwrap();
        for (was, is) in before.iter().zip(&after) {
            assert_eq!(was.starts_at, is.starts_at);
            assert_eq!(was.ends_at, is.ends_at);
            assert_eq!(is.title, "Rescheduled");
        }
    }

    #[tokio::test]
    async fn test_group_scope_on_single_event_fails_closed() {
        let repo = InMemoryRepository::new();
        let user = Uuid::new_v4();
        let event = Event::new(user, "Solo", instant(10, 9), instant(10, 17));
        repo.create_event(&event).await.unwrap();

        let changeset = EventChangeset {
            title: Some("Renamed".to_string()),
            ..Default::default()
        };
        let result =
            apply_scoped_update(&repo, &repo, &event, UpdateScope::Following, &changeset).await;
        assert!(matches!(result, Err(MutationError::Event(_))));

        let result = apply_scoped_delete(&repo, &repo, &event, DeleteScope::All).await;
        assert!(matches!(result, Err(MutationError::Event(_))));

        // The event is untouched either way.
        let stored = repo.get_event(event.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Solo");
    }

    #[tokio::test]
    async fn test_scoped_delete_future_removes_later_occurrences() {
        let repo = InMemoryRepository::new();
        let (series, _) = seed_series(&repo, Uuid::new_v4()).await;
        let stored = repo.series_events(series.id).await.unwrap();
        let target = &stored[1];

        apply_scoped_delete(&repo, &repo, target, DeleteScope::Following)
            .await
            .unwrap();

        let after = repo.series_events(series.id).await.unwrap();
        assert_eq!(after.len(), 2);
        assert!(after.iter().any(|e| e.id == target.id));
        assert!(after.iter().all(|e| e.starts_at <= target.starts_at));
        // The series template itself survives.
        assert!(repo.get_series(series.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_scoped_delete_all_removes_series_and_occurrences() {
        let repo = InMemoryRepository::new();
        let user = Uuid::new_v4();
        let (series, _) = seed_series(&repo, user).await;
        let stored = repo.series_events(series.id).await.unwrap();

        apply_scoped_delete(&repo, &repo, &stored[0], DeleteScope::All)
            .await
            .unwrap();

        assert!(repo.get_series(series.id).await.unwrap().is_none());
        assert!(repo.series_events(series.id).await.unwrap().is_empty());

        let window = TimeWindow::new(instant(1, 0), instant(30, 23)).unwrap();
        assert!(repo.events_in_window(user, window).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_scoped_delete_single_leaves_siblings() {
        let repo = InMemoryRepository::new();
        let (series, _) = seed_series(&repo, Uuid::new_v4()).await;
        let stored = repo.series_events(series.id).await.unwrap();

        apply_scoped_delete(&repo, &repo, &stored[2], DeleteScope::Single)
            .await
            .unwrap();

        let after = repo.series_events(series.id).await.unwrap();
        assert_eq!(after.len(), 4);
        assert!(after.iter().all(|e| e.id != stored[2].id));
    }
}
