//! Scoped series mutation coordinator.
//!
//! Resolves the three-way scope into the concrete set of occurrences and
//! applies the change through the repository's atomic bulk primitives,
//! so a concurrent reader never observes a half-updated series. Scope
//! resolution happens once, against a single sibling snapshot.

use crate::storage::{EventRepository, SeriesRepository};

use super::error::{EventError, MutationError};
use super::requests::EventChangeset;
use super::scope::{following_occurrences, DeleteScope, UpdateScope};
use super::types::{validate_event, Event};

/// Applies the changeset to the target occurrence, to its following
/// siblings, or to the whole series, depending on scope.
///
/// Group scopes apply only the shared (non-time) attributes and fail
/// closed with [`EventError::ScopeRequiresSeries`] when the target does
/// not belong to a series. Validation of every affected occurrence
/// happens before anything is written.
pub async fn apply_scoped_update(
    events: &dyn EventRepository,
    series: &dyn SeriesRepository,
    target: &Event,
    scope: UpdateScope,
    changeset: &EventChangeset,
) -> Result<(), MutationError> {
    match scope {
        UpdateScope::Single => {
            let mut updated = target.clone();
            changeset.apply_to(&mut updated);
            validate_event(&updated)?;
            events.update_event(&updated).await?;
        }
        UpdateScope::Following => {
            let series_id = target.series_id.ok_or(EventError::ScopeRequiresSeries)?;
            let siblings = series.series_events(series_id).await?;
            let batch = following_occurrences(target, &siblings);
            apply_to_batch(events, batch, changeset).await?;
        }
        UpdateScope::All => {
            let series_id = target.series_id.ok_or(EventError::ScopeRequiresSeries)?;
            let batch = series.series_events(series_id).await?;
            apply_to_batch(events, batch, changeset).await?;
        }
    }
    Ok(())
}

async fn apply_to_batch(
    events: &dyn EventRepository,
    mut batch: Vec<Event>,
    changeset: &EventChangeset,
) -> Result<(), MutationError> {
    let shared = changeset.shared_only();
    for event in &mut batch {
        shared.apply_to(event);
        validate_event(event)?;
    }
    if !batch.is_empty() {
        events.update_events(&batch).await?;
    }
    Ok(())
}

/// Deletes the target occurrence, its following siblings, or the whole
/// series (cascading to every occurrence), depending on scope.
pub async fn apply_scoped_delete(
    events: &dyn EventRepository,
    series: &dyn SeriesRepository,
    target: &Event,
    scope: DeleteScope,
) -> Result<(), MutationError> {
    match scope {
        DeleteScope::Single => {
            events.delete_event(target.id).await?;
        }
        DeleteScope::Following => {
            let series_id = target.series_id.ok_or(EventError::ScopeRequiresSeries)?;
            let siblings = series.series_events(series_id).await?;
            let ids: Vec<_> = following_occurrences(target, &siblings)
                .iter()
                .map(|event| event.id)
                .collect();
            if !ids.is_empty() {
                events.delete_events(&ids).await?;
            }
        }
        DeleteScope::All => {
            let series_id = target.series_id.ok_or(EventError::ScopeRequiresSeries)?;
            series.delete_series(series_id).await?;
        }
    }
    Ok(())
}
