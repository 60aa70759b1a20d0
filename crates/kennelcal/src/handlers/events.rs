//! Event API handlers.
//!
//! Handlers marshal the request, resolve the target event, and hand off
//! to the core engine; ownership is checked on every id lookup so one
//! user's calendar never leaks into another's.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use uuid::Uuid;

use kennelcal_core::scheduling::{
    self, apply_scoped_delete, apply_scoped_update, classify, DeleteScope, Event, EventView,
    NewEvent,
};
use kennelcal_core::storage::{RepositoryError, TimeWindow};

use crate::{
    extract::CurrentUser,
    handlers::AppError,
    models::{DeleteQuery, EventPayload, EventsQuery, MoveParams, ResizeParams, UpdateEventPayload},
    state::AppState,
};

/// Resolves an event id to an event on the requesting user's calendar.
///
/// Another user's event answers NotFound rather than Forbidden, so ids
/// cannot be probed across calendars.
async fn load_owned_event(state: &AppState, id: Uuid, user_id: Uuid) -> Result<Event, AppError> {
    match state.events.get_event(id).await? {
        Some(event) if event.user_id == user_id => Ok(event),
        _ => Err(RepositoryError::event_not_found(id).into()),
    }
}

/// Calendar feed (GET /api/events).
///
/// Returns the user's events intersecting the half-open window the view
/// sent as unix seconds.
pub async fn list_events(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Result<Json<Vec<EventView>>, AppError> {
    let window = TimeWindow::from_timestamps(query.start, query.end)?;
    let events = state.events.events_in_window(user_id, window).await?;
    Ok(Json(events.iter().map(EventView::from).collect()))
}

/// Create an event or series (POST /api/events).
///
/// The recurrence classifier decides the shape: no selected weekday (or
/// a non-repeating period) makes a single event, anything else a series
/// expanded into its occurrences atomically.
pub async fn create_event(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    Json(payload): Json<EventPayload>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let request = payload.into_request()?;
    match classify(user_id, request, state.config.series_horizon_days)? {
        NewEvent::Single(event) => {
            state.events.create_event(&event).await?;
            tracing::info!(event_id = %event.id, "Created event");
            Ok((
                StatusCode::CREATED,
                Json(json!({ "id": event.id, "recurring": false })),
            ))
        }
        NewEvent::Series {
            series,
            occurrences,
        } => {
            state.series.create_series(&series, &occurrences).await?;
            tracing::info!(
                series_id = %series.id,
                occurrences = occurrences.len(),
                "Created event series"
            );
            Ok((
                StatusCode::CREATED,
                Json(json!({
                    "id": series.id,
                    "recurring": true,
                    "occurrences": occurrences.len(),
                })),
            ))
        }
    }
}

/// Drag-move (PATCH /api/events/{id}/move).
pub async fn move_event(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(params): Json<MoveParams>,
) -> Result<StatusCode, AppError> {
    let mut event = load_owned_event(&state, id, user_id).await?;
    scheduling::move_event(&mut event, params.shift(), params.all_day)?;
    state.events.update_event(&event).await?;
    tracing::debug!(event_id = %id, days = params.day_delta, minutes = params.minute_delta, "Moved event");
    Ok(StatusCode::OK)
}

/// Drag-resize (PATCH /api/events/{id}/resize).
pub async fn resize_event(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(params): Json<ResizeParams>,
) -> Result<StatusCode, AppError> {
    let mut event = load_owned_event(&state, id, user_id).await?;
    scheduling::resize_event(&mut event, params.shift())?;
    state.events.update_event(&event).await?;
    tracing::debug!(event_id = %id, days = params.day_delta, minutes = params.minute_delta, "Resized event");
    Ok(StatusCode::OK)
}

/// Scoped update (PUT /api/events/{id}).
pub async fn update_event(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEventPayload>,
) -> Result<StatusCode, AppError> {
    let event = load_owned_event(&state, id, user_id).await?;
    let scope = payload.scope();
    let changeset = payload.into_changeset();
    apply_scoped_update(
        state.events.as_ref(),
        state.series.as_ref(),
        &event,
        scope,
        &changeset,
    )
    .await?;
    tracing::info!(event_id = %id, ?scope, "Updated event");
    Ok(StatusCode::OK)
}

/// Scoped delete (DELETE /api/events/{id}).
pub async fn destroy_event(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<DeleteQuery>,
) -> Result<StatusCode, AppError> {
    let event = load_owned_event(&state, id, user_id).await?;
    let scope = DeleteScope::from_param(query.delete_all.as_deref());
    apply_scoped_delete(state.events.as_ref(), state.series.as_ref(), &event, scope).await?;
    tracing::info!(event_id = %id, ?scope, "Deleted event");
    Ok(StatusCode::OK)
}
