use axum::{
    http::{header, Method, StatusCode},
    routing::{get, patch, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        events::{create_event, destroy_event, list_events, move_event, resize_event, update_event},
        health::health,
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE, header::HeaderName::from_static("x-user-id")]);

    let api_routes = Router::new()
        .route("/events", get(list_events).post(create_event))
        .route(
            "/events/{id}",
            put(update_event).delete(destroy_event),
        )
        .route("/events/{id}/move", patch(move_event))
        .route("/events/{id}/resize", patch(resize_event))
        .layer(cors);

    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            state.config.request_timeout(),
        ))
        .with_state(state)
}
