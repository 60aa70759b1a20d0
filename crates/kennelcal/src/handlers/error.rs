use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use kennelcal_core::scheduling::{EventError, MutationError};
use kennelcal_core::storage::{
    repository_error_to_status_code, RepositoryError, TimeWindowError,
};

/// Application error that wraps `anyhow::Error`, so handlers can use `?`
/// on anything convertible. Domain errors are downcast back out to pick
/// the response status: repository errors use the shared HTTP mapping,
/// validation failures answer 422 with the violation message, malformed
/// query windows answer 400.
pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status.is_server_error() {
            tracing::error!(error = %self.0, "Application error");
        } else {
            tracing::warn!(status = %status, error = %self.0, "Request failed");
        }
        (status, self.0.to_string()).into_response()
    }
}

fn status_for(error: &anyhow::Error) -> StatusCode {
    if let Some(repo_error) = error.downcast_ref::<RepositoryError>() {
        return repo_status(repo_error);
    }
    if let Some(mutation_error) = error.downcast_ref::<MutationError>() {
        return match mutation_error {
            MutationError::Event(_) => StatusCode::UNPROCESSABLE_ENTITY,
            MutationError::Repository(repo_error) => repo_status(repo_error),
        };
    }
    if error.downcast_ref::<EventError>().is_some() {
        return StatusCode::UNPROCESSABLE_ENTITY;
    }
    if error.downcast_ref::<TimeWindowError>().is_some() {
        return StatusCode::BAD_REQUEST;
    }
    StatusCode::INTERNAL_SERVER_ERROR
}

fn repo_status(error: &RepositoryError) -> StatusCode {
    StatusCode::from_u16(repository_error_to_status_code(error))
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let error: anyhow::Error = RepositoryError::event_not_found("ev-1").into();
        assert_eq!(status_for(&error), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_validation_maps_to_422() {
        let error: anyhow::Error = EventError::InvalidTimeRange.into();
        assert_eq!(status_for(&error), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_mutation_validation_maps_to_422() {
        let error: anyhow::Error = MutationError::from(EventError::ScopeRequiresSeries).into();
        assert_eq!(status_for(&error), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_mutation_repository_uses_shared_mapping() {
        let error: anyhow::Error =
            MutationError::from(RepositoryError::event_not_found("ev-1")).into();
        assert_eq!(status_for(&error), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_bad_window_maps_to_400() {
        let error: anyhow::Error = TimeWindowError::InvalidWindow.into();
        assert_eq!(status_for(&error), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unknown_error_maps_to_500() {
        let error = anyhow::anyhow!("boom");
        assert_eq!(status_for(&error), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
