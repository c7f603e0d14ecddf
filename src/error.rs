use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;
use tracing::warn;
use validator::ValidationErrors;

use crate::{dao::storage::StorageError, state::error::RegistryError};

/// Errors that can occur in service layer operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage backend is unavailable.
    #[error("storage unavailable")]
    Unavailable(#[source] StorageError),
    /// Invalid input provided by the client.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Entity already exists.
    #[error("duplicate: {0}")]
    Duplicate(String),
    /// Operation cannot be performed in the current state.
    #[error("invalid state: {0}")]
    InvalidState(String),
    /// Requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        ServiceError::Unavailable(err)
    }
}

impl From<RegistryError> for ServiceError {
    fn from(err: RegistryError) -> Self {
        match &err {
            RegistryError::DuplicatePlayer(_) => ServiceError::Duplicate(err.to_string()),
            RegistryError::InvalidName => ServiceError::InvalidInput(err.to_string()),
            RegistryError::UnknownPlayer(_) | RegistryError::UnknownGame(_) => {
                ServiceError::NotFound(err.to_string())
            }
            RegistryError::RestWithoutGame(_) => ServiceError::InvalidInput(err.to_string()),
            RegistryError::InvalidTransition(invalid) => {
                // Callers only reach this by driving a game out of order.
                warn!(from = ?invalid.from, event = ?invalid.event, "rejected game transition");
                ServiceError::InvalidState(invalid.to_string())
            }
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(err: ValidationErrors) -> Self {
        AppError::BadRequest(format!("validation failed: {}", err))
    }
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request with invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Requested resource not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// Conflict with current state.
    #[error("conflict: {0}")]
    Conflict(String),
    /// Service unavailable or degraded.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Unavailable(source) => AppError::ServiceUnavailable(source.to_string()),
            ServiceError::InvalidInput(message) => AppError::BadRequest(message),
            ServiceError::Duplicate(message) => AppError::Conflict(message),
            ServiceError::InvalidState(message) => AppError::Conflict(message),
            ServiceError::NotFound(message) => AppError::NotFound(message),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        let payload = Json(ErrorBody {
            message: self.to_string(),
        });

        (status, payload).into_response()
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::state::lifecycle::{GameEvent, GameStatus, InvalidTransition};

    #[test]
    fn registry_errors_map_to_http_semantics() {
        let cases = [
            (
                RegistryError::DuplicatePlayer("AMY".into()),
                StatusCode::CONFLICT,
            ),
            (RegistryError::InvalidName, StatusCode::BAD_REQUEST),
            (
                RegistryError::UnknownGame(Uuid::nil()),
                StatusCode::NOT_FOUND,
            ),
            (
                RegistryError::InvalidTransition(InvalidTransition {
                    from: GameStatus::Completed,
                    event: GameEvent::Start,
                }),
                StatusCode::CONFLICT,
            ),
        ];

        for (err, expected) in cases {
            let response = AppError::from(ServiceError::from(err)).into_response();
            assert_eq!(response.status(), expected);
        }
    }
}
