use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use spacetrouble_core::{CollaboratorError, ScheduleError, ValidationError};

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Rejected(ScheduleError),
    Collaborator(CollaboratorError),
    Timeout,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Rejected(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AppError::Collaborator(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
            AppError::Timeout => (StatusCode::REQUEST_TIMEOUT, "Request timed out".to_string()),
        };

        let body = Json(json!({
            "message": message,
        }));

        (status, body).into_response()
    }
}

impl From<CollaboratorError> for AppError {
    fn from(err: CollaboratorError) -> Self {
        AppError::Collaborator(err)
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::Rejected(reason) => AppError::Rejected(reason),
            ValidationError::Collaborator(err) => AppError::Collaborator(err),
        }
    }
}
