use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::quiz::QuizError;

/// Failure of a request. Every variant renders as
/// `{"success": false, "error": <status>, "message": <text>}`; storage
/// details are logged, never sent to the client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("bad request")]
    BadRequest,
    #[error("resource not found")]
    NotFound,
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("Unprocessable request")]
    Unprocessable,
    /// Storage failure while writing, reported as 422.
    #[error("write rejected by storage: {0}")]
    WriteRejected(#[source] sqlx::Error),
    #[error("storage failure: {0}")]
    Storage(#[from] sqlx::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Unprocessable | ApiError::WriteRejected(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            ApiError::BadRequest => "bad request",
            ApiError::NotFound => "resource not found",
            ApiError::MethodNotAllowed => "method not allowed",
            ApiError::Unprocessable | ApiError::WriteRejected(_) => "Unprocessable request",
            ApiError::Storage(_) => "internal server error",
        }
    }
}

impl From<QuizError> for ApiError {
    fn from(error: QuizError) -> Self {
        match error {
            QuizError::UnknownCategory(_) => ApiError::NotFound,
            QuizError::Storage(e) => ApiError::Storage(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Storage(e) => tracing::error!(error = %e, "Storage error"),
            ApiError::WriteRejected(e) => tracing::warn!(error = %e, "Write rejected"),
            _ => {}
        }
        let status = self.status();
        let body = json!({
            "success": false,
            "error": status.as_u16(),
            "message": self.message(),
        });
        (status, Json(body)).into_response()
    }
}
