use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;
use tracing::error;

use crate::log::LogError;

/// Failures surfaced by the HTTP handlers.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("bad request: {0}")]
    BadInput(String),

    #[error("not found")]
    NotFound,

    #[error("internal server error: {0}")]
    Internal(String),
}

impl From<LogError> for ServiceError {
    fn from(e: LogError) -> Self {
        match e {
            LogError::IndexOutOfRange { .. } => ServiceError::BadInput(e.to_string()),
            LogError::Empty => ServiceError::NotFound,
        }
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(e: serde_json::Error) -> Self {
        ServiceError::Internal(e.to_string())
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::BadInput(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound => StatusCode::NOT_FOUND,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ServiceError::BadInput(msg) => HttpResponse::BadRequest().body(msg.clone()),
            ServiceError::NotFound => HttpResponse::NotFound().finish(),
            ServiceError::Internal(cause) => {
                error!(%cause, "failed to serve request");
                HttpResponse::InternalServerError().body("internal server error")
            }
        }
    }
}
