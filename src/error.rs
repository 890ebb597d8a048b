use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use sea_orm::DbErr;
use thiserror::Error;
use tracing::error;

use crate::images::ImageError;
use crate::response::ApiResponse;

/// Every failure a handler can surface. Each variant maps to exactly one
/// status code and is rendered as the standard `{success: false, ...}` envelope.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed")]
    ValidationFailed(Vec<String>),

    #[error("{0}")]
    MissingRequiredUpload(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidId(String),

    #[error("{0}")]
    DuplicateResource(String),

    #[error("{0}")]
    UploadRejected(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ImageError> for AppError {
    fn from(err: ImageError) -> Self {
        let message = err.to_string();
        match err {
            ImageError::Decode(_) => AppError::UploadRejected(message),
            _ => AppError::Internal(message),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationFailed(_)
            | AppError::MissingRequiredUpload(_)
            | AppError::InvalidId(_)
            | AppError::DuplicateResource(_)
            | AppError::UploadRejected(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::ValidationFailed(errors) => ApiResponse::validation(errors.clone()),
            AppError::Database(e) => {
                error!("Database error: {e}");
                ApiResponse::failure("Internal server error")
            }
            AppError::Internal(msg) => {
                error!("Internal error: {msg}");
                ApiResponse::failure("Internal server error")
            }
            other => ApiResponse::failure(other.to_string()),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}
