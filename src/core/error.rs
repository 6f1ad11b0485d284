use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::features::ordering::models::OrderingError;
use crate::modules::storage::StorageError;
use crate::modules::store::StoreError;
use crate::shared::types::ApiResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Remote store error: {0}")]
    Store(#[from] StoreError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Ordering error: {0}")]
    Ordering(#[from] OrderingError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Precondition failed: {0}")]
    Precondition(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            AppError::Store(StoreError::NotFound(ref msg)) => {
                (StatusCode::NOT_FOUND, msg.clone(), None)
            }
            AppError::Store(ref e) => {
                tracing::error!("Remote store error: {:?}", e);
                (StatusCode::BAD_GATEWAY, e.to_string(), None)
            }
            AppError::Storage(ref e) => {
                tracing::error!("Object storage error: {:?}", e);
                (StatusCode::BAD_GATEWAY, e.to_string(), None)
            }
            AppError::Ordering(ref e @ OrderingError::IndexOutOfBounds { .. }) => {
                (StatusCode::BAD_REQUEST, e.to_string(), None)
            }
            AppError::Ordering(ref e) => (StatusCode::NOT_FOUND, e.to_string(), None),
            AppError::NotFound(ref msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
            AppError::Validation(ref msg) => (
                StatusCode::BAD_REQUEST,
                msg.clone(),
                Some(vec![msg.clone()]),
            ),
            AppError::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::Precondition(ref msg) => {
                tracing::warn!("Precondition failed: {}", msg);
                (StatusCode::SERVICE_UNAVAILABLE, msg.clone(), None)
            }
        };

        let body = Json(ApiResponse::<()>::error(Some(message), errors));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
