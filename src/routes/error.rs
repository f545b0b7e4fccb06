use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::validate::ValidationError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("internal server error: {0}")]
    Internal(#[from] anyhow::Error),
    #[error("not found")]
    NotFound,
    #[error("{0}")]
    Invalid(#[from] ValidationError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Internal(err) => {
                error!("request failed: {:?}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not Found").into_response(),
            AppError::Invalid(err) => (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
        }
    }
}
