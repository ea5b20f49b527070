use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use qzr_db::StoreError;
use serde_json::json;
use thiserror::Error;

use crate::generation::GenerationError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Store(e) => {
                tracing::error!(error = %e, "Storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to access saved data. Please try again.".to_string(),
                )
            }
            Self::Generation(e) => {
                tracing::warn!(error = %e, "Generation failure");
                (
                    StatusCode::BAD_GATEWAY,
                    "Failed to generate content. Please try again.".to_string(),
                )
            }
            Self::NotFound(what) => (StatusCode::NOT_FOUND, format!("{what} not found")),
            Self::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
