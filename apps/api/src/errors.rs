use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::pipeline::PipelineError;
use crate::resume::ExtractError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Pipeline(e) => match e {
                PipelineError::Scrape(_) => StatusCode::BAD_GATEWAY,
                PipelineError::Resume(ExtractError::NotFound(_))
                | PipelineError::JobDescriptionNotFound(_) => StatusCode::NOT_FOUND,
                PipelineError::Resume(ExtractError::UnsupportedFormat(_))
                | PipelineError::Resume(ExtractError::Parse { .. })
                | PipelineError::JobDescriptionInvalid { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                PipelineError::InvalidFileName(_) => StatusCode::BAD_REQUEST,
                PipelineError::Resume(ExtractError::Io(_)) | PipelineError::Persist(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!("{message}");
        } else {
            tracing::warn!("Request failed ({status}): {message}");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}
