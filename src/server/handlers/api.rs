//! Service endpoints: health, status and fallbacks.

use std::any::Any;

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::super::error::ApiError;
use super::super::AppState;
use crate::dataset::LoadReport;

#[derive(Serialize)]
struct StatusResponse {
    #[serde(flatten)]
    report: LoadReport,
    index: &'static str,
}

/// Health check endpoint for container orchestration.
pub async fn health() -> impl IntoResponse {
    StatusCode::OK
}

/// Dataset load report and active index.
pub async fn api_status(State(state): State<AppState>) -> impl IntoResponse {
    Json(StatusResponse {
        report: state.query.dataset().report().clone(),
        index: state.query.index_name(),
    })
}

/// JSON 404 for unknown routes.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}

/// Turn a handler panic into a JSON 500.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    ApiError::Internal(detail).into_response()
}
