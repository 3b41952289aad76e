use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

/// Body returned for a storage failure. Every store error is a server error.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError { pub message: String }

impl IntoResponse for ApiError {
    fn into_response(self) -> Response { (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(self)).into_response() }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        tracing::error!(error = %format!("{err:#}"), "storage failure");
        Self { message: format!("{err:#}") }
    }
}
