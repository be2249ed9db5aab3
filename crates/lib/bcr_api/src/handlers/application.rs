//! Root status and fallback handlers.

use axum::Json;
use axum::http::{Method, Uri};

use crate::error::AppError;
use crate::models::RootResponse;

/// `GET /` — liveness check.
pub async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse {
        status: "OK".into(),
        message: "BCR API is up and running!".into(),
    })
}

/// Fallback for unmatched routes.
pub async fn not_found_handler(method: Method, uri: Uri) -> AppError {
    AppError::NotFound {
        method: method.to_string(),
        url: uri.to_string(),
    }
}
