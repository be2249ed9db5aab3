//! Application error types.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bcr_core::auth::AuthError;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{debug, error};

use crate::models::{ErrorBody, ErrorResponse};

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Message shared by every rejected session token.
pub(crate) const UNAUTHORIZED: &str = "Unauthorized";

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {method} {url}")]
    NotFound { method: String, url: String },

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, name, message, details): (StatusCode, &str, String, Option<Value>) =
            match self {
                AppError::Validation(m) => (StatusCode::BAD_REQUEST, "ValidationError", m, None),
                AppError::Conflict(m) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "DuplicateIdentifierError",
                    m,
                    None,
                ),
                AppError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, "UnauthorizedError", m, None),
                AppError::Forbidden(m) => (StatusCode::FORBIDDEN, "InsufficientAccessError", m, None),
                AppError::NotFound { method, url } => (
                    StatusCode::NOT_FOUND,
                    "Error",
                    "Not found!".to_string(),
                    Some(json!({ "method": method, "url": url })),
                ),
                AppError::Internal(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error",
                    "Internal server error".to_string(),
                    None,
                ),
            };
        let body = Json(ErrorResponse {
            error: ErrorBody {
                name: name.to_string(),
                message,
                details,
            },
        });
        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        debug!(status = %rejection.status(), "request body rejected");
        AppError::Validation(rejection.body_text())
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidInput(msg) => AppError::Validation(msg),
            AuthError::DuplicateIdentifier(email) => {
                AppError::Conflict(format!("Email {email} is already taken"))
            }
            AuthError::InvalidCredentials => AppError::Unauthorized("Invalid credentials".into()),
            e @ (AuthError::MalformedToken(_)
            | AuthError::InvalidSignature
            | AuthError::ExpiredToken) => {
                debug!(error = %e, "rejecting request with unusable token");
                AppError::Unauthorized(UNAUTHORIZED.into())
            }
            AuthError::InsufficientAccess { required } => {
                AppError::Forbidden(format!("Access requires role {required}"))
            }
            AuthError::MalformedHash => {
                error!("credential store holds a malformed password hash");
                AppError::Internal("malformed password hash".into())
            }
            e @ (AuthError::Store(_) | AuthError::Config(_) | AuthError::Internal(_)) => {
                error!(error = %e, "auth failure");
                AppError::Internal(e.to_string())
            }
        }
    }
}
