//! Authentication middleware — Bearer token extraction and role check.

use axum::http::header::AUTHORIZATION;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use bcr_core::models::auth::{Role, SessionClaims};

use crate::AppState;
use crate::error::{AppError, UNAUTHORIZED};

/// Verified claims, stored in request extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub SessionClaims);

/// Axum middleware: requires a valid token carrying the `CUSTOMER` role.
pub async fn require_customer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    authorize(&state, request, next, Role::CUSTOMER).await
}

/// Extracts `Authorization: Bearer <token>`, authorizes it against
/// `required_role`, and injects [`AuthenticatedUser`] into the request.
async fn authorize(
    state: &AppState,
    mut request: Request,
    next: Next,
    required_role: &str,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized(UNAUTHORIZED.into()))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized(UNAUTHORIZED.into()))?;

    let claims = state.auth.authorize(token.trim(), required_role)?;

    request.extensions_mut().insert(AuthenticatedUser(claims));

    Ok(next.run(request).await)
}
