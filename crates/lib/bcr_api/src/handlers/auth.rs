//! Authentication request handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use bcr_core::models::auth::{Profile, PublicUserView};

use crate::AppState;
use crate::error::AppResult;
use crate::extract::ApiJson;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{LoginRequest, LoginResponse, RegisterRequest};

/// `POST /v1/auth/register` — create a new customer account.
pub async fn register_handler(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<PublicUserView>)> {
    let profile = Profile {
        name: body.name,
        image: body.image,
    };
    let user = state
        .auth
        .register(&body.email, &body.password, profile)
        .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// `POST /v1/auth/login` — authenticate with email + password.
pub async fn login_handler(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> AppResult<(StatusCode, Json<LoginResponse>)> {
    let access_token = state.auth.login(&body.email, &body.password).await?;
    Ok((StatusCode::CREATED, Json(LoginResponse { access_token })))
}

/// `GET /v1/auth/whoami` — the identity carried by the caller's token.
pub async fn whoami_handler(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(claims)): Extension<AuthenticatedUser>,
) -> Json<PublicUserView> {
    Json(state.auth.whoami(&claims))
}
