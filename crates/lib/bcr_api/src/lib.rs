//! # bcr_api
//!
//! HTTP API library for BCR: the auth endpoints over `bcr_core`.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use bcr_core::auth::{AuthResult, AuthenticationService, CredentialStore};
use bcr_core::config::AuthConfig;
use tower_http::cors::{Any, CorsLayer};

use crate::handlers::{application, auth};

/// Authentication service over any credential store.
pub type SharedAuthService = Arc<AuthenticationService<dyn CredentialStore>>;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub auth: SharedAuthService,
}

impl AppState {
    /// Build state around `store` using the given auth configuration.
    pub fn new(store: Arc<dyn CredentialStore>, config: &AuthConfig) -> AuthResult<Self> {
        Ok(Self {
            auth: Arc::new(AuthenticationService::new(store, config)?),
        })
    }
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no auth required)
    let public = Router::new()
        .route(routes::GET_ROOT, get(application::root_handler))
        .route(routes::POST_AUTH_REGISTER, post(auth::register_handler))
        .route(routes::POST_AUTH_LOGIN, post(auth::login_handler));

    // Protected routes (customer token required)
    let protected = Router::new()
        .route(routes::GET_AUTH_WHOAMI, get(auth::whoami_handler))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_customer,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .fallback(application::not_found_handler)
        .layer(cors)
        .with_state(state)
}
