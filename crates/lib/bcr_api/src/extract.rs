//! Request extractors that reject with [`AppError`] bodies.

use axum::extract::FromRequest;

use crate::error::AppError;

/// JSON body extractor. Malformed, mistyped or incomplete bodies become a
/// 400 `ValidationError`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
