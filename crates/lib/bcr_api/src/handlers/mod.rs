//! Request handlers.

pub mod application;
pub mod auth;
