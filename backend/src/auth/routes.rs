//! Defines the HTTP routes specifically for authentication.
//!
//! These routes handle role selection, login, logout, session inspection and
//! token validation. They are nested under `/auth` in the main router; the
//! debug routes are nested under `/debug` only when enabled.

use super::handlers::{debug_dump, debug_reset, login, logout, roles, session, validate};
use crate::AppState;
use axum::routing::{get, post};
use axum::Router;

pub fn auth_router() -> Router<AppState> {
    Router::new()
        .route("/roles", get(roles))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/session", get(session))
        .route("/validate", get(validate))
}

pub fn debug_router() -> Router<AppState> {
    Router::new()
        .route("/reset", post(debug_reset))
        .route("/dump", get(debug_dump))
}
