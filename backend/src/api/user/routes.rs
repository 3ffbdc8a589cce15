//! Routes for user profile endpoints, guarded by `require_session`.

use super::handlers::{password_changed, profile};
use crate::auth::middleware::require_session;
use crate::AppState;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;

pub fn user_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/user/profile", get(profile))
        .route("/user/password-changed", post(password_changed))
        .route_layer(from_fn_with_state(state, require_session))
}
