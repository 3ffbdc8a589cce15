//! Central module for organizing the application's main API endpoints.
//!
//! This module acts as a top-level container for the `/api` domains, user
//! profiles and dashboard dispatch, excluding core authentication routes
//! which are handled separately.

pub mod dashboard;
pub mod user;

use crate::AppState;
use axum::Router;

pub fn api_router(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(user::routes::user_router(state))
        .merge(dashboard::routes::dashboard_router())
}
