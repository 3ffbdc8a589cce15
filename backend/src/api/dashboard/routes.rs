use super::handlers::dashboard;
use crate::AppState;
use axum::routing::get;
use axum::Router;

pub fn dashboard_router() -> Router<AppState> {
    Router::new().route("/dashboard", get(dashboard))
}
