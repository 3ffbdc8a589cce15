//! Handler functions for user profile API endpoints.

use crate::auth::middleware::CurrentUser;
use crate::auth::models::SessionState;
use crate::errors::AppError;
use crate::AppState;
use axum::extract::State;
use axum::{Extension, Json};
use eda_adapters::SessionUser;

pub async fn profile(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<SessionUser> {
    Json(user)
}

pub async fn password_changed(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<SessionState>, AppError> {
    Ok(Json(state.auth.mark_password_changed(user.id)?))
}
