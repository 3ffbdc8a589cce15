//! Handler functions for authentication-related API endpoints.
//!
//! These functions parse request data and hand off to `auth::service` for
//! login, logout and session inspection. `validate` exposes the identity
//! adapter directly so that another deployment can point its remote adapter
//! here.

use crate::auth::debug::RedactedSession;
use crate::auth::middleware::bearer_token;
use crate::auth::models::{LoginRequest, LoginResponse, SessionResponse, SessionState};
use crate::errors::AppError;
use crate::services::dispatcher::dispatch_session;
use crate::AppState;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use eda_adapters::{RoleOption, Validation};

pub async fn roles(State(state): State<AppState>) -> Json<Vec<RoleOption>> {
    Json(state.auth.roles().to_vec())
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let outcome = state.auth.login(&request.role).await?;
    Ok(Json(LoginResponse {
        payload: outcome.payload,
        defaulted_permissions: outcome.defaulted,
        redirect: outcome.view.path(),
        view: outcome.view,
    }))
}

pub async fn logout(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.auth.logout().await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn session(State(state): State<AppState>) -> Json<SessionResponse> {
    let session = state.auth.session();
    let view = dispatch_session(&session);
    Json(SessionResponse {
        redirect: view.path(),
        view,
        session,
    })
}

pub async fn validate(State(state): State<AppState>, headers: HeaderMap) -> Json<Validation> {
    let identity = state.auth.store().identity();
    Json(identity.validate(bearer_token(&headers)).await)
}

pub async fn debug_reset(State(state): State<AppState>) -> Result<Json<SessionState>, AppError> {
    let hooks = state.debug.as_ref().ok_or(AppError::NotFound)?;
    Ok(Json(hooks.force_reset().await))
}

pub async fn debug_dump(State(state): State<AppState>) -> Result<Json<RedactedSession>, AppError> {
    let hooks = state.debug.as_ref().ok_or(AppError::NotFound)?;
    Ok(Json(hooks.dump()))
}
