//! Middleware for protecting authenticated routes.
//!
//! The bearer token (or, without one, the session's own token) is refetched
//! through the identity adapter before the request reaches the handler. The
//! validated user is attached to the request as [`CurrentUser`].

use crate::errors::AppError;
use crate::AppState;
use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use eda_adapters::SessionUser;

#[derive(Debug, Clone)]
pub struct CurrentUser(pub SessionUser);

/// Extracts the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers()).map(str::to_string);
    let user = state.auth.profile(token.as_deref()).await?;
    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}
