//! Global application error types and handlers.
//!
//! This module defines the error returned by HTTP handlers, the startup error
//! of the binary, and the feedback notice shown to the user. Network-class
//! backend failures are rephrased as informational notices because the demo
//! has no backend to reach; resolution and validation failures never are.

use crate::auth::errors::AuthError;
use crate::config::ConfigError;
use crate::storage::StorageError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use eda_adapters::{AdapterError, ResolveError};
use serde::Serialize;
use thiserror::Error;

/// Substrings that mark a backend error as network-class.
const NETWORK_ERROR_PATTERNS: &[&str] = &[
    "network error",
    "failed to fetch",
    "econnrefused",
    "connection refused",
    "timed out",
    "timeout",
    "error sending request",
    "identity backend request failed",
];

pub const DEMO_MODE_NOTICE: &str =
    "Modo demo: no hay un servidor disponible, se usan datos de demostración.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackLevel {
    Info,
    Error,
}

/// A toast-style notice for the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub level: FeedbackLevel,
    pub message: String,
}

impl Feedback {
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FeedbackLevel::Error,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: FeedbackLevel::Info,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn from_error(err: &AuthError) -> Self {
        match err {
            AuthError::Resolve(ResolveError::EmptyRole) => Self::error("Selecciona un rol"),
            AuthError::Resolve(ResolveError::RoleNotFound(role)) => {
                Self::error(format!("Selecciona un rol válido (\"{role}\" no existe)"))
            }
            AuthError::NotAuthenticated => Self::error("Tu sesión no es válida, inicia sesión"),
            AuthError::Backend(message) if is_network_error(message) => {
                Self::info(DEMO_MODE_NOTICE)
            }
            other => Self::error(other.to_string()),
        }
    }
}

#[must_use]
pub fn is_network_error(message: &str) -> bool {
    let lowered = message.to_lowercase();
    NETWORK_ERROR_PATTERNS
        .iter()
        .any(|pattern| lowered.contains(pattern))
}

/// Error returned from HTTP handlers.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("not found")]
    NotFound,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    notice: Feedback,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, notice) = match &self {
            Self::Auth(err) => {
                let notice = Feedback::from_error(err);
                let status = match err {
                    AuthError::Resolve(_) => StatusCode::BAD_REQUEST,
                    AuthError::NotAuthenticated => StatusCode::UNAUTHORIZED,
                    AuthError::Backend(_) => StatusCode::SERVICE_UNAVAILABLE,
                    AuthError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, notice)
            }
            Self::NotFound => (StatusCode::NOT_FOUND, Feedback::error("Recurso no encontrado")),
        };
        let body = ErrorBody {
            error: self.to_string(),
            notice,
        };
        (status, Json(body)).into_response()
    }
}

/// Errors that stop the binary before it serves.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("identity adapter error: {0}")]
    Adapter(#[from] AdapterError),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}
