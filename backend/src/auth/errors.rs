//! Custom error types specific to authentication failures.
//!
//! Resolution and storage failures propagate to callers as `AuthError`.
//! Token validation never produces one: an unusable token is an invalid
//! result, not an error.

use crate::storage::StorageError;
use eda_adapters::ResolveError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("session storage failed: {0}")]
    Storage(#[from] StorageError),

    #[error("no authenticated session")]
    NotAuthenticated,

    /// Error reported by an identity backend, kept as its message.
    #[error("{0}")]
    Backend(String),
}
