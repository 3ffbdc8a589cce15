//! Custom error types specific to the `adapters` crate.
//!
//! Resolution errors are returned to login callers so they can tell a typo
//! from an intended fallback. Adapter errors cover remote identity calls and
//! never cross the validation boundary: adapters fold them into an invalid
//! result.

use thiserror::Error;

/// Failure to turn a role id into a session payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// No role was selected.
    #[error("select a role to continue")]
    EmptyRole,

    /// The role id has no entry in the fixture directory.
    #[error("role not found in fixture directory: {0}")]
    RoleNotFound(String),
}

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("identity backend request failed: {0}")]
    Transport(String),

    #[error("identity backend returned status {0}")]
    Status(u16),

    #[error("identity backend response could not be decoded: {0}")]
    Decode(String),
}
