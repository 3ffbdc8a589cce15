//! Authentication module for the demo session layer.
//!
//! This module provides the public interface for logging in as a demo role,
//! rehydrating and clearing the session, validating tokens, and the opt-in
//! debug hooks.

pub mod debug;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
pub mod store;

// Re-exports for convenience
pub use debug::{DebugHooks, RedactedSession};
pub use errors::AuthError;
pub use middleware::{bearer_token, require_session, CurrentUser};
pub use models::*;
pub use routes::{auth_router, debug_router};
pub use service::{AuthService, LoginOutcome};
pub use store::SessionStore;
