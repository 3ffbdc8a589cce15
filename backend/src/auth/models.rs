//! Data structures for authentication-related entities.
//!
//! This module defines the in-memory session state owned by the session
//! store, plus the request and response bodies of the authentication
//! endpoints.

use crate::services::dispatcher::View;
use crate::storage::snapshot::PersistedState;
use eda_adapters::{PermissionSet, RoleDescriptor, SessionPayload, SessionUser};
use serde::{Deserialize, Serialize};

/// Current authentication state. `Default` is the empty, anonymous shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub is_authenticated: bool,
    pub user: Option<SessionUser>,
    pub role: Option<RoleDescriptor>,
    pub token: Option<String>,
    pub permissions: PermissionSet,
    pub loading: bool,
}

impl SessionState {
    #[must_use]
    pub fn from_payload(payload: SessionPayload) -> Self {
        Self {
            is_authenticated: true,
            user: Some(payload.user),
            role: Some(payload.role),
            token: Some(payload.token),
            permissions: payload.permissions,
            loading: false,
        }
    }

    /// The snapshot form of this state; `loading` is not persisted.
    #[must_use]
    pub fn persisted(&self) -> PersistedState {
        PersistedState {
            is_authenticated: self.is_authenticated,
            user: self.user.clone(),
            role: self.role.clone(),
            token: self.token.clone(),
            permissions: self.permissions.clone(),
        }
    }

    /// Canonical role name (`role.nombre`).
    #[must_use]
    pub fn role_name(&self) -> Option<&str> {
        self.role.as_ref().map(|r| r.nombre.as_str())
    }

    /// Legacy flat role string carried on the user.
    #[must_use]
    pub fn legacy_role_name(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.role.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(flatten)]
    pub payload: SessionPayload,
    /// Set when the role had no permission mapping and the default applied.
    pub defaulted_permissions: bool,
    pub view: View,
    pub redirect: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session: SessionState,
    pub view: View,
    pub redirect: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_anonymous() {
        let state = SessionState::default();
        assert!(!state.is_authenticated);
        assert!(state.user.is_none());
        assert!(state.token.is_none());
        assert!(!state.loading);
    }

    #[test]
    fn state_serializes_in_camel_case() {
        let value = serde_json::to_value(SessionState::default()).unwrap();
        assert_eq!(value["isAuthenticated"], false);
        assert!(value.get("is_authenticated").is_none());
    }
}
