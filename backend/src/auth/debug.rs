//! Diagnostic hooks for session troubleshooting.
//!
//! Only constructed when debug hooks are enabled in the configuration. Nothing
//! calls them implicitly; they are reached through the `/debug` routes.

use crate::auth::models::SessionState;
use crate::auth::store::SessionStore;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

const TOKEN_PREVIEW_CHARS: usize = 8;

/// Session state with the token shortened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedactedSession {
    pub is_authenticated: bool,
    pub user_id: Option<u32>,
    pub username: Option<String>,
    pub role: Option<String>,
    pub legacy_role: Option<String>,
    pub token: Option<String>,
    pub permissions: Vec<String>,
    pub loading: bool,
}

impl From<&SessionState> for RedactedSession {
    fn from(state: &SessionState) -> Self {
        Self {
            is_authenticated: state.is_authenticated,
            user_id: state.user.as_ref().map(|u| u.id),
            username: state.user.as_ref().map(|u| u.username.clone()),
            role: state.role_name().map(str::to_string),
            legacy_role: state.legacy_role_name().map(str::to_string),
            token: state.token.as_deref().map(redact_token),
            permissions: state.permissions.iter().map(str::to_string).collect(),
            loading: state.loading,
        }
    }
}

fn redact_token(token: &str) -> String {
    let preview: String = token.chars().take(TOKEN_PREVIEW_CHARS).collect();
    if preview.len() == token.len() {
        preview
    } else {
        format!("{preview}…")
    }
}

pub struct DebugHooks {
    store: Arc<SessionStore>,
}

impl DebugHooks {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }

    /// Wipes the session and its snapshot, then reruns startup rehydration.
    pub async fn force_reset(&self) -> SessionState {
        warn!("debug: forcing session reset");
        if let Err(err) = self.store.clear_all() {
            warn!(error = %err, "debug: clearing session storage failed");
        }
        self.store.initialize().await
    }

    /// Logs and returns the current session with the token redacted.
    pub fn dump(&self) -> RedactedSession {
        let redacted = RedactedSession::from(&self.store.snapshot());
        info!(session = ?redacted, "debug: session dump");
        redacted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use eda_adapters::{CredentialResolver, DemoAdapter, FixtureDirectory};

    fn hooks() -> (DebugHooks, Arc<SessionStore>, MemoryStorage) {
        let storage = MemoryStorage::new();
        let resolver = CredentialResolver::new(Arc::new(FixtureDirectory::demo()));
        let store = Arc::new(SessionStore::new(
            Arc::new(storage.clone()),
            Arc::new(DemoAdapter::new(resolver.clone())),
        ));
        store
            .login(resolver.resolve("administracion").unwrap().payload)
            .unwrap();
        (DebugHooks::new(store.clone()), store, storage)
    }

    #[test]
    fn dump_truncates_token() {
        let (hooks, _, _) = hooks();
        let dump = hooks.dump();
        assert_eq!(dump.token.as_deref(), Some("demo-tok…"));
        assert_eq!(dump.role.as_deref(), Some("admin"));
        assert_eq!(dump.legacy_role.as_deref(), Some("administracion"));
    }

    #[test]
    fn short_tokens_are_not_suffixed() {
        assert_eq!(redact_token("abc"), "abc");
    }

    #[tokio::test]
    async fn force_reset_ends_anonymous() {
        let (hooks, store, storage) = hooks();
        let state = hooks.force_reset().await;
        assert!(!state.is_authenticated);
        assert_eq!(store.snapshot(), SessionState::default());
        assert!(storage.is_empty().unwrap());
    }
}
