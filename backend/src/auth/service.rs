//! Core business logic for the authentication system.
//!
//! `AuthService` is what the handlers talk to. It runs the simulated latency,
//! resolves roles into session payloads, commits them to the session store,
//! and refetches the profile behind the current token.

use crate::auth::errors::AuthError;
use crate::auth::models::SessionState;
use crate::auth::store::SessionStore;
use crate::services::dispatcher::{dispatch_session, View};
use crate::services::latency::{Latency, Operation};
use eda_adapters::{
    CredentialResolver, IdentityAdapter, RoleOption, SessionPayload, SessionUser, Validation,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub payload: SessionPayload,
    pub defaulted: bool,
    pub view: View,
}

pub struct AuthService {
    store: Arc<SessionStore>,
    resolver: CredentialResolver,
    latency: Arc<dyn Latency>,
}

impl AuthService {
    pub fn new(
        store: Arc<SessionStore>,
        resolver: CredentialResolver,
        latency: Arc<dyn Latency>,
    ) -> Self {
        Self {
            store,
            resolver,
            latency,
        }
    }

    #[must_use]
    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    fn identity(&self) -> &Arc<dyn IdentityAdapter> {
        self.store.identity()
    }

    /// Role cards for the entry view.
    #[must_use]
    pub fn roles(&self) -> &[RoleOption] {
        self.resolver.directory().role_options()
    }

    #[must_use]
    pub fn session(&self) -> SessionState {
        self.store.snapshot()
    }

    /// Startup rehydration.
    pub async fn initialize(&self) -> SessionState {
        self.latency.pause(Operation::Validate).await;
        self.store.initialize().await
    }

    /// Logs in as the demo user behind `role_id`.
    pub async fn login(&self, role_id: &str) -> Result<LoginOutcome, AuthError> {
        self.latency.pause(Operation::Login).await;

        let resolution = self.resolver.resolve(role_id)?;
        if resolution.defaulted {
            warn!(role = role_id, "logging in with default permissions");
        }
        let state = self.store.login(resolution.payload.clone())?;
        let view = dispatch_session(&state);
        info!(role = role_id, redirect = view.path(), "login complete");

        Ok(LoginOutcome {
            payload: resolution.payload,
            defaulted: resolution.defaulted,
            view,
        })
    }

    pub async fn logout(&self) -> Result<(), AuthError> {
        self.latency.pause(Operation::Logout).await;
        self.store.clear_all()?;
        Ok(())
    }

    /// Refetches the profile behind `token`, or behind the session's own
    /// token when none is given.
    pub async fn profile(&self, token: Option<&str>) -> Result<SessionUser, AuthError> {
        self.latency.pause(Operation::Profile).await;

        let session_token = self.store.snapshot().token;
        let token = token.or(session_token.as_deref());
        let validation = self
            .identity()
            .check(token)
            .await
            .map_err(|err| AuthError::Backend(err.to_string()))?;

        match validation {
            Validation::Valid { user, .. } => Ok(user),
            Validation::Invalid => Err(AuthError::NotAuthenticated),
        }
    }

    /// Clears the must-change-password flag after the password modal flow.
    pub fn mark_password_changed(&self, user_id: u32) -> Result<SessionState, AuthError> {
        if !self.store.snapshot().is_authenticated {
            return Err(AuthError::NotAuthenticated);
        }
        let mut matched = false;
        let state = self.store.set_partial(|state| {
            if !state.is_authenticated {
                return;
            }
            if let Some(user) = state.user.as_mut().filter(|u| u.id == user_id) {
                user.must_change_password = false;
                matched = true;
            }
        })?;
        if !matched {
            warn!(user_id, "password change for a user outside the session");
            return Err(AuthError::NotAuthenticated);
        }
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::latency::NoDelay;
    use crate::storage::MemoryStorage;
    use eda_adapters::{DemoAdapter, FixtureDirectory, RemoteAdapter, ResolveError};

    fn service_with(identity: Arc<dyn IdentityAdapter>) -> (AuthService, MemoryStorage) {
        let storage = MemoryStorage::new();
        let resolver = CredentialResolver::new(Arc::new(FixtureDirectory::demo()));
        let store = Arc::new(SessionStore::new(Arc::new(storage.clone()), identity));
        (AuthService::new(store, resolver, Arc::new(NoDelay)), storage)
    }

    fn service() -> (AuthService, MemoryStorage) {
        let resolver = CredentialResolver::new(Arc::new(FixtureDirectory::demo()));
        service_with(Arc::new(DemoAdapter::new(resolver)))
    }

    #[tokio::test]
    async fn docente_login_scenario() {
        let (auth, _) = service();
        let outcome = auth.login("docente").await.unwrap();

        let user_id = outcome.payload.user.id;
        assert_eq!(outcome.payload.token, format!("demo-token-{user_id}"));
        assert_eq!(outcome.payload.role.nombre, "trabajador");
        assert!(outcome.payload.permissions.contains("read_students"));
        assert!(outcome.payload.permissions.contains("academic_access"));
        assert_eq!(outcome.view, View::Teacher);
        assert!(auth.session().is_authenticated);
    }

    #[tokio::test]
    async fn unknown_role_leaves_session_untouched() {
        let (auth, storage) = service();
        let err = auth.login("profesor").await.unwrap_err();

        assert!(matches!(
            err,
            AuthError::Resolve(ResolveError::RoleNotFound(ref role)) if role == "profesor"
        ));
        assert!(!auth.session().is_authenticated);
        assert!(storage.is_empty().unwrap());
    }

    #[tokio::test]
    async fn defaulted_login_is_flagged() {
        let (auth, _) = service();
        let outcome = auth.login("secretaria").await.unwrap();
        assert!(outcome.defaulted);
    }

    #[tokio::test]
    async fn logout_clears_session_and_storage() {
        let (auth, storage) = service();
        auth.login("padre").await.unwrap();
        auth.logout().await.unwrap();

        assert_eq!(auth.session(), SessionState::default());
        assert!(storage.is_empty().unwrap());
    }

    #[tokio::test]
    async fn profile_follows_session_token() {
        let (auth, _) = service();
        assert!(matches!(
            auth.profile(None).await,
            Err(AuthError::NotAuthenticated)
        ));

        auth.login("especialista").await.unwrap();
        let user = auth.profile(None).await.unwrap();
        assert_eq!(user.role, "especialista");

        let other = auth.profile(Some("demo-token-1")).await.unwrap();
        assert_eq!(other.id, 1);
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_backend_error() {
        let (auth, _) = service_with(Arc::new(RemoteAdapter::new("http://127.0.0.1:9").unwrap()));
        let err = auth.profile(Some("demo-token-1")).await.unwrap_err();
        assert!(matches!(err, AuthError::Backend(_)));
    }

    #[tokio::test]
    async fn password_flag_requires_session() {
        let (auth, _) = service();
        assert!(matches!(
            auth.mark_password_changed(2),
            Err(AuthError::NotAuthenticated)
        ));

        auth.login("docente").await.unwrap();
        let state = auth.mark_password_changed(2).unwrap();
        assert!(!state.user.unwrap().must_change_password);
    }

    #[tokio::test]
    async fn password_flag_only_for_the_session_user() {
        let (auth, _) = service();
        auth.login("padre").await.unwrap();
        auth.store()
            .set_partial(|state| {
                if let Some(user) = state.user.as_mut() {
                    user.must_change_password = true;
                }
            })
            .unwrap();

        assert!(matches!(
            auth.mark_password_changed(1),
            Err(AuthError::NotAuthenticated)
        ));
        let session = auth.session();
        assert_eq!(session.user.as_ref().map(|u| u.id), Some(3));
        assert!(session.user.unwrap().must_change_password);
    }
}
