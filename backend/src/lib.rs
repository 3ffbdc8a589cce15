//! EDA backend: the demo session layer behind an HTTP surface.
//!
//! Wires the identity adapters, snapshot storage, session store and auth
//! service into an [`AppState`], and builds the axum router the binary serves.

pub mod api;
pub mod auth;
pub mod config;
pub mod errors;
pub mod middleware;
pub mod services;
pub mod storage;

use crate::auth::{auth_router, debug_router, AuthService, DebugHooks, SessionStore};
use crate::config::{Config, IdentityBackend, StorageBackend};
use crate::errors::StartupError;
use crate::services::latency::{FixedDelay, JitterDelay, Latency, NoDelay};
use crate::storage::{FileStorage, KeyValueStorage, MemoryStorage};
use axum::routing::get;
use axum::Router;
use eda_adapters::{CredentialResolver, DemoAdapter, FixtureDirectory, IdentityAdapter, RemoteAdapter};
use std::sync::Arc;

/// Shared handler state. The store is constructed here and injected; there
/// is no global session.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub debug: Option<Arc<DebugHooks>>,
}

impl AppState {
    pub fn new(
        storage: Arc<dyn KeyValueStorage>,
        identity: Arc<dyn IdentityAdapter>,
        resolver: CredentialResolver,
        latency: Arc<dyn Latency>,
        debug_hooks: bool,
    ) -> Self {
        let store = Arc::new(SessionStore::new(storage, identity));
        let debug = debug_hooks.then(|| Arc::new(DebugHooks::new(store.clone())));
        Self {
            auth: Arc::new(AuthService::new(store, resolver, latency)),
            debug,
        }
    }
}

/// Builds the application state described by `config`.
pub fn build_state(config: &Config) -> Result<AppState, StartupError> {
    let resolver = CredentialResolver::new(Arc::new(FixtureDirectory::demo()));

    let storage: Arc<dyn KeyValueStorage> = match &config.storage {
        StorageBackend::Memory => Arc::new(MemoryStorage::new()),
        StorageBackend::File(path) => Arc::new(FileStorage::open(path.clone())?),
    };
    let identity: Arc<dyn IdentityAdapter> = match &config.identity {
        IdentityBackend::Demo => Arc::new(DemoAdapter::new(resolver.clone())),
        IdentityBackend::Remote(base_url) => Arc::new(RemoteAdapter::new(base_url.clone())?),
    };
    let latency: Arc<dyn Latency> = match (config.latency_ms, config.latency_jitter_ms) {
        (0, 0) => Arc::new(NoDelay),
        (_, 0) => Arc::new(FixedDelay(config.latency())),
        _ => Arc::new(JitterDelay {
            base: config.latency(),
            jitter: config.latency_jitter(),
        }),
    };

    tracing::debug!(
        storage = %config.storage,
        identity = identity.name(),
        debug_hooks = config.debug_hooks,
        "application state built"
    );
    Ok(AppState::new(
        storage,
        identity,
        resolver,
        latency,
        config.debug_hooks,
    ))
}

pub fn build_router(state: AppState) -> Router {
    let mut app = Router::new()
        .route("/", get(root_handler))
        .nest("/auth", auth_router())
        .nest("/api", api::api_router(state.clone()));
    if state.debug.is_some() {
        app = app.nest("/debug", debug_router());
    }
    app.layer(axum::middleware::from_fn(middleware::log_requests))
        .with_state(state)
}

async fn root_handler() -> &'static str {
    "Welcome to EDA!"
}
