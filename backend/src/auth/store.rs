//! The session store.
//!
//! Owns the current [`SessionState`] and is the only writer of the persisted
//! snapshot. `initialize`, `login` and `clear_all` take a ticket from a
//! monotonic generation counter; an `initialize` that finishes after a newer
//! one of those started drops its result, so the outcome follows call order
//! rather than completion order.

use crate::auth::models::SessionState;
use crate::storage::snapshot::{self, SnapshotRead};
use crate::storage::{KeyValueStorage, StorageError};
use eda_adapters::{IdentityAdapter, SessionPayload, Validation};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
struct Inner {
    state: SessionState,
    generation: u64,
}

impl Inner {
    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }
}

pub struct SessionStore {
    storage: Arc<dyn KeyValueStorage>,
    identity: Arc<dyn IdentityAdapter>,
    inner: Mutex<Inner>,
}

impl SessionStore {
    /// Creates a store in the empty initial state. Nothing is read from
    /// storage until [`initialize`](Self::initialize).
    pub fn new(storage: Arc<dyn KeyValueStorage>, identity: Arc<dyn IdentityAdapter>) -> Self {
        Self {
            storage,
            identity,
            inner: Mutex::new(Inner::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current state.
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.lock().state.clone()
    }

    #[must_use]
    pub fn identity(&self) -> &Arc<dyn IdentityAdapter> {
        &self.identity
    }

    /// Rehydrates from the persisted snapshot.
    ///
    /// Absent, corrupt or mismatched snapshots and tokens that fail
    /// validation all end in the anonymous state with storage cleared. A
    /// valid token ends authenticated with the freshly validated identity,
    /// and the snapshot is rewritten to match. The stored
    /// `must_change_password` flag is kept over the validator's.
    pub async fn initialize(&self) -> SessionState {
        let (ticket, read) = {
            let mut inner = self.lock();
            let ticket = inner.next_generation();
            inner.state.loading = true;
            (ticket, snapshot::read(self.storage.as_ref()))
        };

        let restored = match read {
            SnapshotRead::Absent => {
                debug!("no persisted session");
                None
            }
            SnapshotRead::Corrupt(reason) => {
                warn!(%reason, "persisted session is corrupt, starting anonymous");
                None
            }
            SnapshotRead::Present { token, user, .. } => {
                match self.identity.validate(Some(&token)).await {
                    Validation::Valid {
                        user: mut validated,
                        role,
                        permissions,
                    } if validated.id == user.id => {
                        validated.must_change_password = user.must_change_password;
                        Some(SessionState {
                            is_authenticated: true,
                            user: Some(validated),
                            role: Some(role),
                            token: Some(token),
                            permissions,
                            loading: false,
                        })
                    }
                    Validation::Valid { user: validated, .. } => {
                        warn!(
                            stored = user.id,
                            validated = validated.id,
                            "persisted user does not match token"
                        );
                        None
                    }
                    Validation::Invalid => {
                        warn!(adapter = self.identity.name(), "persisted token rejected");
                        None
                    }
                }
            }
        };

        let mut inner = self.lock();
        if inner.generation != ticket {
            debug!(ticket, current = inner.generation, "initialize superseded");
            return inner.state.clone();
        }

        inner.state = match restored {
            Some(state) => match self.persist(&state) {
                Ok(()) => {
                    info!(user = ?state.user.as_ref().map(|u| u.id), "session restored");
                    state
                }
                Err(err) => {
                    warn!(error = %err, "could not rewrite snapshot, starting anonymous");
                    self.discard_snapshot();
                    SessionState::default()
                }
            },
            None => {
                self.discard_snapshot();
                SessionState::default()
            }
        };
        inner.state.clone()
    }

    /// Replaces the session with the payload and persists it. Nothing from
    /// the previous state is kept.
    pub fn login(&self, payload: SessionPayload) -> Result<SessionState, StorageError> {
        let mut inner = self.lock();
        inner.next_generation();

        let state = SessionState::from_payload(payload);
        self.persist(&state)?;
        inner.state = state;
        info!(
            user = ?inner.state.user.as_ref().map(|u| u.id),
            role = ?inner.state.role_name(),
            "session started"
        );
        Ok(inner.state.clone())
    }

    /// Resets to the empty state and deletes the snapshot.
    pub fn clear_all(&self) -> Result<(), StorageError> {
        let mut inner = self.lock();
        inner.next_generation();
        inner.state = SessionState::default();
        info!("session cleared");
        snapshot::remove(self.storage.as_ref())
    }

    /// Applies `update` to the current state and persists the result.
    ///
    /// Does not supersede a running `initialize`. While one is in flight the
    /// snapshot is left untouched and the rehydrated state replaces the
    /// update when it lands.
    pub fn set_partial<F>(&self, update: F) -> Result<SessionState, StorageError>
    where
        F: FnOnce(&mut SessionState),
    {
        let mut inner = self.lock();

        let mut next = inner.state.clone();
        update(&mut next);
        next.loading = inner.state.loading;
        if inner.state.loading {
            debug!("initialize in flight, partial update not persisted");
        } else if next.is_authenticated {
            self.persist(&next)?;
        } else {
            snapshot::remove(self.storage.as_ref())?;
        }
        inner.state = next;
        Ok(inner.state.clone())
    }

    fn persist(&self, state: &SessionState) -> Result<(), StorageError> {
        match state.token.as_deref() {
            Some(token) => snapshot::write(self.storage.as_ref(), token, state.persisted()),
            None => snapshot::remove(self.storage.as_ref()),
        }
    }

    fn discard_snapshot(&self) {
        if let Err(err) = snapshot::remove(self.storage.as_ref()) {
            warn!(error = %err, "could not clear persisted session");
        }
    }
}
