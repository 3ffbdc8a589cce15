//! Persisted session snapshot layout.
//!
//! Two keys make up a snapshot: the raw bearer token and a JSON blob of the
//! session state. They are written and removed together; finding only one of
//! them is treated as corruption.

use super::{KeyValueStorage, StorageError};
use eda_adapters::{PermissionSet, RoleDescriptor, SessionUser};
use serde::{Deserialize, Serialize};

pub const TOKEN_KEY: &str = "auth_token";
pub const STATE_KEY: &str = "auth-storage";
pub const SNAPSHOT_VERSION: u32 = 0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    pub is_authenticated: bool,
    pub user: Option<SessionUser>,
    pub role: Option<RoleDescriptor>,
    pub token: Option<String>,
    #[serde(default)]
    pub permissions: PermissionSet,
}

/// `{ "state": { .. }, "version": n }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSnapshot {
    pub state: PersistedState,
    pub version: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotRead {
    Absent,
    Present {
        token: String,
        user: SessionUser,
        snapshot: PersistedSnapshot,
    },
    Corrupt(String),
}

/// Reads and sanity-checks the snapshot. Never fails; problems come back as
/// [`SnapshotRead::Corrupt`].
pub fn read(storage: &dyn KeyValueStorage) -> SnapshotRead {
    let token = match storage.get(TOKEN_KEY) {
        Ok(token) => token,
        Err(err) => return SnapshotRead::Corrupt(format!("reading {TOKEN_KEY}: {err}")),
    };
    let blob = match storage.get(STATE_KEY) {
        Ok(blob) => blob,
        Err(err) => return SnapshotRead::Corrupt(format!("reading {STATE_KEY}: {err}")),
    };

    let (token, blob) = match (token, blob) {
        (None, None) => return SnapshotRead::Absent,
        (Some(token), Some(blob)) => (token, blob),
        (Some(_), None) => return SnapshotRead::Corrupt(format!("{STATE_KEY} missing")),
        (None, Some(_)) => return SnapshotRead::Corrupt(format!("{TOKEN_KEY} missing")),
    };

    let snapshot: PersistedSnapshot = match serde_json::from_str(&blob) {
        Ok(snapshot) => snapshot,
        Err(err) => return SnapshotRead::Corrupt(format!("unparsable state blob: {err}")),
    };
    if snapshot.version != SNAPSHOT_VERSION {
        return SnapshotRead::Corrupt(format!("unsupported version {}", snapshot.version));
    }
    if !snapshot.state.is_authenticated {
        return SnapshotRead::Corrupt("token stored for an unauthenticated state".to_string());
    }
    if snapshot.state.token.as_deref() != Some(token.as_str()) {
        return SnapshotRead::Corrupt("token key and state blob disagree".to_string());
    }
    let Some(user) = snapshot.state.user.clone() else {
        return SnapshotRead::Corrupt("state blob has no user".to_string());
    };

    SnapshotRead::Present {
        token,
        user,
        snapshot,
    }
}

pub fn write(
    storage: &dyn KeyValueStorage,
    token: &str,
    state: PersistedState,
) -> Result<(), StorageError> {
    let blob = serde_json::to_string(&PersistedSnapshot {
        state,
        version: SNAPSHOT_VERSION,
    })?;
    storage.set(TOKEN_KEY, token)?;
    storage.set(STATE_KEY, &blob)
}

/// Removes both keys. Both removals are attempted even if the first fails.
pub fn remove(storage: &dyn KeyValueStorage) -> Result<(), StorageError> {
    let token = storage.remove(TOKEN_KEY);
    let state = storage.remove(STATE_KEY);
    token.and(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use eda_adapters::{CredentialResolver, FixtureDirectory};
    use std::sync::Arc;

    fn persisted(role: &str) -> (String, PersistedState) {
        let payload = CredentialResolver::new(Arc::new(FixtureDirectory::demo()))
            .resolve(role)
            .unwrap()
            .payload;
        let state = PersistedState {
            is_authenticated: true,
            user: Some(payload.user),
            role: Some(payload.role),
            token: Some(payload.token.clone()),
            permissions: payload.permissions,
        };
        (payload.token, state)
    }

    #[test]
    fn written_snapshot_reads_back() {
        let storage = MemoryStorage::new();
        let (token, state) = persisted("padre");
        write(&storage, &token, state.clone()).unwrap();

        match read(&storage) {
            SnapshotRead::Present {
                token: read_token,
                snapshot,
                ..
            } => {
                assert_eq!(read_token, token);
                assert_eq!(snapshot.state, state);
            }
            other => panic!("expected snapshot, got {other:?}"),
        }
    }

    #[test]
    fn empty_storage_is_absent() {
        assert_eq!(read(&MemoryStorage::new()), SnapshotRead::Absent);
    }

    #[test]
    fn lone_key_is_corrupt() {
        let storage = MemoryStorage::new();
        storage.set(TOKEN_KEY, "demo-token-1").unwrap();
        assert!(matches!(read(&storage), SnapshotRead::Corrupt(_)));

        let storage = MemoryStorage::new();
        let (token, state) = persisted("docente");
        write(&storage, &token, state).unwrap();
        storage.remove(TOKEN_KEY).unwrap();
        assert!(matches!(read(&storage), SnapshotRead::Corrupt(_)));
    }

    #[test]
    fn mismatched_token_is_corrupt() {
        let storage = MemoryStorage::new();
        let (_, state) = persisted("docente");
        write(&storage, "demo-token-1", state).unwrap();
        assert!(matches!(read(&storage), SnapshotRead::Corrupt(_)));
    }

    #[test]
    fn garbage_blob_is_corrupt() {
        let storage = MemoryStorage::new();
        storage.set(TOKEN_KEY, "demo-token-1").unwrap();
        storage.set(STATE_KEY, "{\"state\":").unwrap();
        assert!(matches!(read(&storage), SnapshotRead::Corrupt(_)));
    }

    #[test]
    fn remove_clears_both_keys() {
        let storage = MemoryStorage::new();
        let (token, state) = persisted("especialista");
        write(&storage, &token, state).unwrap();
        remove(&storage).unwrap();
        assert!(storage.is_empty().unwrap());
    }
}
