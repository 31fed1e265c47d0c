use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Storage key the session blob is persisted under by default.
pub const DEFAULT_SESSION_KEY: &str = "restbase.auth.token";

/// A user snapshot as returned by the auth backend.
///
/// Immutable from the client's point of view; a fresh snapshot replaces the
/// old one wholesale whenever the backend is consulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: String,
    /// Arbitrary per-user metadata. The backend serves this field as
    /// `user_metadata`.
    #[serde(default, alias = "user_metadata")]
    pub metadata: Map<String, JsonValue>,
}

/// An authenticated session: token material plus the user it belongs to.
///
/// Matches the persisted blob shape
/// `{access_token, refresh_token?, expires_at, user}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Expiry as epoch seconds. At or before "now" the session is dead.
    pub expires_at: i64,
    pub user: User,
}

impl Session {
    /// Whether `expires_at` has passed relative to `now` (epoch seconds).
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at <= now
    }

    /// Whether the session has expired as of the current wall clock.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp())
    }
}

/// Minimal key-value persistence seam for the session blob.
///
/// Implementations decide where the blob lives (memory, disk, a platform
/// keystore); the client only ever touches a single key through `get`,
/// `set`, and `remove`.
pub trait SessionStorage: fmt::Debug + Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Process-local session storage, the default backend.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.write().unwrap().remove(key);
    }
}

/// Durable, opaque persistence of the current session.
///
/// Owns the single persisted key and is the one source of truth for "is the
/// caller authenticated". Expired or malformed blobs are discarded at load
/// time, so no partially-expired state ever reaches callers.
#[derive(Debug, Clone)]
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    key: String,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn SessionStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Load the current session.
    ///
    /// Returns `None` when the blob is absent, malformed, or expired; the
    /// latter two also remove the persisted copy.
    pub fn load(&self) -> Option<Session> {
        let blob = self.storage.get(&self.key)?;
        let session: Session = match serde_json::from_str(&blob) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("discarding malformed session blob: {e}");
                self.storage.remove(&self.key);
                return None;
            }
        };
        if session.is_expired() {
            tracing::warn!(expires_at = session.expires_at, "discarding expired session");
            self.storage.remove(&self.key);
            return None;
        }
        Some(session)
    }

    /// Overwrite the persisted session wholesale. There is no merge.
    pub fn save(&self, session: &Session) {
        match serde_json::to_string(session) {
            Ok(blob) => self.storage.set(&self.key, &blob),
            Err(e) => tracing::warn!("failed to serialize session: {e}"),
        }
    }

    /// Remove the persisted session.
    pub fn clear(&self) {
        self.storage.remove(&self.key);
    }

    /// Access token of the current non-expired session, if any.
    pub fn access_token(&self) -> Option<String> {
        self.load().map(|session| session.access_token)
    }
}
