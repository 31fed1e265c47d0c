use std::sync::Arc;

use crate::session::{MemoryStorage, SessionStorage, DEFAULT_SESSION_KEY};

/// Configuration for a [`RestbaseClient`](crate::RestbaseClient).
#[derive(Debug, Clone)]
pub struct RestbaseConfig {
    /// Base URL of the backend (e.g. "https://api.example.com").
    pub url: String,
    /// API key, sent as the `apikey` header on every request.
    pub api_key: String,
    /// Persistence backend for the session blob.
    pub storage: Arc<dyn SessionStorage>,
    /// Storage key the session blob lives under.
    pub session_key: String,
}

impl RestbaseConfig {
    /// Create a config with the default in-memory session storage.
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            storage: Arc::new(MemoryStorage::new()),
            session_key: DEFAULT_SESSION_KEY.to_string(),
        }
    }

    /// Swap the session persistence backend.
    pub fn storage(mut self, storage: Arc<dyn SessionStorage>) -> Self {
        self.storage = storage;
        self
    }

    /// Override the storage key for the persisted session.
    pub fn session_key(mut self, key: impl Into<String>) -> Self {
        self.session_key = key.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = RestbaseConfig::new("https://api.example.com", "key");
        assert_eq!(config.url, "https://api.example.com");
        assert_eq!(config.api_key, "key");
        assert_eq!(config.session_key, DEFAULT_SESSION_KEY);
    }

    #[test]
    fn session_key_override() {
        let config = RestbaseConfig::new("https://api.example.com", "key")
            .session_key("myapp.session");
        assert_eq!(config.session_key, "myapp.session");
    }
}
