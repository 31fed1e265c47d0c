use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use url::Url;

use crate::config::RestbaseConfig;
use crate::error::RestbaseError;
use crate::session::SessionStore;

/// Client for a PostgREST-compatible hosted backend.
///
/// Holds the validated base URL, the API key, a shared HTTP client, and the
/// session store. Cheap to clone: clones share the connection pool and the
/// persisted session, so a sign-in through one clone is visible to all.
#[derive(Debug, Clone)]
pub struct RestbaseClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
    sessions: SessionStore,
}

impl RestbaseClient {
    /// Create a client from a configuration.
    ///
    /// This is the only place the public surface can fail with an `Err`:
    /// after construction every operation reports through envelopes.
    pub fn new(config: RestbaseConfig) -> Result<Self, RestbaseError> {
        let base_url = Url::parse(config.url.trim_end_matches('/'))?;
        HeaderValue::from_str(&config.api_key).map_err(|e| {
            RestbaseError::InvalidConfig(format!("API key not usable as a header: {e}"))
        })?;

        let http = reqwest::Client::builder().build()?;
        let sessions = SessionStore::new(config.storage, config.session_key);

        Ok(Self {
            http,
            base_url,
            api_key: config.api_key,
            sessions,
        })
    }

    /// Base URL of the backend.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// API key sent with every request.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The session store shared by all clones of this client.
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Underlying HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Absolute URL for a path under the base URL.
    ///
    /// `path` may carry its own query string
    /// (e.g. `"/auth/v1/token?grant_type=password"`).
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    /// Assemble request headers.
    ///
    /// `Content-Type: application/json` and `apikey` are always present.
    /// The bearer `Authorization` header is attached only when
    /// `include_auth` is true and a non-expired token is available from the
    /// session store; loading the token applies the store's expiry eviction.
    pub fn headers(&self, include_auth: bool) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Ok(key) = HeaderValue::from_str(&self.api_key) {
            headers.insert("apikey", key);
        }
        if include_auth {
            if let Some(token) = self.sessions.access_token() {
                if let Ok(bearer) = HeaderValue::from_str(&format!("Bearer {token}")) {
                    headers.insert(AUTHORIZATION, bearer);
                }
            }
        }
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Session, User};
    use chrono::Utc;
    use serde_json::Map;

    fn client() -> RestbaseClient {
        RestbaseClient::new(RestbaseConfig::new("https://api.example.com", "anon-key")).unwrap()
    }

    fn session(expires_at: i64) -> Session {
        Session {
            access_token: "token-abc".into(),
            refresh_token: None,
            expires_at,
            user: User {
                id: "u1".into(),
                email: "ops@example.com".into(),
                metadata: Map::new(),
            },
        }
    }

    #[test]
    fn new_rejects_unparseable_url() {
        assert!(RestbaseClient::new(RestbaseConfig::new("not a url", "key")).is_err());
    }

    #[test]
    fn new_rejects_header_unsafe_key() {
        assert!(RestbaseClient::new(RestbaseConfig::new("https://api.example.com", "a\nb")).is_err());
    }

    #[test]
    fn endpoint_building() {
        let client = client();
        assert_eq!(
            client.endpoint("/rest/v1/employees"),
            "https://api.example.com/rest/v1/employees"
        );
        assert_eq!(
            client.endpoint("/auth/v1/token?grant_type=password"),
            "https://api.example.com/auth/v1/token?grant_type=password"
        );
    }

    #[test]
    fn endpoint_building_trailing_slash() {
        let client =
            RestbaseClient::new(RestbaseConfig::new("https://api.example.com/", "key")).unwrap();
        assert_eq!(
            client.endpoint("/auth/v1/signup"),
            "https://api.example.com/auth/v1/signup"
        );
    }

    #[test]
    fn headers_always_carry_apikey_and_content_type() {
        let headers = client().headers(false);
        assert_eq!(headers.get("apikey").unwrap(), "anon-key");
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert!(headers.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn auth_header_requires_live_session() {
        let client = client();

        // No session at all.
        assert!(client.headers(true).get(AUTHORIZATION).is_none());

        // Live session.
        client.sessions().save(&session(Utc::now().timestamp() + 3600));
        assert_eq!(
            client.headers(true).get(AUTHORIZATION).unwrap(),
            "Bearer token-abc"
        );

        // include_auth = false wins even with a live session.
        assert!(client.headers(false).get(AUTHORIZATION).is_none());
    }

    #[test]
    fn expired_session_yields_no_auth_header_and_is_evicted() {
        let client = client();
        client.sessions().save(&session(Utc::now().timestamp() - 10));
        assert!(client.headers(true).get(AUTHORIZATION).is_none());
        // The load above evicted the stale blob.
        assert_eq!(client.sessions().load(), None);
    }

    #[test]
    fn clones_share_the_session_store() {
        let client = client();
        let clone = client.clone();
        client.sessions().save(&session(Utc::now().timestamp() + 3600));
        assert_eq!(clone.sessions().access_token(), Some("token-abc".into()));
        clone.sessions().clear();
        assert_eq!(client.sessions().access_token(), None);
    }
}
