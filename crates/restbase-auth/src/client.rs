use chrono::Utc;
use serde_json::{json, Value as JsonValue};

use restbase_core::http::{ack_envelope, json_envelope, read_response};
use restbase_core::{Ack, ApiError, ApiResponse, RestbaseClient, Session, User};

use crate::types::{
    ResetPasswordOptions, SessionData, SignInData, SignUpOptions, TokenPayload, UpdateUserParams,
};

/// Auth surface of a [`RestbaseClient`].
///
/// Every method returns an envelope and never `Err`; the session store is
/// the side channel through which outcomes become visible to the data and
/// storage surfaces.
#[derive(Debug, Clone)]
pub struct AuthClient {
    client: RestbaseClient,
}

impl AuthClient {
    pub(crate) fn new(client: RestbaseClient) -> Self {
        Self { client }
    }

    /// Create an account.
    ///
    /// When the backend answers with a ready session (confirmations
    /// disabled), it is persisted before returning; otherwise only the new
    /// user snapshot comes back and the caller confirms out of band.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        options: SignUpOptions,
    ) -> ApiResponse<User> {
        let mut body = json!({ "email": email, "password": password });
        if let Some(data) = options.data {
            body["data"] = data;
        }

        let result = self
            .client
            .http()
            .post(self.client.endpoint("/auth/v1/signup"))
            .headers(self.client.headers(false))
            .json(&body)
            .send()
            .await;

        let (status, text) = match read_response(result).await {
            Ok(parts) => parts,
            Err(error) => return ApiResponse::error(error),
        };
        if !(200..300).contains(&status) {
            return ApiResponse::error(ApiError::from_response(status, &text));
        }

        // The signup endpoint answers with either a full token payload or a
        // bare user object, depending on whether confirmation is required.
        let value: JsonValue = match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(e) => {
                return ApiResponse::error(ApiError::transport(format!(
                    "failed to parse response body: {e}"
                )))
            }
        };
        if value.get("access_token").is_some() {
            match serde_json::from_value::<TokenPayload>(value) {
                Ok(payload) => {
                    let session = payload.into_session(Utc::now().timestamp());
                    self.client.sessions().save(&session);
                    ApiResponse::ok(session.user)
                }
                Err(e) => ApiResponse::error(ApiError::transport(format!(
                    "failed to parse session payload: {e}"
                ))),
            }
        } else {
            match serde_json::from_value::<User>(value) {
                Ok(user) => ApiResponse::ok(user),
                Err(e) => ApiResponse::error(ApiError::transport(format!(
                    "failed to parse user payload: {e}"
                ))),
            }
        }
    }

    /// Exchange email/password credentials for a session.
    ///
    /// A successful exchange unconditionally overwrites any previously
    /// persisted session.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> ApiResponse<SignInData> {
        let body = json!({ "email": email, "password": password });

        let result = self
            .client
            .http()
            .post(self.client.endpoint("/auth/v1/token?grant_type=password"))
            .headers(self.client.headers(false))
            .json(&body)
            .send()
            .await;

        let payload: ApiResponse<TokenPayload> = json_envelope(result).await;
        if let Some(error) = payload.error {
            return ApiResponse::error(error);
        }
        let Some(payload) = payload.data else {
            return ApiResponse::error(ApiError::transport("empty token response"));
        };

        let session = payload.into_session(Utc::now().timestamp());
        self.client.sessions().save(&session);
        ApiResponse::ok(SignInData {
            user: session.user.clone(),
            session,
        })
    }

    /// Revoke the current session and clear local state.
    ///
    /// The revoke call is best-effort: local state is cleared even when the
    /// network call fails, so the caller can never remain locally
    /// authenticated past this point. The revoke failure, if any, is
    /// reported in the returned [`Ack`].
    pub async fn sign_out(&self) -> Ack {
        let ack = match self.client.sessions().access_token() {
            Some(_) => {
                let result = self
                    .client
                    .http()
                    .post(self.client.endpoint("/auth/v1/logout"))
                    .headers(self.client.headers(true))
                    .send()
                    .await;
                ack_envelope(result).await
            }
            None => Ack::ok(),
        };
        self.client.sessions().clear();
        ack
    }

    /// The current session, revalidated against the backend.
    ///
    /// Without a locally stored token this answers `session: None` and makes
    /// no network call. A rejected token (revoked or expired server-side)
    /// clears local state and also answers `session: None`; that is state
    /// correction, not an error. On acceptance the fresh user snapshot is
    /// merged into the stored token fields.
    pub async fn get_session(&self) -> ApiResponse<SessionData> {
        let Some(stored) = self.client.sessions().load() else {
            return ApiResponse::ok(SessionData { session: None });
        };

        let result = self
            .client
            .http()
            .get(self.client.endpoint("/auth/v1/user"))
            .headers(self.client.headers(true))
            .send()
            .await;

        let (status, text) = match read_response(result).await {
            Ok(parts) => parts,
            Err(error) => return ApiResponse::error(error),
        };
        if !(200..300).contains(&status) {
            tracing::warn!(status, "token rejected, clearing local session");
            self.client.sessions().clear();
            return ApiResponse::ok(SessionData { session: None });
        }

        // The stored expiry may have passed while the request was in flight.
        if stored.is_expired() {
            self.client.sessions().clear();
            return ApiResponse::ok(SessionData { session: None });
        }

        match serde_json::from_str::<User>(&text) {
            Ok(user) => ApiResponse::ok(SessionData {
                session: Some(Session { user, ..stored }),
            }),
            Err(e) => ApiResponse::error(ApiError::transport(format!(
                "failed to parse user payload: {e}"
            ))),
        }
    }

    /// Send a password recovery email.
    pub async fn reset_password_for_email(
        &self,
        email: &str,
        options: ResetPasswordOptions,
    ) -> Ack {
        let mut body = json!({ "email": email });
        if let Some(redirect) = options.redirect_to {
            body["redirect_to"] = json!(redirect);
        }

        let result = self
            .client
            .http()
            .post(self.client.endpoint("/auth/v1/recover"))
            .headers(self.client.headers(false))
            .json(&body)
            .send()
            .await;
        ack_envelope(result).await
    }

    /// Update the authenticated user's attributes (password, email,
    /// metadata).
    pub async fn update_user(&self, params: UpdateUserParams) -> ApiResponse<User> {
        let result = self
            .client
            .http()
            .put(self.client.endpoint("/auth/v1/user"))
            .headers(self.client.headers(true))
            .json(&params)
            .send()
            .await;
        json_envelope(result).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RestbaseClientAuthExt;
    use restbase_core::RestbaseConfig;
    use serde_json::Map;

    /// Client pointed at a port nothing listens on: every network call fails
    /// fast with a transport error.
    fn unreachable_client() -> RestbaseClient {
        RestbaseClient::new(RestbaseConfig::new("http://127.0.0.1:9", "test-key")).unwrap()
    }

    fn live_session() -> Session {
        Session {
            access_token: "token-abc".into(),
            refresh_token: None,
            expires_at: Utc::now().timestamp() + 3600,
            user: User {
                id: "u1".into(),
                email: "ops@example.com".into(),
                metadata: Map::new(),
            },
        }
    }

    #[tokio::test]
    async fn get_session_without_token_skips_the_network() {
        // The endpoint is unreachable, so a network attempt would surface as
        // a transport error; a clean `session: None` proves no call happened.
        let auth = unreachable_client().auth();
        let resp = auth.get_session().await;
        assert!(resp.is_ok());
        assert_eq!(resp.data.unwrap().session, None);
    }

    #[tokio::test]
    async fn sign_out_clears_session_even_when_revoke_fails() {
        let client = unreachable_client();
        client.sessions().save(&live_session());

        let ack = client.auth().sign_out().await;
        assert!(ack.error.is_some(), "revoke against a dead port must fail");
        assert_eq!(client.sessions().load(), None);

        let resp = client.auth().get_session().await;
        assert_eq!(resp.data.unwrap().session, None);
    }

    #[tokio::test]
    async fn sign_out_without_session_is_a_local_no_op() {
        let auth = unreachable_client().auth();
        let ack = auth.sign_out().await;
        assert!(ack.is_ok());
    }

    #[tokio::test]
    async fn sign_in_transport_failure_maps_to_envelope() {
        let auth = unreachable_client().auth();
        let resp = auth.sign_in_with_password("a@b.co", "pw").await;
        assert!(resp.is_err());
        assert_eq!(resp.data, None);
        let error = resp.error.unwrap();
        assert_eq!(error.status, None);
        assert!(!error.message.is_empty());
    }

    #[tokio::test]
    async fn expired_stored_session_reads_as_signed_out() {
        let client = unreachable_client();
        let mut stale = live_session();
        stale.expires_at = Utc::now().timestamp() - 10;
        client.sessions().save(&stale);

        let resp = client.auth().get_session().await;
        assert!(resp.is_ok());
        assert_eq!(resp.data.unwrap().session, None);
        // Eviction happened as a side effect of the load.
        assert_eq!(client.sessions().load(), None);
    }
}
