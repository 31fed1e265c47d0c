use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use restbase_core::{Session, User};

/// Wire payload of the password token grant (and of sign-up when the backend
/// answers with a ready session).
#[derive(Debug, Clone, Deserialize)]
pub struct TokenPayload {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: User,
}

impl TokenPayload {
    /// Fold the payload into a session, deriving an absolute expiry from
    /// `expires_in` when the server sent only the relative form.
    pub fn into_session(self, now: i64) -> Session {
        let expires_at = self
            .expires_at
            .unwrap_or_else(|| now + self.expires_in.unwrap_or(3600));
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user,
        }
    }
}

/// Successful password sign-in: the signed-in user and the session that now
/// backs the client.
#[derive(Debug, Clone, PartialEq)]
pub struct SignInData {
    pub user: User,
    pub session: Session,
}

/// Payload of [`AuthClient::get_session`](crate::AuthClient::get_session).
///
/// `session: None` means the caller is not authenticated; it is a normal
/// outcome, not an error.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionData {
    pub session: Option<Session>,
}

/// Options accepted by sign-up.
#[derive(Debug, Clone, Default)]
pub struct SignUpOptions {
    /// Arbitrary metadata stored on the new user.
    pub data: Option<JsonValue>,
}

impl SignUpOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(mut self, data: JsonValue) -> Self {
        self.data = Some(data);
        self
    }
}

/// Options accepted by password recovery.
#[derive(Debug, Clone, Default)]
pub struct ResetPasswordOptions {
    /// Where the recovery link sends the user afterwards.
    pub redirect_to: Option<String>,
}

impl ResetPasswordOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn redirect_to(mut self, url: impl Into<String>) -> Self {
        self.redirect_to = Some(url.into());
        self
    }
}

/// Attributes accepted by
/// [`AuthClient::update_user`](crate::AuthClient::update_user).
#[derive(Debug, Default, Clone, Serialize)]
pub struct UpdateUserParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonValue>,
}

impl UpdateUserParams {
    /// Shorthand for a password change, the common case.
    pub fn password(password: impl Into<String>) -> Self {
        Self {
            password: Some(password.into()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_payload_prefers_absolute_expiry() {
        let payload: TokenPayload = serde_json::from_str(
            r#"{"access_token":"t","refresh_token":"r","expires_in":3600,"expires_at":1900000000,
                "user":{"id":"u1","email":"a@b.co"}}"#,
        )
        .unwrap();
        let session = payload.into_session(1_000);
        assert_eq!(session.expires_at, 1_900_000_000);
        assert_eq!(session.refresh_token.as_deref(), Some("r"));
    }

    #[test]
    fn token_payload_derives_expiry_from_relative_form() {
        let payload: TokenPayload = serde_json::from_str(
            r#"{"access_token":"t","expires_in":120,"user":{"id":"u1","email":"a@b.co"}}"#,
        )
        .unwrap();
        let session = payload.into_session(1_000);
        assert_eq!(session.expires_at, 1_120);
        assert_eq!(session.refresh_token, None);
    }

    #[test]
    fn update_user_params_serialize_sparse() {
        let body = serde_json::to_value(UpdateUserParams::password("hunter2")).unwrap();
        assert_eq!(body, serde_json::json!({"password": "hunter2"}));
    }
}
