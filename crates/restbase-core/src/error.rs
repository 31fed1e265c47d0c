use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Errors that can occur while constructing or configuring a client.
///
/// Per-operation failures never surface here: once a client exists, every
/// call reports its outcome through the envelope types in
/// [`response`](crate::response) with an [`ApiError`] on the error side.
#[derive(Debug, thiserror::Error)]
pub enum RestbaseError {
    /// Invalid configuration (unusable URL or key).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// URL parsing error.
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// HTTP client construction error.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// The error half of the result envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable message: the server's own wording for server-reported
    /// errors, or a description of the transport/parse failure otherwise.
    pub message: String,
    /// HTTP status, when the server answered at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Machine-readable error code, when the server provided one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ApiError {
    /// A transport or parse failure; no HTTP status exists.
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            code: None,
        }
    }

    /// A server-reported error. The body is parsed leniently and the
    /// server's wording is passed through; an unparseable body is passed
    /// through verbatim.
    pub fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(parsed) => Self {
                message: parsed.message(),
                status: Some(status),
                code: parsed.code(),
            },
            Err(_) => Self {
                message: if body.is_empty() {
                    format!("HTTP {status}")
                } else {
                    body.to_string()
                },
                status: Some(status),
                code: None,
            },
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "HTTP {status}: {}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ApiError {}

/// Error body shapes served by the auth, data, and storage APIs.
///
/// The backends disagree on field names; this accepts all of them and picks
/// the most informative message.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// String for the data API, numeric for the auth API.
    #[serde(default)]
    pub code: Option<JsonValue>,
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

impl ApiErrorBody {
    /// Extract the most informative message from the body.
    pub fn message(&self) -> String {
        self.msg
            .as_deref()
            .or(self.message.as_deref())
            .or(self.error_description.as_deref())
            .or(self.error.as_deref())
            .unwrap_or("Unknown error")
            .to_string()
    }

    /// Extract a machine-readable code, if one was sent in any shape.
    pub fn code(&self) -> Option<String> {
        if let Some(code) = &self.error_code {
            return Some(code.clone());
        }
        match self.code.as_ref()? {
            JsonValue::String(s) => Some(s.clone()),
            JsonValue::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_error_has_no_status() {
        let err = ApiError::transport("connection refused");
        assert_eq!(err.message, "connection refused");
        assert_eq!(err.status, None);
        assert_eq!(err.to_string(), "connection refused");
    }

    #[test]
    fn data_api_error_body() {
        let err = ApiError::from_response(
            400,
            r#"{"message":"invalid input syntax","code":"22P02","details":null,"hint":null}"#,
        );
        assert_eq!(err.message, "invalid input syntax");
        assert_eq!(err.status, Some(400));
        assert_eq!(err.code.as_deref(), Some("22P02"));
        assert_eq!(err.to_string(), "HTTP 400: invalid input syntax");
    }

    #[test]
    fn auth_api_error_body() {
        let err = ApiError::from_response(
            400,
            r#"{"code":400,"error_code":"invalid_credentials","msg":"Invalid login credentials"}"#,
        );
        assert_eq!(err.message, "Invalid login credentials");
        assert_eq!(err.code.as_deref(), Some("invalid_credentials"));
    }

    #[test]
    fn oauth_style_error_body() {
        let err =
            ApiError::from_response(401, r#"{"error":"invalid_grant","error_description":"Bad"}"#);
        assert_eq!(err.message, "Bad");
    }

    #[test]
    fn message_precedence() {
        let body: ApiErrorBody = serde_json::from_str(
            r#"{"error":"e","error_description":"d","message":"m","msg":"top"}"#,
        )
        .unwrap();
        assert_eq!(body.message(), "top");
    }

    #[test]
    fn unparseable_body_passes_through_verbatim() {
        let err = ApiError::from_response(502, "<html>Bad Gateway</html>");
        assert_eq!(err.message, "<html>Bad Gateway</html>");
        assert_eq!(err.status, Some(502));
        assert_eq!(err.code, None);
    }

    #[test]
    fn empty_body_falls_back_to_status() {
        let err = ApiError::from_response(500, "");
        assert_eq!(err.message, "HTTP 500");
    }

    #[test]
    fn numeric_code_is_stringified() {
        let body: ApiErrorBody = serde_json::from_str(r#"{"code":429,"msg":"slow down"}"#).unwrap();
        assert_eq!(body.code().as_deref(), Some("429"));
    }
}
