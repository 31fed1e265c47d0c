//! Response normalization shared by the auth, query, and storage surfaces.
//!
//! Every helper here collapses a raw HTTP outcome into an envelope:
//! transport failures and unparseable bodies become
//! `ApiError { message, .. }` with no status, non-2xx responses pass the
//! server's body through, and 2xx bodies are decoded into the caller's type.

use reqwest::Response;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::response::{Ack, ApiResponse};

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Collapse a send outcome into `(status, body)` or a transport error.
pub async fn read_response(
    result: Result<Response, reqwest::Error>,
) -> Result<(u16, String), ApiError> {
    let response = result.map_err(|e| ApiError::transport(e.to_string()))?;
    let status = response.status().as_u16();
    tracing::debug!(status, "response received");
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::transport(e.to_string()))?;
    Ok((status, body))
}

/// Normalize a JSON response into a data envelope.
pub async fn json_envelope<T: DeserializeOwned>(
    result: Result<Response, reqwest::Error>,
) -> ApiResponse<T> {
    let (status, body) = match read_response(result).await {
        Ok(parts) => parts,
        Err(error) => return ApiResponse::error(error),
    };
    if !is_success(status) {
        return ApiResponse::error(ApiError::from_response(status, &body));
    }
    if body.is_empty() {
        return ApiResponse::empty();
    }
    match serde_json::from_str::<T>(&body) {
        Ok(data) => ApiResponse::ok(data),
        Err(e) => ApiResponse::error(ApiError::transport(format!(
            "failed to parse response body: {e}"
        ))),
    }
}

/// Normalize a response where only success or failure matters.
pub async fn ack_envelope(result: Result<Response, reqwest::Error>) -> Ack {
    let (status, body) = match read_response(result).await {
        Ok(parts) => parts,
        Err(error) => return Ack::error(error),
    };
    if !is_success(status) {
        return Ack::error(ApiError::from_response(status, &body));
    }
    Ack::ok()
}

/// Normalize a binary response into a byte envelope.
pub async fn bytes_envelope(result: Result<Response, reqwest::Error>) -> ApiResponse<Vec<u8>> {
    let response = match result {
        Ok(response) => response,
        Err(e) => return ApiResponse::error(ApiError::transport(e.to_string())),
    };
    let status = response.status().as_u16();
    if !is_success(status) {
        let body = response.text().await.unwrap_or_default();
        return ApiResponse::error(ApiError::from_response(status, &body));
    }
    match response.bytes().await {
        Ok(bytes) => ApiResponse::ok(bytes.to_vec()),
        Err(e) => ApiResponse::error(ApiError::transport(e.to_string())),
    }
}
