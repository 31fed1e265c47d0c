use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;

use restbase_core::http::read_response;
use restbase_core::{Ack, ApiError, ApiResponse};

use crate::builder::{QueryBuilder, SingleQuery};

impl QueryBuilder {
    fn rest_url(&self, query: &str) -> String {
        let base = self.client.endpoint(&format!("/rest/v1/{}", self.table));
        if query.is_empty() {
            base
        } else {
            format!("{base}?{query}")
        }
    }

    async fn send(
        &self,
        method: Method,
        query: &str,
        body: Option<JsonValue>,
        want_representation: bool,
    ) -> Result<(u16, String), ApiError> {
        let url = self.rest_url(query);
        tracing::debug!(method = %method, url = %url, "executing data request");

        let mut request = self
            .client
            .http()
            .request(method, &url)
            .headers(self.client.headers(true));
        if want_representation {
            request = request.header("Prefer", "return=representation");
        }
        if let Some(body) = body {
            request = request.json(&body);
        }
        read_response(request.send().await).await
    }

    /// Run the accumulated query as a read, returning the matching rows.
    pub async fn execute<T: DeserializeOwned>(self) -> ApiResponse<Vec<T>> {
        let query = self.build_query();
        match self.send(Method::GET, &query, None, false).await {
            Ok((status, body)) => parse_rows(status, &body),
            Err(error) => ApiResponse::error(error),
        }
    }

    /// Insert one row or many, returning the created row(s).
    ///
    /// A bare object is wrapped into a one-element array before sending.
    /// Accumulated filters and ordering do not apply: an insert has no WHERE
    /// clause, so the request carries no query string.
    pub async fn insert<T: DeserializeOwned>(self, values: impl Serialize) -> ApiResponse<Vec<T>> {
        let rows = match normalize_rows(values) {
            Ok(rows) => rows,
            Err(error) => return ApiResponse::error(error),
        };
        match self.send(Method::POST, "", Some(rows), true).await {
            Ok((status, body)) => parse_rows(status, &body),
            Err(error) => ApiResponse::error(error),
        }
    }

    /// Update every row matching the accumulated filters, returning the
    /// updated row(s).
    ///
    /// The WHERE clause is the same compiled query string a read would use;
    /// any select/order/limit entries in it are inert for this verb and are
    /// not stripped.
    pub async fn update<T: DeserializeOwned>(self, values: impl Serialize) -> ApiResponse<Vec<T>> {
        let body = match serde_json::to_value(values) {
            Ok(value) => value,
            Err(e) => {
                return ApiResponse::error(ApiError::transport(format!(
                    "failed to serialize values: {e}"
                )))
            }
        };
        let query = self.build_query();
        match self.send(Method::PATCH, &query, Some(body), true).await {
            Ok((status, body)) => parse_rows(status, &body),
            Err(error) => ApiResponse::error(error),
        }
    }

    /// Delete every row matching the accumulated filters.
    pub async fn delete(self) -> Ack {
        let query = self.build_query();
        match self.send(Method::DELETE, &query, None, false).await {
            Ok((status, body)) => {
                if (200..300).contains(&status) {
                    Ack::ok()
                } else {
                    Ack::error(ApiError::from_response(status, &body))
                }
            }
            Err(error) => Ack::error(error),
        }
    }
}

impl SingleQuery {
    /// Run the read and unwrap the first row. An empty result is
    /// `data: None` with no error.
    pub async fn execute<T: DeserializeOwned>(self) -> ApiResponse<T> {
        let rows: ApiResponse<Vec<T>> = self.inner.execute().await;
        if let Some(error) = rows.error {
            return ApiResponse::error(error);
        }
        let first = rows.data.and_then(|mut rows| {
            if rows.is_empty() {
                None
            } else {
                Some(rows.remove(0))
            }
        });
        match first {
            Some(row) => ApiResponse::ok(row),
            None => ApiResponse::empty(),
        }
    }
}

/// Wrap a bare object into a one-element array; arrays pass through.
fn normalize_rows(values: impl Serialize) -> Result<JsonValue, ApiError> {
    let value = serde_json::to_value(values)
        .map_err(|e| ApiError::transport(format!("failed to serialize values: {e}")))?;
    Ok(match value {
        JsonValue::Array(_) => value,
        other => JsonValue::Array(vec![other]),
    })
}

fn parse_rows<T: DeserializeOwned>(status: u16, body: &str) -> ApiResponse<Vec<T>> {
    if !(200..300).contains(&status) {
        return ApiResponse::error(ApiError::from_response(status, body));
    }
    if body.is_empty() {
        return ApiResponse::ok(Vec::new());
    }
    match serde_json::from_str::<Vec<T>>(body) {
        Ok(rows) => ApiResponse::ok(rows),
        // A write with return=representation may answer with a bare object.
        Err(_) => match serde_json::from_str::<T>(body) {
            Ok(row) => ApiResponse::ok(vec![row]),
            Err(e) => ApiResponse::error(ApiError::transport(format!(
                "failed to parse rows: {e}"
            ))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalize_wraps_bare_objects() {
        let rows = normalize_rows(json!({"x": 1})).unwrap();
        assert_eq!(rows, json!([{"x": 1}]));
    }

    #[test]
    fn normalize_passes_arrays_through() {
        let rows = normalize_rows(json!([{"x": 1}, {"x": 2}])).unwrap();
        assert_eq!(rows, json!([{"x": 1}, {"x": 2}]));
    }

    #[test]
    fn parse_rows_accepts_array_and_bare_object() {
        let rows: ApiResponse<Vec<JsonValue>> = parse_rows(200, r#"[{"x":1}]"#);
        assert_eq!(rows.data.unwrap().len(), 1);

        let rows: ApiResponse<Vec<JsonValue>> = parse_rows(201, r#"{"x":1}"#);
        assert_eq!(rows.data.unwrap(), vec![json!({"x": 1})]);
    }

    #[test]
    fn parse_rows_empty_body_is_no_rows() {
        let rows: ApiResponse<Vec<JsonValue>> = parse_rows(204, "");
        assert_eq!(rows.data.unwrap(), Vec::<JsonValue>::new());
    }

    #[test]
    fn parse_rows_server_error_passthrough() {
        let rows: ApiResponse<Vec<JsonValue>> =
            parse_rows(400, r#"{"message":"malformed filter","code":"PGRST100"}"#);
        let error = rows.error.unwrap();
        assert_eq!(error.message, "malformed filter");
        assert_eq!(error.status, Some(400));
        assert_eq!(error.code.as_deref(), Some("PGRST100"));
    }

    #[tokio::test]
    async fn transport_failure_maps_to_envelope() {
        use crate::RestbaseClientQueryExt;
        use restbase_core::{RestbaseClient, RestbaseConfig};

        // Nothing listens on the discard port; the builder must still answer
        // with an envelope rather than panic or return Err.
        let client =
            RestbaseClient::new(RestbaseConfig::new("http://127.0.0.1:9", "key")).unwrap();
        let resp: ApiResponse<Vec<JsonValue>> = client.from("t").eq("id", 1).execute().await;
        assert_eq!(resp.data, None);
        let error = resp.error.unwrap();
        assert_eq!(error.status, None);
        assert!(!error.message.is_empty());

        let ack = client.from("t").eq("id", 1).delete().await;
        assert!(ack.error.is_some());
    }
}
