use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};

use restbase_core::http::{bytes_envelope, json_envelope};
use restbase_core::{ApiError, ApiResponse, RestbaseClient};

use crate::types::{FileOptions, UploadResponse};

/// File operations scoped to a specific bucket, created via
/// [`StorageClient::from`](crate::StorageClient::from).
#[derive(Debug, Clone)]
pub struct BucketApi {
    client: RestbaseClient,
    bucket: String,
}

impl BucketApi {
    pub(crate) fn new(client: RestbaseClient, bucket: String) -> Self {
        Self { client, bucket }
    }

    /// Bucket this API is scoped to.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    fn object_url(&self, path: &str) -> String {
        self.client
            .endpoint(&format!("/storage/v1/object/{}/{}", self.bucket, path))
    }

    /// Upload a file as a multipart request.
    pub async fn upload(
        &self,
        path: &str,
        data: Vec<u8>,
        options: FileOptions,
    ) -> ApiResponse<UploadResponse> {
        let file_name = path.rsplit('/').next().unwrap_or(path).to_string();
        let mut part = Part::bytes(data).file_name(file_name);
        if let Some(ref content_type) = options.content_type {
            part = match part.mime_str(content_type) {
                Ok(part) => part,
                Err(e) => {
                    return ApiResponse::error(ApiError::transport(format!(
                        "invalid content type: {e}"
                    )))
                }
            };
        }
        let form = Form::new().part("file", part);

        let url = self.object_url(path);
        tracing::debug!(url = %url, "uploading object");

        // The multipart boundary sets its own content type.
        let mut headers = self.client.headers(true);
        headers.remove(CONTENT_TYPE);

        let mut request = self
            .client
            .http()
            .post(&url)
            .headers(headers)
            .multipart(form);
        if let Some(ref cache) = options.cache_control {
            request = request.header("cache-control", cache.as_str());
        }
        if let Some(upsert) = options.upsert {
            request = request.header("x-upsert", if upsert { "true" } else { "false" });
        }

        json_envelope(request.send().await).await
    }

    /// Download a file's raw bytes.
    pub async fn download(&self, path: &str) -> ApiResponse<Vec<u8>> {
        let url = self.object_url(path);
        tracing::debug!(url = %url, "downloading object");
        let request = self
            .client
            .http()
            .get(&url)
            .headers(self.client.headers(true));
        bytes_envelope(request.send().await).await
    }

    /// Public URL for a file in a public bucket.
    ///
    /// Pure string construction; no network call is made and the result is
    /// deterministic for a given bucket and path.
    pub fn get_public_url(&self, path: &str) -> String {
        let base = self.client.base_url().as_str().trim_end_matches('/');
        format!("{}/storage/v1/object/public/{}/{}", base, self.bucket, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RestbaseClientStorageExt;
    use restbase_core::RestbaseConfig;

    fn bucket() -> BucketApi {
        let client =
            RestbaseClient::new(RestbaseConfig::new("https://api.example.com", "key")).unwrap();
        client.storage().from("bucket")
    }

    #[test]
    fn public_url_construction() {
        assert_eq!(
            bucket().get_public_url("a/b.png"),
            "https://api.example.com/storage/v1/object/public/bucket/a/b.png"
        );
    }

    #[test]
    fn public_url_is_deterministic() {
        let api = bucket();
        assert_eq!(api.get_public_url("a/b.png"), api.get_public_url("a/b.png"));
    }

    #[test]
    fn public_url_with_trailing_slash_base() {
        let client =
            RestbaseClient::new(RestbaseConfig::new("https://api.example.com/", "key")).unwrap();
        assert_eq!(
            client.storage().from("bucket").get_public_url("x.png"),
            "https://api.example.com/storage/v1/object/public/bucket/x.png"
        );
    }

    #[tokio::test]
    async fn download_transport_failure_maps_to_envelope() {
        let client =
            RestbaseClient::new(RestbaseConfig::new("http://127.0.0.1:9", "key")).unwrap();
        let resp = client.storage().from("bucket").download("a.png").await;
        assert!(resp.is_err());
        assert_eq!(resp.error.unwrap().status, None);
    }
}
