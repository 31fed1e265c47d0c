use restbase_core::RestbaseClient;

use crate::bucket_api::BucketApi;

/// Storage surface of a [`RestbaseClient`].
///
/// Only a factory for bucket-scoped APIs; all file operations live on
/// [`BucketApi`].
#[derive(Debug, Clone)]
pub struct StorageClient {
    client: RestbaseClient,
}

impl StorageClient {
    pub(crate) fn new(client: RestbaseClient) -> Self {
        Self { client }
    }

    /// Scope file operations to a bucket.
    pub fn from(&self, bucket: &str) -> BucketApi {
        BucketApi::new(self.client.clone(), bucket.to_string())
    }
}

#[cfg(test)]
mod tests {
    use crate::RestbaseClientStorageExt;
    use restbase_core::{RestbaseClient, RestbaseConfig};

    #[test]
    fn bucket_scoping() {
        let client =
            RestbaseClient::new(RestbaseConfig::new("https://api.example.com", "key")).unwrap();
        let api = client.storage().from("receipts");
        assert_eq!(api.bucket(), "receipts");
    }
}
