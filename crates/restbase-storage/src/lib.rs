//! Object storage surface for the restbase client.
//!
//! Talks to the binary object store at `/storage/v1/...`, independent of the
//! query builder: uploads are multipart, downloads are raw bytes, and public
//! URLs are pure string construction with no network involved.
//!
//! # Usage
//!
//! ```ignore
//! use restbase::prelude::*;
//!
//! let bucket = client.storage().from("receipts");
//! bucket.upload("2026/08/pump4.png", bytes, FileOptions::new()).await;
//! let url = bucket.get_public_url("2026/08/pump4.png");
//! ```

pub mod bucket_api;
pub mod client;
pub mod types;

pub use bucket_api::BucketApi;
pub use client::StorageClient;
pub use types::{FileOptions, UploadResponse};

use restbase_core::RestbaseClient;

/// Extension trait hanging the storage surface off a [`RestbaseClient`].
pub trait RestbaseClientStorageExt {
    /// Object storage operations backed by this client.
    fn storage(&self) -> StorageClient;
}

impl RestbaseClientStorageExt for RestbaseClient {
    fn storage(&self) -> StorageClient {
        StorageClient::new(self.clone())
    }
}
