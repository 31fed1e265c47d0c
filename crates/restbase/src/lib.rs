//! REST data-access client for PostgREST-compatible hosted backends.
//!
//! One explicit client object carries the base URL, API key, and persisted
//! auth session; the protocol surfaces hang off it through extension traits:
//!
//! ```ignore
//! use restbase::prelude::*;
//! use serde_json::Value;
//!
//! let client = RestbaseClient::new(RestbaseConfig::new(url, anon_key))?;
//!
//! // Establish a session.
//! client.auth().sign_in_with_password("ops@example.com", "secret").await;
//!
//! // Query a table; the bearer token is read from the session store.
//! let deliveries: ApiResponse<Vec<Value>> = client
//!     .from("deliveries")
//!     .select("*")
//!     .eq("status", "pending")
//!     .order("scheduled_at", OrderDirection::Ascending)
//!     .execute()
//!     .await;
//!
//! // Files.
//! let url = client.storage().from("receipts").get_public_url("a/b.png");
//! ```
//!
//! Every operation returns a `{data, error}` envelope; after client
//! construction nothing on the public surface returns `Err` or panics.

pub use restbase_core::*;

pub use restbase_auth;
pub use restbase_query;
pub use restbase_storage;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use restbase::prelude::*;
/// ```
pub mod prelude {
    pub use restbase_core::{
        Ack, ApiError, ApiResponse, MemoryStorage, RestbaseClient, RestbaseConfig, RestbaseError,
        Session, SessionStorage, SessionStore, User,
    };

    pub use restbase_auth::{
        AuthClient, ResetPasswordOptions, RestbaseClientAuthExt, SessionData, SignInData,
        SignUpOptions, UpdateUserParams,
    };

    pub use restbase_query::{
        OrderDirection, QueryBuilder, RestbaseClientQueryExt, SingleQuery,
    };

    pub use restbase_storage::{
        BucketApi, FileOptions, RestbaseClientStorageExt, StorageClient, UploadResponse,
    };
}
