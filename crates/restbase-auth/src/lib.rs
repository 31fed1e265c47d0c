//! Auth surface for the restbase client.
//!
//! Wraps the backend's auth endpoints at `/auth/v1/...` and keeps the
//! client's session store in sync with every outcome: a successful
//! sign-up/sign-in persists the session, sign-out and observed token
//! rejection clear it. There is no automatic refresh; an expired session is
//! lazily discarded and the caller re-authenticates.
//!
//! # Usage
//!
//! ```ignore
//! use restbase::prelude::*;
//!
//! let client = RestbaseClient::new(RestbaseConfig::new(url, key))?;
//! let auth = client.auth();
//!
//! let signed_in = auth.sign_in_with_password("user@example.com", "secret").await;
//! if let Some(data) = signed_in.data {
//!     println!("hello {}", data.user.email);
//! }
//! ```

pub mod client;
pub mod types;

pub use client::AuthClient;
pub use types::{
    ResetPasswordOptions, SessionData, SignInData, SignUpOptions, TokenPayload, UpdateUserParams,
};

use restbase_core::RestbaseClient;

/// Extension trait hanging the auth surface off a [`RestbaseClient`].
pub trait RestbaseClientAuthExt {
    /// Auth operations backed by this client's session store.
    fn auth(&self) -> AuthClient;
}

impl RestbaseClientAuthExt for RestbaseClient {
    fn auth(&self) -> AuthClient {
        AuthClient::new(self.clone())
    }
}
