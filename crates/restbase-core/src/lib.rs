//! Core building blocks for the restbase client.
//!
//! This crate holds everything the protocol surfaces (auth, query, storage)
//! share: the [`RestbaseClient`] object itself, its configuration, the
//! persisted [`Session`] and its [`SessionStore`], the `{data, error}`
//! result envelope, and the response-normalization helpers that turn raw
//! HTTP outcomes into envelopes.
//!
//! # Usage
//!
//! ```ignore
//! use restbase_core::{RestbaseClient, RestbaseConfig};
//!
//! let client = RestbaseClient::new(RestbaseConfig::new(
//!     "https://api.example.com",
//!     "anon-key",
//! ))?;
//! ```
//!
//! The protocol surfaces attach themselves through extension traits; see the
//! `restbase-auth`, `restbase-query`, and `restbase-storage` crates.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod response;
pub mod session;

pub use client::RestbaseClient;
pub use config::RestbaseConfig;
pub use error::{ApiError, ApiErrorBody, RestbaseError};
pub use response::{Ack, ApiResponse};
pub use session::{
    MemoryStorage, Session, SessionStorage, SessionStore, User, DEFAULT_SESSION_KEY,
};
