//! Fluent per-table query builder for the restbase client.
//!
//! `client.from("table")` yields a fresh [`QueryBuilder`]; chained calls
//! accumulate select/filter/order/pagination state, and a terminal call
//! compiles that state into a PostgREST-style query string and runs it:
//!
//! ```ignore
//! use restbase::prelude::*;
//! use serde_json::Value;
//!
//! let rows: ApiResponse<Vec<Value>> = client
//!     .from("products")
//!     .select("*")
//!     .eq("category", "fuel")
//!     .order("name", OrderDirection::Ascending)
//!     .limit(5)
//!     .execute()
//!     .await;
//! ```
//!
//! The same compiled filter string backs reads, updates (as the WHERE
//! clause), and deletes; inserts ignore it. Terminal calls consume the
//! builder, so one builder describes exactly one operation.

pub mod builder;
mod execute;

pub use builder::{Filter, OrderDirection, QueryBuilder, SingleQuery};

use restbase_core::RestbaseClient;

/// Extension trait hanging the query surface off a [`RestbaseClient`].
pub trait RestbaseClientQueryExt {
    /// Begin a query against `table`. Every call returns a brand-new
    /// builder; builders are never reused across operations.
    fn from(&self, table: &str) -> QueryBuilder;
}

impl RestbaseClientQueryExt for RestbaseClient {
    fn from(&self, table: &str) -> QueryBuilder {
        QueryBuilder::new(self.clone(), table)
    }
}
