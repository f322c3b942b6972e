//! Persistence layer: hosted-database table access.
//!
//! [`TableStore`] is the port for the hosted database: insert a row into a
//! named table, or select rows by an equality filter. Rows cross the port
//! as JSON objects and are decoded into typed records by [`models`].
//! [`supabase::SupabaseRestClient`] implements the port over the Supabase
//! REST API.

pub mod models;
pub mod supabase;

use async_trait::async_trait;

use crate::error::ExternalServiceError;

/// An untyped table row as returned by the hosted database.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Result alias for table-store calls.
pub type StoreResult<T> = Result<T, ExternalServiceError>;

/// Row-level access to hosted-database tables.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Inserts `row` into `table` and returns the stored rows.
    async fn insert(&self, table: &str, row: Row) -> StoreResult<Vec<Row>>;

    /// Returns the rows of `table` whose `column` equals `value`.
    async fn select_where_eq(&self, table: &str, column: &str, value: &str)
    -> StoreResult<Vec<Row>>;
}
