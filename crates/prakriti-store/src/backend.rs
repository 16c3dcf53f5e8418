use std::future::Future;
use std::pin::Pin;

use serde_json::Value;

use crate::error::StoreError;
use crate::query::Query;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The query surface of the hosted store. Rows travel as JSON objects;
/// [`crate::rows`] converts them to domain types.
pub trait Backend: Send + Sync {
    /// Rows of `query.table` matching every filter, ordered and limited as
    /// the query asks.
    fn select(&self, query: Query) -> BoxFuture<'_, Result<Vec<Value>, StoreError>>;

    /// Insert one row and return it as stored, with server-assigned
    /// columns filled in.
    fn insert(&self, table: &str, row: Value) -> BoxFuture<'_, Result<Value, StoreError>>;

    /// Delete the rows matching the query's filters. Returns how many went.
    fn delete(&self, query: Query) -> BoxFuture<'_, Result<usize, StoreError>>;
}
