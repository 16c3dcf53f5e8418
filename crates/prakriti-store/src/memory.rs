//! In-process [`Backend`] with the store's query semantics.
//!
//! Assigns `id` and insert timestamps the way the hosted store does, records
//! every operation it serves, and can be told to fail a table. Used by the
//! test suites and for running the screens without a network.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use prakriti_core::tables;

use crate::backend::{Backend, BoxFuture};
use crate::error::StoreError;
use crate::query::{compare_values, Direction, Query};

/// One request served by a [`MemoryBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Select(Query),
    Insert { table: String, row: Value },
    Delete(Query),
}

impl Operation {
    pub fn table(&self) -> &str {
        match self {
            Operation::Select(q) | Operation::Delete(q) => &q.table,
            Operation::Insert { table, .. } => table,
        }
    }
}

#[derive(Default)]
struct Inner {
    tables: HashMap<String, Vec<Value>>,
    operations: Vec<Operation>,
    failing: HashSet<String>,
    last_stamp: Option<jiff::Timestamp>,
}

#[derive(Default)]
pub struct MemoryBackend {
    inner: Mutex<Inner>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Load rows as-is, without assigning ids or timestamps and without
    /// recording an operation.
    pub fn seed<T: Serialize>(&self, table: &str, rows: &[T]) -> Result<(), StoreError> {
        known_table(table)?;
        let values = rows
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        self.lock()
            .tables
            .entry(table.to_string())
            .or_default()
            .extend(values);
        Ok(())
    }

    /// Current rows of a table, in insertion order.
    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.lock().tables.get(table).cloned().unwrap_or_default()
    }

    /// Every operation served so far, oldest first.
    pub fn operations(&self) -> Vec<Operation> {
        self.lock().operations.clone()
    }

    pub fn clear_operations(&self) {
        self.lock().operations.clear();
    }

    /// Make every operation on `table` fail with [`StoreError::Unavailable`]
    /// until switched off again.
    pub fn fail_table(&self, table: &str, failing: bool) {
        let mut inner = self.lock();
        if failing {
            inner.failing.insert(table.to_string());
        } else {
            inner.failing.remove(table);
        }
    }

    fn run_select(&self, query: Query) -> Result<Vec<Value>, StoreError> {
        known_table(&query.table)?;
        let mut inner = self.lock();
        inner.operations.push(Operation::Select(query.clone()));
        check_failing(&inner, &query.table)?;

        let mut rows: Vec<Value> = inner
            .tables
            .get(&query.table)
            .map(|rows| rows.iter().filter(|r| query.matches(r)).cloned().collect())
            .unwrap_or_default();

        if let Some(order) = &query.order {
            rows.sort_by(|a, b| {
                let a = a.get(&order.column).unwrap_or(&Value::Null);
                let b = b.get(&order.column).unwrap_or(&Value::Null);
                match order.direction {
                    Direction::Ascending => compare_values(a, b),
                    Direction::Descending => compare_values(b, a),
                }
            });
        }
        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }
        Ok(rows)
    }

    fn run_insert(&self, table: &str, row: Value) -> Result<Value, StoreError> {
        known_table(table)?;
        let mut inner = self.lock();
        inner.operations.push(Operation::Insert {
            table: table.to_string(),
            row: row.clone(),
        });
        check_failing(&inner, table)?;

        let Value::Object(mut fields) = row else {
            return Err(StoreError::Status {
                status: 400,
                body: "insert payload must be a JSON object".to_string(),
            });
        };
        fields
            .entry(tables::columns::ID)
            .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));
        if let Some(column) = tables::insert_timestamp_column(table) {
            let stamp = next_stamp(&mut inner);
            fields
                .entry(column)
                .or_insert_with(|| Value::String(stamp.to_string()));
        }
        if table == tables::FOLLOW_UPS {
            fields
                .entry(tables::columns::COMPLETED)
                .or_insert(Value::Bool(false));
        }

        let stored = Value::Object(fields);
        inner
            .tables
            .entry(table.to_string())
            .or_default()
            .push(stored.clone());
        Ok(stored)
    }

    fn run_delete(&self, query: Query) -> Result<usize, StoreError> {
        known_table(&query.table)?;
        let mut inner = self.lock();
        inner.operations.push(Operation::Delete(query.clone()));
        check_failing(&inner, &query.table)?;

        let Some(rows) = inner.tables.get_mut(&query.table) else {
            return Ok(0);
        };
        let before = rows.len();
        rows.retain(|r| !query.matches(r));
        Ok(before - rows.len())
    }
}

fn known_table(table: &str) -> Result<(), StoreError> {
    if tables::ALL.contains(&table) {
        Ok(())
    } else {
        Err(StoreError::UnknownTable(table.to_string()))
    }
}

fn check_failing(inner: &Inner, table: &str) -> Result<(), StoreError> {
    if inner.failing.contains(table) {
        return Err(StoreError::Unavailable(format!("{table} is failing")));
    }
    Ok(())
}

/// Strictly increasing insert timestamps, so "newest first" is total even
/// when two inserts land in the same clock tick.
fn next_stamp(inner: &mut Inner) -> jiff::Timestamp {
    let mut stamp = jiff::Timestamp::now();
    if let Some(last) = inner.last_stamp
        && stamp <= last
    {
        stamp = last
            .checked_add(jiff::SignedDuration::from_micros(1))
            .unwrap_or(last);
    }
    inner.last_stamp = Some(stamp);
    stamp
}

impl Backend for MemoryBackend {
    fn select(&self, query: Query) -> BoxFuture<'_, Result<Vec<Value>, StoreError>> {
        let result = self.run_select(query);
        Box::pin(async move { result })
    }

    fn insert(&self, table: &str, row: Value) -> BoxFuture<'_, Result<Value, StoreError>> {
        let result = self.run_insert(table, row);
        Box::pin(async move { result })
    }

    fn delete(&self, query: Query) -> BoxFuture<'_, Result<usize, StoreError>> {
        let result = self.run_delete(query);
        Box::pin(async move { result })
    }
}
