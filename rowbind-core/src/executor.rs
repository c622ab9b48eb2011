use crate::{Result, Value};
use std::{
    future::Future,
    ops::{Deref, DerefMut},
    sync::Arc,
};

/// Metadata about modify operations (INSERT/UPDATE/DELETE).
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowsAffected {
    /// Total number of rows impacted.
    pub rows_affected: u64,
    /// Backend-specific last inserted / affected identifier when available.
    pub last_affected_id: Option<i64>,
}

/// Shared reference-counted column name list.
pub type RowNames = Arc<[String]>;
/// Owned row value slice matching `RowNames` length.
pub type Row = Box<[Value]>;

/// A result row with its corresponding column labels.
#[derive(Debug, Clone)]
pub struct RowLabeled {
    pub labels: RowNames,
    /// Data values (aligned by index with `labels`).
    pub values: Row,
}

impl RowLabeled {
    pub fn new(names: RowNames, values: Row) -> Self {
        Self {
            labels: names,
            values,
        }
    }
    pub fn names(&self) -> &[String] {
        &self.labels
    }
    pub fn values(&self) -> &[Value] {
        &self.values
    }
    pub fn get_column(&self, name: &str) -> Option<&Value> {
        self.labels
            .iter()
            .position(|v| v == name)
            .and_then(|i| self.values.get(i))
    }
}

impl From<RowLabeled> for Row {
    fn from(value: RowLabeled) -> Self {
        value.values
    }
}

/// Sequential handle over the rows of one query result.
pub trait Cursor: Send {
    /// Names of the result columns, in column order.
    fn columns(&self) -> Result<RowNames>;

    /// Fetch the next row, `None` once the result is exhausted.
    fn next(&mut self) -> impl Future<Output = Result<Option<Row>>> + Send;

    /// Release the cursor. Called once, no other method is called afterwards.
    fn close(&mut self) -> Result<()>;
}

/// Issues queries against a data store.
///
/// Connection management, transactions and the wire protocol live behind
/// this trait, the mapper only ever calls [`Executor::query`].
pub trait Executor: Send + Sized {
    type Cursor: Cursor;

    /// Run a query and return the cursor over its rows.
    fn query(
        &mut self,
        sql: &str,
        args: &[Value],
    ) -> impl Future<Output = Result<Self::Cursor>> + Send;

    /// Run a query and return its first row, if any.
    fn query_row(
        &mut self,
        sql: &str,
        args: &[Value],
    ) -> impl Future<Output = Result<Option<RowLabeled>>> + Send {
        async move {
            let mut cursor = CursorGuard::new(self.query(sql, args).await?);
            let labels = cursor.columns()?;
            let row = cursor.next().await?;
            cursor.close()?;
            Ok(row.map(|values| RowLabeled::new(labels, values)))
        }
    }

    /// Execute a statement and return the total number of rows affected.
    fn exec(
        &mut self,
        sql: &str,
        args: &[Value],
    ) -> impl Future<Output = Result<RowsAffected>> + Send;
}

/// Owns a cursor and releases it exactly once.
///
/// An explicit [`CursorGuard::close`] reports the close failure, otherwise the
/// cursor is closed on drop and a failure is only logged.
pub struct CursorGuard<C: Cursor> {
    cursor: C,
    closed: bool,
}

impl<C: Cursor> CursorGuard<C> {
    pub fn new(cursor: C) -> Self {
        Self {
            cursor,
            closed: false,
        }
    }

    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.cursor.close()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl<C: Cursor> Deref for CursorGuard<C> {
    type Target = C;
    fn deref(&self) -> &Self::Target {
        &self.cursor
    }
}

impl<C: Cursor> DerefMut for CursorGuard<C> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.cursor
    }
}

impl<C: Cursor> Drop for CursorGuard<C> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            log::warn!("Failed to close the cursor: {e:#}");
        }
    }
}
