use crate::{MemoryCursor, ResultSet};
use rowbind_core::{Error, Executor, Result, RowsAffected, Value, truncate_long};
use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

/// Counters shared between the executor and its cursors.
#[derive(Default, Debug)]
pub struct Stats {
    pub(crate) queries: AtomicUsize,
    pub(crate) execs: AtomicUsize,
    pub(crate) cursors_opened: AtomicUsize,
    pub(crate) cursors_closed: AtomicUsize,
    pub(crate) rows_fetched: AtomicUsize,
    pub(crate) last_args: Mutex<Option<Vec<Value>>>,
}

#[derive(Debug, Clone)]
enum Script {
    Rows(ResultSet),
    QueryFailure(String),
    ColumnsFailure(String),
    Affected(RowsAffected),
}

/// Executor answering each SQL text with a scripted outcome.
///
/// The SQL is matched after trimming the surrounding whitespace. Queries without
/// a script fail.
#[derive(Default, Debug, Clone)]
pub struct MemoryExecutor {
    scripts: HashMap<String, Script>,
    stats: Arc<Stats>,
}

impl MemoryExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    fn script(&mut self, sql: &str, script: Script) -> &mut Self {
        self.scripts.insert(sql.trim().to_owned(), script);
        self
    }

    /// Serve `result` to every execution of `sql`.
    pub fn with_rows(&mut self, sql: &str, result: ResultSet) -> &mut Self {
        self.script(sql, Script::Rows(result))
    }

    /// Make `sql` fail when issued.
    pub fn with_query_failure(&mut self, sql: &str, message: impl Into<String>) -> &mut Self {
        self.script(sql, Script::QueryFailure(message.into()))
    }

    /// Make the column introspection of the cursor of `sql` fail.
    pub fn with_columns_failure(&mut self, sql: &str, message: impl Into<String>) -> &mut Self {
        self.script(sql, Script::ColumnsFailure(message.into()))
    }

    pub fn with_affected(&mut self, sql: &str, rows_affected: u64) -> &mut Self {
        self.script(
            sql,
            Script::Affected(RowsAffected {
                rows_affected,
                last_affected_id: None,
            }),
        )
    }

    /// Number of queries issued, failed ones included.
    pub fn queries(&self) -> usize {
        self.stats.queries.load(Ordering::Relaxed)
    }

    pub fn execs(&self) -> usize {
        self.stats.execs.load(Ordering::Relaxed)
    }

    pub fn cursors_opened(&self) -> usize {
        self.stats.cursors_opened.load(Ordering::Relaxed)
    }

    pub fn cursors_closed(&self) -> usize {
        self.stats.cursors_closed.load(Ordering::Relaxed)
    }

    pub fn rows_fetched(&self) -> usize {
        self.stats.rows_fetched.load(Ordering::Relaxed)
    }

    /// Arguments of the last query or statement.
    pub fn last_args(&self) -> Option<Vec<Value>> {
        self.stats
            .last_args
            .lock()
            .map(|v| v.clone())
            .unwrap_or_else(|e| e.into_inner().clone())
    }

    fn record(&self, sql: &str, args: &[Value]) -> Option<Script> {
        log::debug!("Memory executor received:\n{}", truncate_long!(sql));
        match self.stats.last_args.lock() {
            Ok(mut v) => *v = Some(args.to_vec()),
            Err(e) => *e.into_inner() = Some(args.to_vec()),
        }
        self.scripts.get(sql.trim()).cloned()
    }
}

impl Executor for MemoryExecutor {
    type Cursor = MemoryCursor;

    async fn query(&mut self, sql: &str, args: &[Value]) -> Result<MemoryCursor> {
        self.stats.queries.fetch_add(1, Ordering::Relaxed);
        let (columns, result) = match self.record(sql, args) {
            Some(Script::Rows(result)) => (Ok(result.columns.clone()), result),
            Some(Script::ColumnsFailure(message)) => (Err(message), ResultSet::default()),
            Some(Script::QueryFailure(message)) => return Err(Error::msg(message)),
            Some(Script::Affected(..)) => {
                return Err(Error::msg("The statement does not return rows"));
            }
            None => {
                return Err(Error::msg(format!(
                    "No result scripted for the query:\n{}",
                    truncate_long!(sql)
                )));
            }
        };
        self.stats.cursors_opened.fetch_add(1, Ordering::Relaxed);
        Ok(MemoryCursor {
            columns,
            rows: result.rows.into(),
            failure: result.failure,
            fetched: 0,
            closed: false,
            stats: self.stats.clone(),
        })
    }

    async fn exec(&mut self, sql: &str, args: &[Value]) -> Result<RowsAffected> {
        self.stats.execs.fetch_add(1, Ordering::Relaxed);
        match self.record(sql, args) {
            Some(Script::Affected(affected)) => Ok(affected),
            Some(Script::Rows(..)) => Ok(RowsAffected::default()),
            Some(Script::QueryFailure(message) | Script::ColumnsFailure(message)) => {
                Err(Error::msg(message))
            }
            None => Err(Error::msg(format!(
                "No result scripted for the statement:\n{}",
                truncate_long!(sql)
            ))),
        }
    }
}
