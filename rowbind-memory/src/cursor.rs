use crate::Stats;
use rowbind_core::{Cursor, Error, Result, Row, RowNames};
use std::{
    collections::VecDeque,
    sync::{Arc, atomic::Ordering},
};

pub struct MemoryCursor {
    pub(crate) columns: std::result::Result<RowNames, String>,
    pub(crate) rows: VecDeque<Row>,
    pub(crate) failure: Option<(usize, String)>,
    pub(crate) fetched: usize,
    pub(crate) closed: bool,
    pub(crate) stats: Arc<Stats>,
}

impl Cursor for MemoryCursor {
    fn columns(&self) -> Result<RowNames> {
        if self.closed {
            return Err(Error::msg("Cannot read the columns of a closed cursor"));
        }
        self.columns.clone().map_err(Error::msg)
    }

    async fn next(&mut self) -> Result<Option<Row>> {
        if self.closed {
            return Err(Error::msg("Cannot fetch from a closed cursor"));
        }
        if let Some((_, message)) = self
            .failure
            .as_ref()
            .filter(|(index, _)| *index == self.fetched)
        {
            return Err(Error::msg(message.clone()));
        }
        let row = self.rows.pop_front();
        if row.is_some() {
            self.fetched += 1;
            self.stats.rows_fetched.fetch_add(1, Ordering::Relaxed);
        }
        Ok(row)
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            log::error!("Cursor closed twice");
            return Err(Error::msg("The cursor is already closed"));
        }
        self.closed = true;
        self.stats.cursors_closed.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
