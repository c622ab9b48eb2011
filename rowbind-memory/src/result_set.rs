use rowbind_core::{Row, RowNames, Value};

/// Rows served by the cursor of a scripted query.
#[derive(Default, Debug, Clone)]
pub struct ResultSet {
    pub columns: RowNames,
    pub rows: Vec<Row>,
    /// Fetching the row at this index fails with the message.
    pub failure: Option<(usize, String)>,
}

impl ResultSet {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            failure: None,
        }
    }

    /// Append a row, it must have one value per column.
    pub fn row<I: IntoIterator<Item = Value>>(mut self, values: I) -> Self {
        let row: Row = values.into_iter().collect();
        debug_assert_eq!(
            row.len(),
            self.columns.len(),
            "The row does not match the columns {:?}",
            self.columns
        );
        self.rows.push(row);
        self
    }

    /// Fail when the cursor reaches the row at `index`.
    pub fn fail_at(mut self, index: usize, message: impl Into<String>) -> Self {
        self.failure = Some((index, message.into()));
        self
    }
}
