//! Bulk lookups built from a single table scan.
//!
//! - [`ValueLookup`]: key column → value column
//! - [`RowLookup`]: key column → record built from the remaining columns by a
//!   [`RowHandler`]

use std::collections::hash_map;
use std::collections::HashMap;

use log::debug;

use super::{Row, TablePath, Where, Workspace, WorkspaceError};

/// Key → value mapping read from two columns of a table.
///
/// Rows with a NULL key or a NULL value are ignored. When a key repeats, the
/// last row wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueLookup {
    entries: HashMap<String, String>,
}

impl ValueLookup {
    pub fn load<W: Workspace + ?Sized>(
        workspace: &W,
        table: &TablePath,
        key_column: &str,
        value_column: &str,
    ) -> Result<Self, WorkspaceError> {
        let rows = workspace.read_rows(table, &[key_column, value_column], None)?;

        let mut entries = HashMap::with_capacity(rows.len());
        for row in rows {
            let mut values = row.into_iter();
            match (values.next().flatten(), values.next().flatten()) {
                (Some(key), Some(value)) => {
                    if let Some(previous) = entries.insert(key, value) {
                        debug!("{}: duplicate key replaced value '{}'", table, previous);
                    }
                }
                _ => continue,
            }
        }

        debug!("Loaded {} key/value pairs from {}", entries.len(), table);
        Ok(ValueLookup { entries })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for ValueLookup {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        ValueLookup {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Per-row hook of a [`RowLookup`].
///
/// Receives each scanned row (key column first, then the value columns in
/// the requested order) and decides what, if anything, to insert.
pub trait RowHandler {
    type Value;

    fn handle_row(&mut self, row: Row, entries: &mut HashMap<String, Self::Value>);
}

/// Default [`RowHandler`]: the first column is the key, the remaining values
/// are stored as-is. NULL keys are skipped and the last row wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyedRows;

impl RowHandler for KeyedRows {
    type Value = Row;

    fn handle_row(&mut self, row: Row, entries: &mut HashMap<String, Row>) {
        let mut values = row.into_iter();
        if let Some(key) = values.next().flatten() {
            entries.insert(key, values.collect());
        }
    }
}

/// Key → record mapping read from a filtered table scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowLookup<V> {
    entries: HashMap<String, V>,
}

impl<V> Default for RowLookup<V> {
    fn default() -> Self {
        RowLookup {
            entries: HashMap::new(),
        }
    }
}

impl<V> RowLookup<V> {
    /// Scans `table` once for `key_column` followed by `value_columns`
    /// (rows restricted by `filter`) and feeds every row to `handler`.
    pub fn load<W, H>(
        workspace: &W,
        table: &TablePath,
        key_column: &str,
        value_columns: &[&str],
        filter: Option<&Where>,
        handler: &mut H,
    ) -> Result<Self, WorkspaceError>
    where
        W: Workspace + ?Sized,
        H: RowHandler<Value = V>,
    {
        let mut columns = Vec::with_capacity(value_columns.len() + 1);
        columns.push(key_column);
        columns.extend_from_slice(value_columns);

        let rows = workspace.read_rows(table, &columns, filter)?;
        let scanned = rows.len();

        let mut entries = HashMap::with_capacity(scanned);
        for row in rows {
            handler.handle_row(row, &mut entries);
        }

        debug!(
            "Loaded {} of {} scanned rows from {} keyed by {}",
            entries.len(),
            scanned,
            table,
            key_column
        );
        Ok(RowLookup { entries })
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, V> {
        self.entries.iter()
    }
}
