//! Workspace abstraction over a GEONIS geodatabase.
//!
//! A workspace knows how to qualify a table name into a physical table path
//! and how to scan a table for a set of text columns. Everything above this
//! layer (definition tables, relation tables) is written against the
//! [`Workspace`] trait only.
//!
//! Two backends are provided:
//!
//! - [`MemoryWorkspace`]: tables held in memory, loadable from a YAML snapshot
//! - [`clickhouse_source`]: fetches the GEONIS tables of a ClickHouse database into a
//!   [`MemoryWorkspace`]

use std::fmt;

use thiserror::Error;

pub mod clickhouse_source;
pub mod lookups;
pub mod memory;
pub mod query;

pub use clickhouse_source::ClickHouseSource;
pub use lookups::{KeyedRows, RowHandler, RowLookup, ValueLookup};
pub use memory::{MemoryWorkspace, TableData};
pub use query::Where;

/// One scanned row. Every cell is read as text; `None` is a database NULL.
pub type Row = Vec<Option<String>>;

/// Errors raised by workspace backends while reading tables
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("Table '{table}' does not exist")]
    TableNotFound { table: String },
    #[error("Column '{column}' not found in table '{table}'")]
    ColumnNotFound { column: String, table: String },
    #[error("Row {row} of table '{table}' has {found} values, expected {expected}")]
    MalformedRow {
        table: String,
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("Failed to read workspace snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse workspace snapshot: {0}")]
    Snapshot(#[from] serde_yaml::Error),
    #[error("Failed to query {table}: {source}")]
    ClickHouse {
        table: String,
        source: clickhouse::error::Error,
    },
}

/// Fully qualified path of a table inside a workspace
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TablePath(String);

impl TablePath {
    pub fn new(path: impl Into<String>) -> Self {
        TablePath(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last component of the path (the bare table name)
    pub fn table_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for TablePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TablePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Handle to a specific GEONIS database.
///
/// Implementations do not own any lookup logic: they qualify names and hand
/// back raw rows. Rows must contain exactly one value per requested column,
/// in the requested order. When a filter is given, only rows matching it are
/// returned (the filter column does not have to be among `columns`).
pub trait Workspace {
    /// Qualifies a relative table name into a physical table path
    fn make_path(&self, name: &str) -> TablePath;

    /// Scans `table` for `columns`, optionally restricted by `filter`
    fn read_rows(
        &self,
        table: &TablePath,
        columns: &[&str],
        filter: Option<&Where>,
    ) -> Result<Vec<Row>, WorkspaceError>;
}

impl<W: Workspace + ?Sized> Workspace for &W {
    fn make_path(&self, name: &str) -> TablePath {
        (**self).make_path(name)
    }

    fn read_rows(
        &self,
        table: &TablePath,
        columns: &[&str],
        filter: Option<&Where>,
    ) -> Result<Vec<Row>, WorkspaceError> {
        (**self).read_rows(table, columns, filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_name_of_qualified_path() {
        let path = TablePath::new("gis.sde.GNELE_DEFINITION");
        assert_eq!(path.table_name(), "GNELE_DEFINITION");
        assert_eq!(path.to_string(), "gis.sde.GNELE_DEFINITION");
    }

    #[test]
    fn test_table_name_of_bare_path() {
        assert_eq!(TablePath::new("GNREL_DEFINITION").table_name(), "GNREL_DEFINITION");
    }
}
