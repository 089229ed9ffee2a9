//! In-memory workspace backend.
//!
//! Holds GEONIS tables as plain rows of text values. Table and column names
//! are matched case-insensitively, like geodatabase object names. The whole
//! workspace can be written to and read from a YAML snapshot:
//!
//! ```yaml
//! qualifier: gis.sde          # optional, prefixed by make_path
//! tables:
//!   GNELE_DEFINITION:
//!     columns: [NAME, VALUE]
//!     rows:
//!       - [tablename_cable, custom_kabel]
//!   GNREL_DEFINITION:
//!     columns: [SRC_TABLE, DST_TABLE, ...]
//!     rows:
//!       - [ele_trasse, ele_kabel, ~, ...]   # ~ is NULL
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use super::{Row, TablePath, Where, Workspace, WorkspaceError};

/// Column names and rows of a single table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableData {
    pub columns: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl TableData {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TableData {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        self.rows
            .push(values.into_iter().map(|v| v.map(Into::into)).collect());
    }

    pub fn with_row<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        self.push_row(values);
        self
    }

    /// Position of `column`, ignoring case
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(column))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct StoredTable {
    name: String,
    data: TableData,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    qualifier: Option<String>,
    #[serde(default)]
    tables: BTreeMap<String, TableData>,
}

/// Workspace whose tables live in memory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryWorkspace {
    qualifier: Option<String>,
    // Keyed by the uppercased table path
    tables: HashMap<String, StoredTable>,
}

impl MemoryWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Workspace whose paths are prefixed with `qualifier` (e.g. `gis.sde`)
    pub fn with_qualifier(qualifier: impl Into<String>) -> Self {
        let qualifier = qualifier.into();
        MemoryWorkspace {
            qualifier: (!qualifier.is_empty()).then_some(qualifier),
            tables: HashMap::new(),
        }
    }

    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }

    /// Stores `data` under the path `make_path(name)`, replacing any table
    /// already stored there
    pub fn insert_table(&mut self, name: &str, data: TableData) -> TablePath {
        let path = self.make_path(name);
        self.tables.insert(
            path.as_str().to_uppercase(),
            StoredTable {
                name: name.to_string(),
                data,
            },
        );
        path
    }

    pub fn with_table(mut self, name: &str, data: TableData) -> Self {
        self.insert_table(name, data);
        self
    }

    pub fn table(&self, path: &TablePath) -> Option<&TableData> {
        self.tables
            .get(&path.as_str().to_uppercase())
            .map(|t| &t.data)
    }

    /// Relative names of all stored tables, sorted
    pub fn table_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.values().map(|t| t.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, WorkspaceError> {
        let snapshot: Snapshot = serde_yaml::from_str(content)?;
        let mut workspace = match snapshot.qualifier {
            Some(qualifier) => MemoryWorkspace::with_qualifier(qualifier),
            None => MemoryWorkspace::new(),
        };
        for (name, data) in snapshot.tables {
            workspace.insert_table(&name, data);
        }
        debug!(
            "Loaded workspace snapshot with {} tables",
            workspace.tables.len()
        );
        Ok(workspace)
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, WorkspaceError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn to_yaml_string(&self) -> Result<String, WorkspaceError> {
        let snapshot = Snapshot {
            qualifier: self.qualifier.clone(),
            tables: self
                .tables
                .values()
                .map(|t| (t.name.clone(), t.data.clone()))
                .collect(),
        };
        Ok(serde_yaml::to_string(&snapshot)?)
    }

    pub fn save_yaml_file<P: AsRef<Path>>(&self, path: P) -> Result<(), WorkspaceError> {
        std::fs::write(path, self.to_yaml_string()?)?;
        Ok(())
    }
}

impl Workspace for MemoryWorkspace {
    fn make_path(&self, name: &str) -> TablePath {
        match &self.qualifier {
            Some(qualifier) => TablePath::new(format!("{}.{}", qualifier, name)),
            None => TablePath::new(name),
        }
    }

    fn read_rows(
        &self,
        table: &TablePath,
        columns: &[&str],
        filter: Option<&Where>,
    ) -> Result<Vec<Row>, WorkspaceError> {
        let data = self
            .table(table)
            .ok_or_else(|| WorkspaceError::TableNotFound {
                table: table.to_string(),
            })?;

        let resolve = |column: &str| {
            data.column_index(column)
                .ok_or_else(|| WorkspaceError::ColumnNotFound {
                    column: column.to_string(),
                    table: table.to_string(),
                })
        };
        let indices = columns
            .iter()
            .map(|c| resolve(c))
            .collect::<Result<Vec<_>, _>>()?;
        let filter_index = filter.map(|f| resolve(f.column())).transpose()?;

        let mut rows = Vec::new();
        for (n, row) in data.rows.iter().enumerate() {
            if row.len() != data.columns.len() {
                return Err(WorkspaceError::MalformedRow {
                    table: table.to_string(),
                    row: n,
                    found: row.len(),
                    expected: data.columns.len(),
                });
            }
            if let (Some(f), Some(i)) = (filter, filter_index) {
                if !f.matches(row[i].as_deref()) {
                    continue;
                }
            }
            rows.push(indices.iter().map(|&i| row[i].clone()).collect());
        }

        debug!(
            "Scanned {} ({} columns{}): {} of {} rows",
            table,
            columns.len(),
            filter.map(|f| format!(", where {}", f)).unwrap_or_default(),
            rows.len(),
            data.rows.len()
        );
        Ok(rows)
    }
}
