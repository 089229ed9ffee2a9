//! ClickHouse snapshot loader
//!
//! Reads the GEONIS system tables (solution definition tables and the
//! relationship definition table) of one ClickHouse database and returns
//! them as a [`MemoryWorkspace`]. Every column is cast to `Nullable(String)`
//! on the server, so the snapshot holds exactly what the lookups expect.

use std::collections::HashMap;

use clickhouse::{Client, Row};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::{MemoryWorkspace, TableData, WorkspaceError};
use crate::config::ClickHouseSettings;
use crate::geonis::consts::{self, definition, relation};

#[derive(Debug, Serialize, Deserialize, Row)]
struct TableName {
    name: String,
}

#[derive(Debug, Serialize, Deserialize, Row)]
struct DefinitionRow {
    name: Option<String>,
    value: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Row)]
struct RelationRow {
    src_table: Option<String>,
    dst_table: Option<String>,
    rel_table: Option<String>,
    src_keyfield: Option<String>,
    dst_keyfield: Option<String>,
    rel_src_keyfield: Option<String>,
    rel_dst_keyfield: Option<String>,
    relation_type: Option<String>,
}

impl RelationRow {
    fn into_values(self) -> [Option<String>; 8] {
        [
            self.src_table,
            self.dst_table,
            self.rel_table,
            self.src_keyfield,
            self.dst_keyfield,
            self.rel_src_keyfield,
            self.rel_dst_keyfield,
            self.relation_type,
        ]
    }
}

/// Columns of the relation table in the order of [`RelationRow`]
const RELATION_COLUMNS: [&str; 8] = [
    relation::TABLE_SRC,
    relation::TABLE_DST,
    relation::TABLE_REL,
    relation::KEYFIELD_SRC,
    relation::KEYFIELD_DST,
    relation::RELFIELD_SRC,
    relation::RELFIELD_DST,
    relation::TYPE,
];

fn nullable_text(column: &str, alias: &str) -> String {
    format!("CAST({} AS Nullable(String)) AS {}", column, alias)
}

/// Backtick-quoted identifier
fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('\\', "\\\\").replace('`', "\\`"))
}

fn qualified_table(database: &str, table: &str) -> String {
    format!("{}.{}", quote_ident(database), quote_ident(table))
}

fn definition_query(database: &str, table: &str) -> String {
    format!(
        "SELECT {}, {} FROM {}",
        nullable_text(definition::NAME, "name"),
        nullable_text(definition::VALUE, "value"),
        qualified_table(database, table)
    )
}

fn relation_query(database: &str, table: &str) -> String {
    let aliases = [
        "src_table",
        "dst_table",
        "rel_table",
        "src_keyfield",
        "dst_keyfield",
        "rel_src_keyfield",
        "rel_dst_keyfield",
        "relation_type",
    ];
    let select = RELATION_COLUMNS
        .iter()
        .zip(aliases)
        .map(|(column, alias)| nullable_text(column, alias))
        .collect::<Vec<_>>()
        .join(", ");
    format!("SELECT {} FROM {}", select, qualified_table(database, table))
}

/// Source of GEONIS tables stored in a ClickHouse database
pub struct ClickHouseSource {
    client: Client,
    database: String,
}

impl ClickHouseSource {
    pub fn new(client: Client, database: impl Into<String>) -> Self {
        ClickHouseSource {
            client,
            database: database.into(),
        }
    }

    pub fn from_settings(settings: &ClickHouseSettings) -> Self {
        let client = Client::default()
            .with_url(&settings.url)
            .with_user(&settings.user)
            .with_password(&settings.password)
            .with_database(&settings.database);
        Self::new(client, settings.database.clone())
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    /// Table names of the database, keyed by their uppercased form
    async fn list_tables(&self) -> Result<HashMap<String, String>, WorkspaceError> {
        let query = format!(
            "SELECT name FROM system.tables WHERE database = '{}'",
            self.database.replace('\'', "''")
        );
        let rows: Vec<TableName> = self
            .client
            .query(&query)
            .fetch_all()
            .await
            .map_err(|e| WorkspaceError::ClickHouse {
                table: "system.tables".to_string(),
                source: e,
            })?;

        Ok(rows
            .into_iter()
            .map(|t| (t.name.to_uppercase(), t.name))
            .collect())
    }

    async fn fetch_definitions(&self, table: &str) -> Result<TableData, WorkspaceError> {
        let query = definition_query(&self.database, table);
        debug!("Fetching definitions: {}", query);

        let rows: Vec<DefinitionRow> = self
            .client
            .query(&query)
            .fetch_all()
            .await
            .map_err(|e| WorkspaceError::ClickHouse {
                table: format!("{}.{}", self.database, table),
                source: e,
            })?;

        let mut data = TableData::new([definition::NAME, definition::VALUE]);
        for row in rows {
            data.push_row([row.name, row.value]);
        }
        Ok(data)
    }

    async fn fetch_relations(&self, table: &str) -> Result<TableData, WorkspaceError> {
        let query = relation_query(&self.database, table);
        debug!("Fetching relations: {}", query);

        let rows: Vec<RelationRow> = self
            .client
            .query(&query)
            .fetch_all()
            .await
            .map_err(|e| WorkspaceError::ClickHouse {
                table: format!("{}.{}", self.database, table),
                source: e,
            })?;

        let mut data = TableData::new(RELATION_COLUMNS);
        for row in rows {
            data.push_row(row.into_values());
        }
        Ok(data)
    }

    /// Fetches the definition tables of `solutions` and the relation table.
    ///
    /// Tables that do not exist in the database are left out of the snapshot
    /// (with a warning); reading them later fails with a table-not-found
    /// error at the lookup that needs them.
    pub async fn fetch_workspace(
        &self,
        solutions: &[&str],
    ) -> Result<MemoryWorkspace, WorkspaceError> {
        let existing = self.list_tables().await?;
        let mut workspace = MemoryWorkspace::with_qualifier(self.database.clone());

        for solution in solutions {
            let name = consts::solution_definition_table(solution);
            match existing.get(&name) {
                Some(actual) => {
                    let data = self.fetch_definitions(actual).await?;
                    info!("Fetched {} rows from {}.{}", data.rows.len(), self.database, actual);
                    workspace.insert_table(&name, data);
                }
                None => warn!("{}.{} does not exist, skipping", self.database, name),
            }
        }

        match existing.get(relation::TABLE) {
            Some(actual) => {
                let data = self.fetch_relations(actual).await?;
                info!("Fetched {} rows from {}.{}", data.rows.len(), self.database, actual);
                workspace.insert_table(relation::TABLE, data);
            }
            None => warn!(
                "{}.{} does not exist, skipping",
                self.database,
                relation::TABLE
            ),
        }

        Ok(workspace)
    }
}
