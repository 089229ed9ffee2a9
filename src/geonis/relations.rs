//! GEONIS table relationships.
//!
//! The global `GNREL_DEFINITION` table describes the foreign-key relations
//! between GEONIS tables. [`RelationTable`] reads the relations of one
//! [`RelationType`] into a lookup keyed by source table name, or by target
//! table name when loaded in reverse.
//!
//! All names are trimmed and uppercased while loading. A table is expected to
//! take part in at most one relation of a given type: later rows for the same
//! key are dropped and reported as [`RelationWarning`]s.

use std::collections::hash_map;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::consts::relation;
use super::errors::{GeonisError, Result};
use crate::workspace::{Row, RowHandler, RowLookup, Where, Workspace};

/// Relationship type codes known to GEONIS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationType {
    Aggregate,
    Composite,
    Datalink,
    Entity,
    Label,
    Plan,
    Relate,
    Shapegroup,
}

impl RelationType {
    pub const ALL: [RelationType; 8] = [
        RelationType::Aggregate,
        RelationType::Composite,
        RelationType::Datalink,
        RelationType::Entity,
        RelationType::Label,
        RelationType::Plan,
        RelationType::Relate,
        RelationType::Shapegroup,
    ];

    /// Code stored in the type column of the relation table
    pub fn as_str(self) -> &'static str {
        match self {
            RelationType::Aggregate => "aggregate",
            RelationType::Composite => "composite",
            RelationType::Datalink => "datalink",
            RelationType::Entity => "entity",
            RelationType::Label => "label",
            RelationType::Plan => "plan",
            RelationType::Relate => "relate",
            RelationType::Shapegroup => "shapegroup",
        }
    }

    /// "aggregate, composite, ... or shapegroup"
    fn expected() -> String {
        let codes: Vec<_> = Self::ALL.iter().map(|t| t.as_str()).collect();
        let (rest, last) = codes.split_at(codes.len() - 1);
        format!("{} or {}", rest.join(", "), last.join(""))
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationType {
    type Err = GeonisError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| GeonisError::InvalidRelationType {
                given: s.to_string(),
                expected: Self::expected(),
            })
    }
}

/// One relation of a source table.
///
/// The source table itself is the key under which the record is stored in
/// a [`RelationTable`]. The relate fields are only set for n:m relations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationRecord {
    /// Target/destination table that stores the foreign key field
    pub target_table: Option<String>,
    /// Relation table (n:m only)
    pub relate_table: Option<String>,
    /// Primary key field in the source table
    pub source_field: Option<String>,
    /// Foreign key field in the target table
    pub target_field: Option<String>,
    /// Source reference field in the relation table (n:m only)
    pub relate_source: Option<String>,
    /// Target reference field in the relation table (n:m only)
    pub relate_target: Option<String>,
    /// Relationship type as read from the table
    pub relate_type: Option<String>,
}

impl RelationRecord {
    /// Builds a record from values in field order; missing values are NULL
    /// and values beyond the seventh are ignored
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<String>>,
    {
        let mut values = values.into_iter();
        let mut next = || values.next().flatten();
        RelationRecord {
            target_table: next(),
            relate_table: next(),
            source_field: next(),
            target_field: next(),
            relate_source: next(),
            relate_target: next(),
            relate_type: next(),
        }
    }

    /// True if every field is NULL
    pub fn is_empty(&self) -> bool {
        self.target_table.is_none()
            && self.relate_table.is_none()
            && self.source_field.is_none()
            && self.target_field.is_none()
            && self.relate_source.is_none()
            && self.relate_target.is_none()
            && self.relate_type.is_none()
    }

    /// True if at least one field is set
    pub fn has_data(&self) -> bool {
        !self.is_empty()
    }
}

/// A table found in more than one relation of the same type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationWarning {
    pub table: String,
    pub relation_type: String,
}

impl fmt::Display for RelationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Source table '{}' participates in multiple {} relationships",
            self.table, self.relation_type
        )
    }
}

/// Trimmed and uppercased text, NULL stays NULL
fn normalize(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_uppercase())
}

/// Turns relation rows into records, keeping the first row per key
#[derive(Debug, Default)]
struct RelationRows {
    warnings: Vec<RelationWarning>,
}

impl RowHandler for RelationRows {
    type Value = RelationRecord;

    fn handle_row(&mut self, row: Row, entries: &mut HashMap<String, RelationRecord>) {
        let mut values = row.into_iter().map(normalize);
        let key = match values.next().flatten() {
            Some(key) if !key.is_empty() => key,
            _ => return,
        };
        let record = RelationRecord::from_values(values);

        match entries.entry(key) {
            hash_map::Entry::Occupied(entry) => {
                let warning = RelationWarning {
                    table: entry.key().clone(),
                    relation_type: record.relate_type.clone().unwrap_or_default(),
                };
                warn!("{}", warning);
                self.warnings.push(warning);
            }
            hash_map::Entry::Vacant(entry) => {
                entry.insert(record);
            }
        }
    }
}

/// Column names for one reading direction
struct RelationColumns {
    key: &'static str,
    values: [&'static str; 7],
}

impl RelationColumns {
    fn new(reverse: bool) -> Self {
        let (src_table, dst_table, src_field, dst_field, src_rel, dst_rel) = if reverse {
            (
                relation::TABLE_DST,
                relation::TABLE_SRC,
                relation::KEYFIELD_DST,
                relation::KEYFIELD_SRC,
                relation::RELFIELD_DST,
                relation::RELFIELD_SRC,
            )
        } else {
            (
                relation::TABLE_SRC,
                relation::TABLE_DST,
                relation::KEYFIELD_SRC,
                relation::KEYFIELD_DST,
                relation::RELFIELD_SRC,
                relation::RELFIELD_DST,
            )
        };

        RelationColumns {
            key: src_table,
            values: [
                dst_table,
                relation::TABLE_REL,
                src_field,
                dst_field,
                src_rel,
                dst_rel,
                relation::TYPE,
            ],
        }
    }
}

/// Relations of one type, keyed by uppercase table name
#[derive(Debug, Clone)]
pub struct RelationTable {
    relation_type: RelationType,
    reverse: bool,
    relations: RowLookup<RelationRecord>,
    warnings: Vec<RelationWarning>,
}

impl RelationTable {
    /// Reads all relations of `relation_type` in one scan.
    ///
    /// Keys are source table names; with `reverse` they are target table
    /// names and every source/target pair in the records is swapped.
    pub fn load<W: Workspace + ?Sized>(
        workspace: &W,
        relation_type: RelationType,
        reverse: bool,
    ) -> Result<Self> {
        let table = workspace.make_path(relation::TABLE);
        let filter = Where::field(relation::TYPE).equals(relation_type.as_str());
        let columns = RelationColumns::new(reverse);

        let mut rows = RelationRows::default();
        let relations = RowLookup::load(
            workspace,
            &table,
            columns.key,
            &columns.values,
            Some(&filter),
            &mut rows,
        )
        .map_err(|e| GeonisError::relation_load(table.to_string(), e))?;

        info!(
            "Loaded {} {} relations from {}{}",
            relations.len(),
            relation_type,
            table,
            if reverse { " (reversed)" } else { "" }
        );
        Ok(RelationTable {
            relation_type,
            reverse,
            relations,
            warnings: rows.warnings,
        })
    }

    /// Like [`RelationTable::load`] for a relation type code given as text.
    /// Unknown codes fail before the workspace is touched.
    pub fn load_named<W: Workspace + ?Sized>(
        workspace: &W,
        relation_type: &str,
        reverse: bool,
    ) -> Result<Self> {
        let relation_type = relation_type.parse()?;
        Self::load(workspace, relation_type, reverse)
    }

    pub fn relation_type(&self) -> RelationType {
        self.relation_type
    }

    pub fn is_reversed(&self) -> bool {
        self.reverse
    }

    /// Relation of `table`; the name is matched trimmed and case-insensitive
    pub fn get(&self, table: &str) -> Option<&RelationRecord> {
        self.relations.get(&table.trim().to_uppercase())
    }

    pub fn contains(&self, table: &str) -> bool {
        self.get(table).is_some()
    }

    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RelationRecord)> {
        self.relations.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Duplicate relations dropped while loading
    pub fn warnings(&self) -> &[RelationWarning] {
        &self.warnings
    }
}
