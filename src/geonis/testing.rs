//! Workspace fixtures for unit tests

use super::consts::{self, definition, relation};
use crate::workspace::{MemoryWorkspace, Row, TableData};

fn definition_table(overrides: &[(&str, &str)]) -> TableData {
    let mut data = TableData::new([definition::NAME, definition::VALUE]);
    for (key, value) in overrides {
        data.push_row([Some(*key), Some(*value)]);
    }
    data
}

/// Workspace holding only the definition table of `solution`
pub fn definition_workspace(solution: &str, overrides: &[(&str, &str)]) -> MemoryWorkspace {
    MemoryWorkspace::new().with_table(
        &consts::solution_definition_table(solution),
        definition_table(overrides),
    )
}

pub fn qualified_definition_workspace(
    qualifier: &str,
    solution: &str,
    overrides: &[(&str, &str)],
) -> MemoryWorkspace {
    MemoryWorkspace::with_qualifier(qualifier).with_table(
        &consts::solution_definition_table(solution),
        definition_table(overrides),
    )
}

/// Definition table with columns but no rows
pub fn empty_definition_workspace(solution: &str) -> MemoryWorkspace {
    definition_workspace(solution, &[])
}

/// One `GNREL_DEFINITION` row in column order
#[allow(clippy::too_many_arguments)]
pub fn relation_row(
    src_table: &str,
    dst_table: &str,
    rel_table: Option<&str>,
    src_keyfield: &str,
    dst_keyfield: &str,
    rel_src_keyfield: Option<&str>,
    rel_dst_keyfield: Option<&str>,
    relation_type: &str,
) -> Row {
    [
        Some(src_table),
        Some(dst_table),
        rel_table,
        Some(src_keyfield),
        Some(dst_keyfield),
        rel_src_keyfield,
        rel_dst_keyfield,
        Some(relation_type),
    ]
    .into_iter()
    .map(|v| v.map(str::to_string))
    .collect()
}

/// Workspace holding only the relation table
pub fn relation_workspace(rows: &[Row]) -> MemoryWorkspace {
    let mut data = TableData::new([
        relation::TABLE_SRC,
        relation::TABLE_DST,
        relation::TABLE_REL,
        relation::KEYFIELD_SRC,
        relation::KEYFIELD_DST,
        relation::RELFIELD_SRC,
        relation::RELFIELD_DST,
        relation::TYPE,
    ]);
    data.rows.extend_from_slice(rows);
    MemoryWorkspace::new().with_table(relation::TABLE, data)
}
