//! # GEONIS Error Types
//!
//! ## Error Categories
//!
//! - **Validation errors**: bad arguments or an unusable table content
//!   (blank solution code, unknown relation type, empty definition table).
//!   Raised before or right after the load, never retried.
//! - **Load errors**: a table could not be read. They wrap the underlying
//!   [`WorkspaceError`] and name the solution or table involved.
//!
//! Duplicate relations are not errors: see
//! [`RelationWarning`](super::relations::RelationWarning).

use thiserror::Error;

use crate::workspace::WorkspaceError;

#[derive(Debug, Error)]
pub enum GeonisError {
    #[error("Invalid solution code '{solution}'")]
    InvalidSolution { solution: String },
    #[error("relation_type must be one of {expected}, got '{given}'")]
    InvalidRelationType { given: String, expected: String },
    /// The definition table holds no usable row. Rows whose key or value is
    /// NULL are skipped, so a table with only NULL values also ends up here.
    #[error("There are no definitions for the {solution} solution")]
    EmptyDefinitions { solution: String },
    #[error("Failed to read GEONIS definition table for the '{solution}' solution: {source}")]
    DefinitionLoad {
        solution: String,
        source: WorkspaceError,
    },
    #[error("Failed to read GEONIS relation table '{table}': {source}")]
    RelationLoad {
        table: String,
        source: WorkspaceError,
    },
}

impl GeonisError {
    /// Load error for the definition table of `solution`
    pub fn definition_load(solution: &str, source: WorkspaceError) -> Self {
        GeonisError::DefinitionLoad {
            solution: solution.trim().to_uppercase(),
            source,
        }
    }

    /// Load error for the relation table at `table`
    pub fn relation_load(table: impl Into<String>, source: WorkspaceError) -> Self {
        GeonisError::RelationLoad {
            table: table.into(),
            source,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            GeonisError::InvalidSolution { .. }
                | GeonisError::InvalidRelationType { .. }
                | GeonisError::EmptyDefinitions { .. }
        )
    }

    pub fn is_load(&self) -> bool {
        matches!(
            self,
            GeonisError::DefinitionLoad { .. } | GeonisError::RelationLoad { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, GeonisError>;
