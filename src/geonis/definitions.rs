//! GEONIS definition tables.
//!
//! The GEONIS data model uses German object names by default. A deployment
//! can rename tables and fields by storing overrides in the definition table
//! of a solution (`GN<SOLUTION>_DEFINITION`, e.g. `GNELE_DEFINITION`).
//! [`DefinitionTable`] reads all overrides of one solution in a single scan;
//! [`EleDefinitions`] adds the name catalogues of the electric solution.
//!
//! # Example
//!
//! ```
//! use gntools::geonis::{EleDefinitions, EleTable, LanguageSource};
//! use gntools::workspace::{MemoryWorkspace, TableData};
//!
//! let workspace = MemoryWorkspace::new().with_table(
//!     "GNELE_DEFINITION",
//!     TableData::new(["NAME", "VALUE"]).with_row([Some("tablename_cable"), Some("custom_kabel")]),
//! );
//!
//! let ele = EleDefinitions::with_language(&workspace, LanguageSource::fixed(None)).unwrap();
//! assert_eq!(ele.tables().get(EleTable::Cable), "custom_kabel");
//! assert_eq!(ele.tables().get(EleTable::Clamp), "ele_ds_klemme");
//! ```

use std::ops::Deref;

use log::info;

use super::consts::{self, definition};
use super::errors::{GeonisError, Result};
use super::i18n::LanguageSource;
use super::names::{EleFieldNames, EleTableNames};
use crate::workspace::{ValueLookup, Workspace};

/// Object-name overrides of one GEONIS solution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionTable {
    solution: String,
    overrides: ValueLookup,
}

impl DefinitionTable {
    /// Reads the definition table of `solution` (case-insensitive, e.g. `ele`).
    ///
    /// Fails with a load error if the table cannot be read and with a
    /// validation error if it holds no definitions at all.
    pub fn load<W: Workspace + ?Sized>(workspace: &W, solution: &str) -> Result<Self> {
        let code = solution.trim();
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(GeonisError::InvalidSolution {
                solution: solution.to_string(),
            });
        }

        let table = workspace.make_path(&consts::solution_definition_table(code));
        let overrides = ValueLookup::load(workspace, &table, definition::NAME, definition::VALUE)
            .map_err(|e| GeonisError::definition_load(code, e))?;

        if overrides.is_empty() {
            return Err(GeonisError::EmptyDefinitions {
                solution: code.to_uppercase(),
            });
        }

        info!("Loaded {} definitions from {}", overrides.len(), table);
        Ok(DefinitionTable {
            solution: code.to_lowercase(),
            overrides,
        })
    }

    /// Lowercase solution code this table belongs to
    pub fn solution(&self) -> &str {
        &self.solution
    }

    /// Override stored for `key`, or `default` if there is none
    pub fn get<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.overrides.get(key).unwrap_or(default)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.overrides.contains(key)
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    /// Always false for a loaded table
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.overrides.iter()
    }
}

/// Definitions of the electric solution (`ELE`)
#[derive(Debug, Clone)]
pub struct EleDefinitions {
    definitions: DefinitionTable,
    language: LanguageSource,
}

impl EleDefinitions {
    /// Loads `GNELE_DEFINITION`; the description field follows the
    /// process-wide language
    pub fn load<W: Workspace + ?Sized>(workspace: &W) -> Result<Self> {
        Self::with_language(workspace, LanguageSource::process())
    }

    pub fn with_language<W: Workspace + ?Sized>(
        workspace: &W,
        language: LanguageSource,
    ) -> Result<Self> {
        Ok(EleDefinitions {
            definitions: DefinitionTable::load(workspace, consts::MEDIA_ELECTRIC)?,
            language,
        })
    }

    /// Table names of the electric solution
    pub fn tables(&self) -> EleTableNames<'_> {
        EleTableNames::new(&self.definitions)
    }

    /// Field names of the electric solution
    pub fn fields(&self) -> EleFieldNames<'_> {
        EleFieldNames::new(&self.definitions, &self.language)
    }

    pub fn definitions(&self) -> &DefinitionTable {
        &self.definitions
    }
}

impl Deref for EleDefinitions {
    type Target = DefinitionTable;

    fn deref(&self) -> &DefinitionTable {
        &self.definitions
    }
}
