pub mod consts;
pub mod definitions;
pub mod errors;
pub mod i18n;
pub mod names;
pub mod relations;

#[cfg(test)]
pub mod testing;

pub use definitions::{DefinitionTable, EleDefinitions};
pub use errors::{GeonisError, Result};
pub use i18n::{
    EnvLanguageProvider, FixedLanguage, Language, LanguageCache, LanguageProvider, LanguageSource,
};
pub use names::{EleField, EleFieldNames, EleTable, EleTableNames, NameKey, NameView};
pub use relations::{RelationRecord, RelationTable, RelationType, RelationWarning};
