//! Physical names of the GEONIS system tables and their columns.
//!
//! These mirror the geodatabase schema GEONIS creates and must not be
//! changed independently of it.

/// Media code of the electric solution
pub const MEDIA_ELECTRIC: &str = "ELE";

/// Builds the definition table name of a solution, e.g. `GNELE_DEFINITION`
pub fn solution_definition_table(solution: &str) -> String {
    format!("GN{}_DEFINITION", solution.trim().to_uppercase())
}

/// Columns of the `GN<SOLUTION>_DEFINITION` tables
pub mod definition {
    /// Override key (e.g. `tablename_cable`)
    pub const NAME: &str = "NAME";
    /// Object name used in the database
    pub const VALUE: &str = "VALUE";
}

/// The global relationship definition table and its columns
pub mod relation {
    pub const TABLE: &str = "GNREL_DEFINITION";

    pub const TYPE: &str = "RELATIONTYPE";
    pub const TABLE_SRC: &str = "SRC_TABLE";
    pub const TABLE_DST: &str = "DST_TABLE";
    /// Only set for n:m relationships
    pub const TABLE_REL: &str = "REL_TABLE";
    pub const KEYFIELD_SRC: &str = "SRC_KEYFIELD";
    pub const KEYFIELD_DST: &str = "DST_KEYFIELD";
    pub const RELFIELD_SRC: &str = "REL_SRC_KEYFIELD";
    pub const RELFIELD_DST: &str = "REL_DST_KEYFIELD";
}

/// Description field names per GEONIS language
pub mod description {
    pub const CUSTOM: &str = "description_c";
    pub const DE: &str = "description_d";
    pub const EN: &str = "description_e";
    pub const FR: &str = "description_f";
    pub const IT: &str = "description_i";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solution_definition_table() {
        assert_eq!(solution_definition_table("ele"), "GNELE_DEFINITION");
        assert_eq!(solution_definition_table(" Gas "), "GNGAS_DEFINITION");
        assert_eq!(solution_definition_table(MEDIA_ELECTRIC), "GNELE_DEFINITION");
    }
}
