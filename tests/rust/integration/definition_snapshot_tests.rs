use std::io::Write;

use gntools::geonis::{
    DefinitionTable, EleDefinitions, EleField, EleTable, GeonisError, Language, LanguageSource,
};
use gntools::workspace::{MemoryWorkspace, TableData, Workspace, WorkspaceError};

const SNAPSHOT: &str = r#"
qualifier: gis.sde
tables:
  GNELE_DEFINITION:
    columns: [NAME, VALUE]
    rows:
      - [tablename_cable, custom_kabel]
      - [tablename_sec_cable_dense, eles_voltage]
      - [fieldname_route_ref, route_id]
      - [fieldname_length, ~]
  GNGAS_DEFINITION:
    columns: [NAME, VALUE]
"#;

fn snapshot_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_ele_names_from_snapshot() {
    let file = snapshot_file(SNAPSHOT);
    let workspace = MemoryWorkspace::from_yaml_file(file.path()).unwrap();
    let ele =
        EleDefinitions::with_language(&workspace, LanguageSource::fixed(Some(Language::English)))
            .unwrap();

    let tables = ele.tables();
    assert_eq!(tables.get(EleTable::Cable), "custom_kabel");
    assert_eq!(tables.get(EleTable::Clamp), "ele_ds_klemme");

    let fields = ele.fields();
    assert_eq!(fields.get(EleField::RouteRef), "route_id");
    // NULL values are not overrides
    assert_eq!(fields.get(EleField::Length), "laenge");
    assert!(!fields.is_overridden(EleField::Length));
    // The voltage table is renamed, so the English field name applies
    assert_eq!(fields.name_number(), "name_number");
    assert_eq!(fields.description(), "description_e");
}

#[test]
fn test_empty_solution_table_from_snapshot() {
    let workspace = MemoryWorkspace::from_yaml_str(SNAPSHOT).unwrap();
    let err = DefinitionTable::load(&workspace, "gas").unwrap_err();
    assert!(err.is_validation());
    assert_eq!(err.to_string(), "There are no definitions for the GAS solution");
}

#[test]
fn test_missing_solution_table_from_snapshot() {
    let workspace = MemoryWorkspace::from_yaml_str(SNAPSHOT).unwrap();
    let err = DefinitionTable::load(&workspace, "wat").unwrap_err();
    assert!(err.is_load());
    match err {
        GeonisError::DefinitionLoad { solution, source } => {
            assert_eq!(solution, "WAT");
            match source {
                WorkspaceError::TableNotFound { table } => {
                    assert_eq!(table, "gis.sde.GNWAT_DEFINITION")
                }
                other => panic!("unexpected workspace error: {}", other),
            }
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_snapshot_save_and_reload() {
    let mut workspace = MemoryWorkspace::with_qualifier("gis");
    workspace.insert_table(
        "GNELE_DEFINITION",
        TableData::new(["NAME", "VALUE"]).with_row([Some("tablename_route"), Some("trench")]),
    );

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("workspace.yaml");
    workspace.save_yaml_file(&path).unwrap();

    let reloaded = MemoryWorkspace::from_yaml_file(&path).unwrap();
    assert_eq!(reloaded, workspace);
    assert_eq!(reloaded.make_path("X").as_str(), "gis.X");

    let ele = EleDefinitions::with_language(&reloaded, LanguageSource::fixed(None)).unwrap();
    assert_eq!(ele.tables().get(EleTable::Route), "trench");
    assert_eq!(ele.fields().name_number(), "name_nummer");
    assert_eq!(ele.fields().description(), "description_d");
}

#[test]
fn test_broken_snapshot_is_reported() {
    let file = snapshot_file("tables: [not, a, map]");
    let err = MemoryWorkspace::from_yaml_file(file.path()).unwrap_err();
    assert!(matches!(err, WorkspaceError::Snapshot(_)));

    let err = MemoryWorkspace::from_yaml_file("/nonexistent/gntools.yaml").unwrap_err();
    assert!(matches!(err, WorkspaceError::Io(_)));
}
