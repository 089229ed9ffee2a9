use gntools::geonis::{
    EleDefinitions, EleTable, GeonisError, LanguageSource, RelationTable, RelationType,
};
use gntools::workspace::MemoryWorkspace;

const SNAPSHOT: &str = r#"
tables:
  GNELE_DEFINITION:
    columns: [NAME, VALUE]
    rows:
      - [tablename_cable, custom_kabel]
  GNREL_DEFINITION:
    columns: [SRC_TABLE, DST_TABLE, REL_TABLE, SRC_KEYFIELD, DST_KEYFIELD, REL_SRC_KEYFIELD, REL_DST_KEYFIELD, RELATIONTYPE]
    rows:
      - [custom_kabel, ele_ds_klemme, ~, id, kabel_ref, ~, ~, relate]
      - [ele_trasse, custom_kabel, eler_trasse_kabel, id, id, trasse_ref, kabel_ref, relate]
      - [Custom_Kabel , ele_muffe, ~, id, kabel_ref, ~, ~, relate]
      - [ele_leuchte, elet_leuchte, ~, id, ref, ~, ~, label]
      - [~, ele_rohr, ~, id, rohr_ref, ~, ~, relate]
"#;

#[test]
fn test_cable_relations_through_resolved_names() {
    let workspace = MemoryWorkspace::from_yaml_str(SNAPSHOT).unwrap();
    let ele = EleDefinitions::with_language(&workspace, LanguageSource::fixed(None)).unwrap();
    let relations = RelationTable::load(&workspace, RelationType::Relate, false).unwrap();

    let cable = ele.tables().get(EleTable::Cable);
    let clamp = ele.tables().get(EleTable::Clamp);
    let rec = relations.get(cable).unwrap();
    assert_eq!(rec.target_table.as_deref(), Some("ELE_DS_KLEMME"));
    assert!(rec.target_table.as_deref().unwrap().eq_ignore_ascii_case(clamp));
    assert_eq!(rec.source_field.as_deref(), Some("ID"));
    assert_eq!(rec.target_field.as_deref(), Some("KABEL_REF"));
    assert_eq!(rec.relate_table, None);

    // The second custom_kabel row is dropped with a warning
    assert_eq!(relations.len(), 2);
    assert_eq!(relations.warnings().len(), 1);
    assert_eq!(relations.warnings()[0].table, "CUSTOM_KABEL");
}

#[test]
fn test_reverse_relations_key_by_target() {
    let workspace = MemoryWorkspace::from_yaml_str(SNAPSHOT).unwrap();
    let reverse = RelationTable::load_named(&workspace, "relate", true).unwrap();

    assert!(reverse.is_reversed());
    let rec = reverse.get("custom_kabel").unwrap();
    assert_eq!(rec.target_table.as_deref(), Some("ELE_TRASSE"));
    assert_eq!(rec.relate_table.as_deref(), Some("ELER_TRASSE_KABEL"));
    assert_eq!(rec.relate_source.as_deref(), Some("KABEL_REF"));
    assert_eq!(rec.relate_target.as_deref(), Some("TRASSE_REF"));
    assert!(reverse.contains("ELE_ROHR"));
    assert!(reverse.contains("ele_ds_klemme"));
    assert!(reverse.contains("ele_muffe"));
    assert!(!reverse.contains("ele_trasse"));
    assert!(reverse.warnings().is_empty());
}

#[test]
fn test_label_relations_only() {
    let workspace = MemoryWorkspace::from_yaml_str(SNAPSHOT).unwrap();
    let labels = RelationTable::load(&workspace, RelationType::Label, false).unwrap();
    assert_eq!(labels.len(), 1);
    let (table, rec) = labels.iter().next().unwrap();
    assert_eq!(table, "ELE_LEUCHTE");
    assert_eq!(rec.relate_type.as_deref(), Some("LABEL"));
    assert!(rec.has_data());
}

#[test]
fn test_unknown_relation_type_is_rejected() {
    let workspace = MemoryWorkspace::from_yaml_str(SNAPSHOT).unwrap();
    let err = RelationTable::load_named(&workspace, "parent", false).unwrap_err();
    assert!(matches!(err, GeonisError::InvalidRelationType { .. }));
}

#[test]
fn test_workspace_without_relation_table() {
    let workspace = MemoryWorkspace::new();
    let err = RelationTable::load(&workspace, RelationType::Plan, true).unwrap_err();
    assert!(err.is_load());
}
