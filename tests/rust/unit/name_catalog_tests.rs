use gntools::geonis::{EleField, EleTable, NameKey};
use test_case::test_case;

#[test_case(EleTable::Cable, "cable", "tablename_cable", "ele_kabel" ; "cable")]
#[test_case(EleTable::Clamp, "clamp", "tablename_clamp", "ele_ds_klemme" ; "clamp")]
#[test_case(EleTable::Strand, "strand", "tablename_branch", "ele_strang" ; "strand")]
#[test_case(EleTable::SecCableVoltage, "sec_cable_voltage", "tablename_sec_cable_dense", "eles_spannung" ; "voltage")]
#[test_case(EleTable::RelRoutePipe, "rel_route_rohr", "tablename_route_pipe", "eler_route_pipe" ; "route pipe relation")]
fn test_table_entries(table: EleTable, name: &str, key: &str, default: &str) {
    assert_eq!(table.name(), name);
    assert_eq!(table.override_key(), key);
    assert_eq!(table.default_name(), default);
    assert_eq!(EleTable::from_name(name), Some(table));
}

#[test_case(EleField::RouteRef, "route_ref", "fieldname_route_ref", "trasse_ref" ; "route ref")]
#[test_case(EleField::Voltage, "voltage", "fieldname_dense", "spannung" ; "voltage")]
#[test_case(EleField::Index, "index", "fieldname_idx", "idx" ; "index")]
fn test_field_entries(field: EleField, name: &str, key: &str, default: &str) {
    assert_eq!(field.name(), name);
    assert_eq!(field.override_key(), key);
    assert_eq!(field.default_name(), default);
}

#[test]
fn test_table_keys_share_prefix() {
    assert!(EleTable::ALL
        .iter()
        .all(|t| t.override_key().starts_with("tablename_")));
    assert!(EleField::ALL
        .iter()
        .all(|f| f.override_key().starts_with("fieldname_")));
}

#[test]
fn test_derived_field_names_are_not_catalogue_entries() {
    assert_eq!(EleField::from_name("name_number"), None);
    assert_eq!(EleField::from_name("description"), None);
}
