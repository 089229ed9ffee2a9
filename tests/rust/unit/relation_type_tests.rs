use gntools::geonis::{GeonisError, RelationType};
use test_case::test_case;

#[test_case("aggregate", RelationType::Aggregate ; "aggregate")]
#[test_case("composite", RelationType::Composite ; "composite")]
#[test_case("datalink", RelationType::Datalink ; "datalink")]
#[test_case("entity", RelationType::Entity ; "entity")]
#[test_case("label", RelationType::Label ; "label")]
#[test_case("plan", RelationType::Plan ; "plan")]
#[test_case("relate", RelationType::Relate ; "relate")]
#[test_case("shapegroup", RelationType::Shapegroup ; "shapegroup")]
fn test_known_codes(code: &str, expected: RelationType) {
    let parsed: RelationType = code.parse().unwrap();
    assert_eq!(parsed, expected);
    assert_eq!(parsed.to_string(), code);
}

#[test_case("" ; "empty")]
#[test_case("Relate" ; "capitalised")]
#[test_case(" relate" ; "leading blank")]
#[test_case("1:n" ; "cardinality")]
#[test_case("shape_group" ; "underscored")]
fn test_unknown_codes_are_validation_errors(code: &str) {
    let err = code.parse::<RelationType>().unwrap_err();
    assert!(err.is_validation());
    assert!(!err.is_load());
    match err {
        GeonisError::InvalidRelationType { given, expected } => {
            assert_eq!(given, code);
            assert!(expected.starts_with("aggregate, "));
            assert!(expected.ends_with(" or shapegroup"));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_all_codes_are_distinct() {
    let mut codes: Vec<_> = RelationType::ALL.iter().map(|t| t.as_str()).collect();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), 8);
}
