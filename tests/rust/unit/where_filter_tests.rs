use gntools::workspace::Where;

#[test]
fn test_sql_rendering_escapes_quotes() {
    let filter = Where::field("RELATIONTYPE").equals("o'neil");
    assert_eq!(filter.column(), "RELATIONTYPE");
    assert_eq!(filter.value(), "o'neil");
    assert_eq!(filter.to_sql(), "RELATIONTYPE = 'o''neil'");
}

#[test]
fn test_null_never_matches() {
    let filter = Where::field("RELATIONTYPE").equals("relate");
    assert!(filter.matches(Some("relate")));
    assert!(!filter.matches(Some("RELATE")));
    assert!(!filter.matches(None));
}
