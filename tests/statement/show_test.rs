use ashlar::prelude::*;

fn factory() -> Factory {
    Factory::new(Config::new("sym_"))
}

#[test]
fn test_show_tables() {
    let sql = factory().show_tables();
    assert_eq!(sql.generate_sql(), "SHOW TABLES");
    assert_eq!(sql.params().len(), 0);
}

#[test]
fn test_like_pattern_is_prefix_substituted_and_bound() {
    let sql = factory().show_tables().like("tbl_entries");
    assert_eq!(sql.generate_sql(), "SHOW TABLES LIKE ?");
    assert_eq!(
        sql.params().get_position(0),
        Some(&Value::String("sym_entries".into()))
    );
    assert_eq!(sql.params().len(), 1);
}

#[test]
fn test_like_wildcard_pattern() {
    let sql = factory().show_tables().like("tbl_%");
    assert_eq!(sql.generate_sql(), "SHOW TABLES LIKE ?");
    assert_eq!(
        sql.params().get_position(0),
        Some(&Value::String("sym_%".into()))
    );
}

#[test]
fn test_show_columns_from() {
    let sql = factory().show_columns().from("tbl_entries");
    assert_eq!(sql.generate_sql(), "SHOW COLUMNS FROM `sym_entries`");
}

#[test]
fn test_show_index_requires_from() {
    let err = factory().show_index().finalize().unwrap_err();
    assert!(matches!(err, BuildError::Structural { .. }));
}

#[test]
fn test_repeated_where_clauses_join_with_and() {
    let sql = factory()
        .show_columns()
        .from("tbl_entries")
        .filter(eq("Field", "id"))
        .unwrap()
        .filter(eq("Type", "int"))
        .unwrap();
    assert_eq!(
        sql.generate_sql(),
        "SHOW COLUMNS FROM `sym_entries` WHERE `Field` = :Field AND `Type` = :Type"
    );
    assert_eq!(sql.params().len(), 2);
}
