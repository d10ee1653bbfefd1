use ashlar::prelude::*;

fn factory() -> Factory {
    Factory::new(Config::new("sym_"))
}

#[test]
fn test_insert() {
    let sql = factory().insert("tbl_insert").values([
        ("x", Value::Int(1)),
        ("y", Value::from("TEST")),
        ("z", Value::Bool(true)),
    ]);
    assert_eq!(
        sql.generate_sql(),
        "INSERT INTO `sym_insert` (`x`, `y`, `z`) VALUES (:x, :y, :z)"
    );
    let values = sql.params();
    assert_eq!(values.get("x"), Some(&Value::Int(1)));
    assert_eq!(values.get("y"), Some(&Value::String("TEST".into())));
    assert_eq!(values.get("z"), Some(&Value::Bool(true)));
    assert_eq!(values.len(), 3);
}

#[test]
fn test_insert_update_on_duplicate_key() {
    let sql = factory()
        .insert("tbl_insert")
        .values([
            ("x", Value::Int(1)),
            ("y", Value::from("TEST")),
            ("z", Value::Bool(true)),
        ])
        .update_on_duplicate_key()
        .unwrap();
    assert_eq!(
        sql.generate_sql(),
        "INSERT INTO `sym_insert` (`x`, `y`, `z`) VALUES (:x, :y, :z) \
         ON DUPLICATE KEY UPDATE `x` = VALUES(`x`), `y` = VALUES(`y`), `z` = VALUES(`z`)"
    );
    assert_eq!(sql.params().len(), 3);
}

#[test]
fn test_insert_prefix_substitution() {
    let factory = Factory::new(Config::new("prefix_"));
    let sql = factory.insert("tbl_widgets").values([
        ("x", Value::Int(1)),
        ("y", Value::from("TEST")),
        ("z", Value::Bool(true)),
    ]);
    assert_eq!(
        sql.generate_sql(),
        "INSERT INTO `prefix_widgets` (`x`, `y`, `z`) VALUES (:x, :y, :z)"
    );
}

#[test]
fn test_upsert_before_values_is_an_error() {
    let err = factory()
        .insert("tbl_insert")
        .update_on_duplicate_key()
        .unwrap_err();
    assert!(matches!(err, BuildError::Structural { .. }));
}

#[test]
fn test_validation_reports_every_missing_part() {
    let err = factory().insert("tbl_insert").finalize().unwrap_err();
    match err {
        BuildError::Structural { violations } => {
            // Both the columns part and the values part are missing.
            assert_eq!(violations.len(), 2);
        }
        other => panic!("expected structural error, got {other:?}"),
    }
}
