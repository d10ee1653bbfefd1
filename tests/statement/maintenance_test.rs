use ashlar::prelude::*;

fn factory() -> Factory {
    Factory::new(Config::new("sym_"))
}

#[test]
fn test_optimize() {
    let stmt = factory().optimize("tbl_entries").finalize().unwrap();
    assert_eq!(stmt.sql, "OPTIMIZE TABLE `sym_entries`");
    assert_eq!(stmt.params.len(), 0);
}

#[test]
fn test_truncate() {
    let stmt = factory().truncate("tbl_entries").finalize().unwrap();
    assert_eq!(stmt.sql, "TRUNCATE TABLE `sym_entries`");
    assert_eq!(stmt.params.len(), 0);
}

#[test]
fn test_unprefixed_table_passes_through() {
    let stmt = factory().truncate("sessions").finalize().unwrap();
    assert_eq!(stmt.sql, "TRUNCATE TABLE `sessions`");
}
