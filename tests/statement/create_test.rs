use ashlar::prelude::*;

fn factory() -> Factory {
    Factory::new(Config::new("sym_"))
}

#[test]
fn test_create_table() {
    let sql = factory()
        .create("tbl_entries")
        .if_not_exists()
        .engine("InnoDB")
        .charset("utf8mb4")
        .collate("utf8mb4_unicode_ci")
        .fields([
            ColumnDef::new("id", "int(11)").auto_increment(),
            ColumnDef::new("title", "varchar(255)").default_value("untitled"),
            ColumnDef::new("status", "enum")
                .enum_values(["draft", "published"])
                .default_value("draft"),
            ColumnDef::new("created", "datetime"),
        ])
        .unwrap()
        .keys([KeyDef::primary(["id"]), KeyDef::key("title")])
        .unwrap();
    insta::assert_snapshot!(
        sql.generate_sql(),
        @"CREATE TABLE IF NOT EXISTS `sym_entries` (`id` int(11) unsigned NOT NULL AUTO_INCREMENT, `title` varchar(255) COLLATE utf8mb4_unicode_ci NOT NULL DEFAULT 'untitled', `status` enum('draft', 'published') COLLATE utf8mb4_unicode_ci NOT NULL DEFAULT 'draft', `created` datetime NOT NULL, PRIMARY KEY (`id`), KEY `title` (`title`)) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci"
    );
    assert_eq!(sql.params().len(), 0);
}

#[test]
fn test_create_minimal() {
    let sql = factory()
        .create("tbl_cache")
        .fields([
            ColumnDef::new("hash", "varchar(32)"),
            ColumnDef::new("data", "text").nullable(),
        ])
        .unwrap();
    assert_eq!(
        sql.generate_sql(),
        "CREATE TABLE `sym_cache` (`hash` varchar(32) NOT NULL, `data` text DEFAULT NULL)"
    );
}

#[test]
fn test_nullable_signed_column() {
    let sql = factory()
        .create("tbl_scores")
        .fields([ColumnDef::new("delta", "int(11)").signed().nullable()])
        .unwrap();
    assert_eq!(
        sql.generate_sql(),
        "CREATE TABLE `sym_scores` (`delta` int(11) DEFAULT NULL)"
    );
}

#[test]
fn test_create_without_fields_fails_validation() {
    let err = factory().create("tbl_empty").finalize().unwrap_err();
    assert!(matches!(err, BuildError::Structural { .. }));
}
