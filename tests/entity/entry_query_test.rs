use ashlar::prelude::*;

fn factory() -> Factory {
    Factory::with_defaults()
}

#[test]
fn test_default_schema() {
    let q = factory().entries();
    assert_eq!(q.generate_sql(), "SELECT SQL_NO_CACHE FROM `entries` AS `e`");
    assert_eq!(q.params().len(), 0);
}

#[test]
fn test_count_projection() {
    let q = factory().entries().projection(["COUNT(*)"]);
    assert_eq!(
        q.generate_sql(),
        "SELECT SQL_NO_CACHE COUNT(*) FROM `entries` AS `e`"
    );
}

#[test]
fn test_section_filter() {
    let q = factory().entries().section(4).unwrap();
    assert_eq!(
        q.generate_sql(),
        "SELECT SQL_NO_CACHE FROM `entries` AS `e` WHERE `e`.`section_id` = :e_section_id"
    );
    assert_eq!(q.params().get("e_section_id"), Some(&Value::Int(4)));
    assert_eq!(q.params().len(), 1);
    assert_eq!(q.section_id(), Some(4));
}

#[test]
fn test_entry_filter() {
    let q = factory().entries().entry(4).unwrap();
    assert_eq!(
        q.generate_sql(),
        "SELECT SQL_NO_CACHE FROM `entries` AS `e` WHERE `e`.`id` = :e_id"
    );
    assert_eq!(q.params().get("e_id"), Some(&Value::Int(4)));
}

#[test]
fn test_entries_filter() {
    let q = factory().entries().entries([4, 5, 6]).unwrap();
    assert_eq!(
        q.generate_sql(),
        "SELECT SQL_NO_CACHE FROM `entries` AS `e` WHERE `e`.`id` IN (?, ?, ?)"
    );
    let values = q.params();
    assert_eq!(values.get_position(0), Some(&Value::Int(4)));
    assert_eq!(values.get_position(1), Some(&Value::Int(5)));
    assert_eq!(values.get_position(2), Some(&Value::Int(6)));
    assert_eq!(values.len(), 3);
}

#[test]
fn test_join_field_kinds() {
    let cases = [
        (JoinKind::Plain, "JOIN"),
        (JoinKind::Inner, "INNER JOIN"),
        (JoinKind::Left, "LEFT JOIN"),
        (JoinKind::Right, "RIGHT JOIN"),
        (JoinKind::Outer, "OUTER JOIN"),
    ];
    for (kind, keyword) in cases {
        let q = factory().entries().join_field(4, kind).unwrap();
        assert_eq!(
            q.generate_sql(),
            format!(
                "SELECT SQL_NO_CACHE FROM `entries` AS `e` \
                 {keyword} `entries_data_4` AS `f4` ON `e`.`id` = `f4`.`entry_id`"
            )
        );
        assert_eq!(q.params().len(), 0);
    }
}

#[test]
fn test_joining_the_same_field_twice_creates_one_join() {
    let q = factory()
        .entries()
        .left_join_field(4)
        .unwrap()
        .left_join_field(4)
        .unwrap();
    let sql = q.generate_sql();
    assert_eq!(sql.matches("LEFT JOIN").count(), 1);
    assert_eq!(
        sql,
        "SELECT SQL_NO_CACHE FROM `entries` AS `e` \
         LEFT JOIN `entries_data_4` AS `f4` ON `e`.`id` = `f4`.`entry_id`"
    );
}

#[test]
fn test_where_field() {
    let q = factory()
        .entries()
        .where_field(4, eq("f4.value", 4))
        .unwrap();
    assert_eq!(
        q.generate_sql(),
        "SELECT SQL_NO_CACHE FROM `entries` AS `e` \
         LEFT JOIN `entries_data_4` AS `f4` ON `e`.`id` = `f4`.`entry_id` \
         WHERE `f4`.`value` = :f4_value"
    );
    assert_eq!(q.params().get("f4_value"), Some(&Value::Int(4)));
    assert_eq!(q.params().len(), 1);
}

#[test]
fn test_where_field_complex_filter() {
    let q = factory()
        .entries()
        .where_field(4, or([ne("f4.value", 4)]))
        .unwrap();
    assert_eq!(
        q.generate_sql(),
        "SELECT SQL_NO_CACHE FROM `entries` AS `e` \
         LEFT JOIN `entries_data_4` AS `f4` ON `e`.`id` = `f4`.`entry_id` \
         WHERE (`f4`.`value` != :f4_value)"
    );
}

#[test]
fn test_filter_system_id_or() {
    let q = factory()
        .entries()
        .filter("system:id", &["1", "2"], Combine::Or)
        .unwrap();
    assert_eq!(
        q.generate_sql(),
        "SELECT SQL_NO_CACHE FROM `entries` AS `e` WHERE (`e`.`id` = :e_id OR `e`.`id` = :e_id2)"
    );
    assert_eq!(q.params().get("e_id"), Some(&Value::Int(1)));
    assert_eq!(q.params().get("e_id2"), Some(&Value::Int(2)));
    assert_eq!(q.params().len(), 2);
}

#[test]
fn test_filter_system_id_and() {
    let q = factory()
        .entries()
        .filter("system:id", &["1", "2"], Combine::And)
        .unwrap();
    assert_eq!(
        q.generate_sql(),
        "SELECT SQL_NO_CACHE FROM `entries` AS `e` WHERE (`e`.`id` = :e_id AND `e`.`id` = :e_id2)"
    );
}

#[test]
fn test_filter_system_id_not_skips_empty_tokens() {
    let q = factory()
        .entries()
        .filter("system:id", &["not: 1", "2", ""], Combine::And)
        .unwrap();
    assert_eq!(
        q.generate_sql(),
        "SELECT SQL_NO_CACHE FROM `entries` AS `e` WHERE (`e`.`id` != :e_id AND `e`.`id` != :e_id2)"
    );
    assert_eq!(q.params().get("e_id"), Some(&Value::Int(1)));
    assert_eq!(q.params().get("e_id2"), Some(&Value::Int(2)));
    assert_eq!(q.params().len(), 2);
}

#[test]
fn test_filter_system_creation_date() {
    let q = factory()
        .entries()
        .filter("system:creation-date", &["2018-03-16"], Combine::Or)
        .unwrap();
    assert_eq!(
        q.generate_sql(),
        "SELECT SQL_NO_CACHE FROM `entries` AS `e` \
         WHERE ((`e`.`creation_date_gmt` >= :e_creation_date_gmt \
         AND `e`.`creation_date_gmt` <= :e_creation_date_gmt2))"
    );
    let values = q.params();
    assert_eq!(
        values.get("e_creation_date_gmt"),
        Some(&Value::String("2018-03-16 00:00:00".into()))
    );
    assert_eq!(
        values.get("e_creation_date_gmt2"),
        Some(&Value::String("2018-03-16 23:59:59".into()))
    );
    assert_eq!(values.len(), 2);
}

#[test]
fn test_filter_system_modification_date() {
    let q = factory()
        .entries()
        .filter("system:modification-date", &["2018-03-16"], Combine::Or)
        .unwrap();
    assert_eq!(
        q.generate_sql(),
        "SELECT SQL_NO_CACHE FROM `entries` AS `e` \
         WHERE ((`e`.`modification_date_gmt` >= :e_modification_date_gmt \
         AND `e`.`modification_date_gmt` <= :e_modification_date_gmt2))"
    );
    assert_eq!(q.params().len(), 2);
}

#[test]
fn test_filter_by_field_handle() {
    let q = factory()
        .entries()
        .filter("4", &["test"], Combine::Or)
        .unwrap();
    assert_eq!(
        q.generate_sql(),
        "SELECT SQL_NO_CACHE FROM `entries` AS `e` \
         LEFT JOIN `entries_data_4` AS `f4` ON `e`.`id` = `f4`.`entry_id` \
         WHERE (`f4`.`value` = :f4_value)"
    );
}

#[test]
fn test_unknown_filter_handle_is_an_error() {
    let err = factory()
        .entries()
        .filter("bogus:handle", &["x"], Combine::Or)
        .unwrap_err();
    assert!(matches!(err, BuildError::Condition(_)));
}

#[test]
fn test_sort_system_id() {
    let q = factory()
        .entries()
        .sort("system:id", Direction::Asc)
        .unwrap();
    assert_eq!(
        q.generate_sql(),
        "SELECT SQL_NO_CACHE FROM `entries` AS `e` ORDER BY `e`.`id` ASC"
    );
}

#[test]
fn test_sort_creation_date_desc() {
    let q = factory()
        .entries()
        .sort("system:creation-date", Direction::Desc)
        .unwrap();
    assert_eq!(
        q.generate_sql(),
        "SELECT SQL_NO_CACHE FROM `entries` AS `e` ORDER BY `e`.`creation_date_gmt` DESC"
    );
}

#[test]
fn test_sort_modification_date_defaults_ascending() {
    let q = factory()
        .entries()
        .sort("system:modification-date", Direction::default())
        .unwrap();
    assert_eq!(
        q.generate_sql(),
        "SELECT SQL_NO_CACHE FROM `entries` AS `e` ORDER BY `e`.`modification_date_gmt` ASC"
    );
}

#[test]
fn test_random_sort_drops_the_column_reference() {
    let q = factory()
        .entries()
        .sort("system:id", Direction::Random)
        .unwrap();
    assert_eq!(
        q.generate_sql(),
        "SELECT SQL_NO_CACHE FROM `entries` AS `e` ORDER BY RAND()"
    );
}

#[test]
fn test_finalize_applies_default_sort() {
    let stmt = factory().entries().finalize().unwrap();
    assert_eq!(
        stmt.sql,
        "SELECT SQL_NO_CACHE FROM `entries` AS `e` ORDER BY `e`.`id` ASC"
    );
    assert_eq!(stmt.params.len(), 0);
}

#[test]
fn test_finalize_keeps_an_explicit_sort() {
    let stmt = factory()
        .entries()
        .sort("system:creation-date", Direction::Desc)
        .unwrap()
        .finalize()
        .unwrap();
    assert_eq!(
        stmt.sql,
        "SELECT SQL_NO_CACHE FROM `entries` AS `e` ORDER BY `e`.`creation_date_gmt` DESC"
    );
}

#[test]
fn test_invalid_sort_handle_is_an_error() {
    let err = factory()
        .entries()
        .sort("<invalid>", Direction::Asc)
        .unwrap_err();
    assert!(matches!(err, BuildError::Condition(_)));
}
