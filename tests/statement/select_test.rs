use ashlar::prelude::*;

fn factory() -> Factory {
    Factory::with_defaults()
}

#[test]
fn test_basic_select() {
    let sql = factory().select().projection(["x", "y"]).from("tbl_data");
    assert_eq!(sql.generate_sql(), "SELECT `x`, `y` FROM `data`");
    assert_eq!(sql.params().len(), 0);
}

#[test]
fn test_projection_function_passthrough() {
    let sql = factory().select().projection(["COUNT(*)"]).from("tbl_data");
    assert_eq!(sql.generate_sql(), "SELECT COUNT(*) FROM `data`");
}

#[test]
fn test_from_alias_and_join() {
    let sql = factory()
        .select()
        .projection(["e.id"])
        .from_as("tbl_entries", "e")
        .join_on(
            JoinKind::Left,
            "tbl_entries_data_4",
            "f4",
            eq("e.id", "$f4.entry_id"),
        )
        .unwrap();
    assert_eq!(
        sql.generate_sql(),
        "SELECT `e`.`id` FROM `entries` AS `e` \
         LEFT JOIN `entries_data_4` AS `f4` ON `e`.`id` = `f4`.`entry_id`"
    );
    assert_eq!(sql.params().len(), 0);
}

#[test]
fn test_group_having_order_limit_offset() {
    let sql = factory()
        .select()
        .projection(["section_id"])
        .from("tbl_entries")
        .group_by(["section_id"])
        .having(gt("num", 5))
        .unwrap()
        .order_by("section_id", SortDir::Desc)
        .limit(10)
        .offset(20);
    assert_eq!(
        sql.generate_sql(),
        "SELECT `section_id` FROM `entries` GROUP BY `section_id` HAVING `num` > :num \
         ORDER BY `section_id` DESC LIMIT 10 OFFSET 20"
    );
    assert_eq!(sql.params().get("num"), Some(&Value::Int(5)));
}

#[test]
fn test_no_cache_optimizer_part() {
    let sql = factory().select().no_cache().from("tbl_entries");
    assert_eq!(sql.generate_sql(), "SELECT SQL_NO_CACHE FROM `entries`");
}

#[test]
fn test_subquery_operand_inlines_and_merges_values() {
    let sub = factory()
        .select()
        .projection(["id"])
        .from("tbl_other")
        .filter(eq("x", 5))
        .unwrap();
    let sql = factory()
        .select()
        .projection(["id"])
        .from("tbl_main")
        .filter(cmp_select("id", Op::Eq, sub))
        .unwrap();
    assert_eq!(
        sql.generate_sql(),
        "SELECT `id` FROM `main` WHERE `id` = (SELECT `id` FROM `other` WHERE `x` = :x)"
    );
    assert_eq!(sql.params().get("x"), Some(&Value::Int(5)));
    assert_eq!(sql.params().len(), 1);
}

#[test]
fn test_subquery_value_renames_rewrite_the_inlined_sql() {
    let sub = factory()
        .select()
        .projection(["id"])
        .from("tbl_other")
        .filter(eq("x", 2))
        .unwrap();
    let sql = factory()
        .select()
        .projection(["id"])
        .from("tbl_main")
        .filter(eq("x", 1))
        .unwrap()
        .filter(cmp_select("y", Op::Eq, sub))
        .unwrap();
    assert_eq!(
        sql.generate_sql(),
        "SELECT `id` FROM `main` WHERE `x` = :x AND \
         `y` = (SELECT `id` FROM `other` WHERE `x` = :x2)"
    );
    assert_eq!(sql.params().get("x"), Some(&Value::Int(1)));
    assert_eq!(sql.params().get("x2"), Some(&Value::Int(2)));
}

#[test]
fn test_in_subquery() {
    let sub = factory()
        .select()
        .projection(["entry_id"])
        .from("tbl_entries_data_4")
        .filter(eq("value", "yes"))
        .unwrap();
    let sql = factory()
        .select()
        .projection(["id"])
        .from("tbl_entries")
        .filter(in_select("id", sub))
        .unwrap();
    assert_eq!(
        sql.generate_sql(),
        "SELECT `id` FROM `entries` WHERE `id` IN \
         (SELECT `entry_id` FROM `entries_data_4` WHERE `value` = :value)"
    );
    assert_eq!(sql.params().get("value"), Some(&Value::String("yes".into())));
}

#[test]
fn test_select_usable_without_finalize_and_idempotent() {
    let sql = factory().select().projection(["x"]).from("tbl_data");
    assert_eq!(sql.generate_sql(), sql.generate_sql());
}
