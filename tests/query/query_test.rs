//! Query text rendering tests.
//!
//! Rendered filters and orders are checked against exact text and parsed
//! with sqlparser to make sure they stay valid generic SQL.

use std::sync::Arc;

use chrono::NaiveDate;
use insta::assert_snapshot;
use quickreport::config::Settings;
use quickreport::model::RowType;
use quickreport::query::{
    render_condition, render_filter, select_statement, Condition, LikeDirection, OrderSpec,
    QueryBuilder, SortDir,
};
use quickreport::registry::TypeRegistry;
use quickreport::schema::{SourceType, TypeTag, Value};
use quickreport::synth::{ArtifactStore, RowTypeSynthesizer};
use sqlparser::dialect::GenericDialect;
use sqlparser::parser::Parser;

fn validate_where(filter: &str) -> Result<(), String> {
    let sql = format!("SELECT * FROM t WHERE {}", filter);
    Parser::parse_sql(&GenericDialect {}, &sql)
        .map(|_| ())
        .map_err(|e| format!("Invalid SQL: {}\nSQL: {}", e, sql))
}

fn validate_order(order: &str) -> Result<(), String> {
    let sql = format!("SELECT * FROM t ORDER BY {}", order);
    Parser::parse_sql(&GenericDialect {}, &sql)
        .map(|_| ())
        .map_err(|e| format!("Invalid SQL: {}\nSQL: {}", e, sql))
}

fn customer_row_type() -> Arc<RowType> {
    let registry = TypeRegistry::new();
    let settings = Settings::default();
    let artifacts = ArtifactStore::disabled();
    RowTypeSynthesizer::new(&registry, &settings, &artifacts)
        .synthesize(
            &SourceType::new("Customer")
                .field("id", TypeTag::Int32)
                .field("name", TypeTag::Text)
                .field("createdAt", TypeTag::Date),
        )
        .unwrap()
}

#[test]
fn test_condition_validation() {
    assert!(Condition::equals_to(None, Some(Value::from(5))).is_none());
    assert!(Condition::equals_to(Some("col"), None).is_none());
    assert!(Condition::is_null(None).is_none());

    let is_null = Condition::is_null(Some("col")).unwrap();
    assert!(is_null.right_value().is_none());
    assert!(Condition::is_not_null(Some("col")).is_some());
}

#[test]
fn test_null_value_drops_condition() {
    let discount: Option<i32> = None;
    let filter = render_filter(&[
        Condition::equals_to(Some("discount"), Some(Value::from(discount))),
        Condition::like(LikeDirection::Center, Some("name"), Some(Value::Null)),
        Condition::equals_to(Some("id"), Some(Value::from(5))),
    ]);

    assert_eq!(filter, " ( id = 5 ) ");
}

#[test]
fn test_like_wrapping() {
    let value = || Some(Value::from("x"));
    let left = Condition::like(LikeDirection::Left, Some("col"), value()).unwrap();
    let right = Condition::like(LikeDirection::Right, Some("col"), value()).unwrap();
    let center = Condition::not_like(LikeDirection::Center, Some("col"), value()).unwrap();

    assert_eq!(left.right_value(), Some(&Value::from("%x")));
    assert_eq!(right.right_value(), Some(&Value::from("x%")));
    assert_eq!(center.right_value(), Some(&Value::from("%x%")));
}

#[test]
fn test_combination_skips_absent() {
    let filter = render_filter(&[
        Condition::equals_to(Some("col1"), Some(Value::from(5))),
        Condition::equals_to(None, Some(Value::from(1))),
        Condition::is_not_null(Some("col2")),
    ]);

    assert_eq!(filter, " ( col1 = 5 )  AND  ( col2 IS NOT NULL  ) ");
    validate_where(&filter).unwrap();
}

#[test]
fn test_every_operator_renders_valid_sql() {
    let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
    let builder = QueryBuilder::new()
        .condition(Condition::is_null(Some("deletedAt")))
        .condition(Condition::not_equals_to(Some("status"), Some(Value::from("closed"))))
        .condition(Condition::greater_than(false, Some("amount"), Some(Value::from(10.5))))
        .condition(Condition::less_than(true, Some("createdAt"), Some(Value::from(date))))
        .condition(Condition::like(LikeDirection::Center, Some("name"), Some(Value::from("ann"))))
        .condition(Condition::in_list(Some("id"), Some(Value::from(vec![1, 2, 3]))))
        .condition(Condition::not_in_list(Some("region"), Some(Value::from(vec!["N", "S"]))));

    let filter = builder.filter_text();
    validate_where(&filter).unwrap();
    assert_snapshot!(filter.trim(), @"( deletedAt IS NULL  )  AND  ( status <> 'closed' )  AND  ( amount > 10.5 )  AND  ( createdAt <= TO_DATE('2024-01-31 00:00:00', 'YYYY-MM-DD HH24:MI:SS') )  AND  ( name LIKE '%ann%' )  AND  ( id IN (1, 2, 3) )  AND  ( region NOT IN ('N', 'S') )");
}

#[test]
fn test_text_is_not_escaped() {
    let filter = render_filter(&[Condition::equals_to(
        Some("name"),
        Some(Value::from("O'Brien")),
    )]);
    assert_eq!(filter, " ( name = 'O'Brien' ) ");
}

#[test]
fn test_orders() {
    let builder = QueryBuilder::new()
        .order(OrderSpec::order_by(SortDir::Asc, Some("name")))
        .order(OrderSpec::order_by(SortDir::Desc, None))
        .order(Some(OrderSpec::desc("id")));

    let order = builder.order_text();
    assert_eq!(order, "name ASC , id DESC ");
    validate_order(&order).unwrap();
}

#[test]
fn test_select_statement() {
    let row_type = customer_row_type();
    let builder = QueryBuilder::new()
        .condition(Condition::equals_to(Some("id"), Some(Value::from(5))))
        .order(Some(OrderSpec::asc("name")));

    let select = select_statement(
        &row_type,
        "Customer",
        "item",
        &builder.filter_text(),
        &builder.order_text(),
    );
    assert_snapshot!(select.trim(), @"SELECT new CustomerReportRow( item.id, item.name, item.createdAt )  FROM Customer item  WHERE  ( id = 5 )  ORDER BY name ASC");
}

#[test]
fn test_select_statement_without_clauses() {
    let row_type = customer_row_type();
    let select = select_statement(&row_type, "Customer", "item", "", "   ");
    assert_eq!(
        select,
        " SELECT new CustomerReportRow( item.id, item.name, item.createdAt )  FROM Customer item "
    );
}

#[test]
fn test_whole_float_renders_with_fraction() {
    let cond = Condition::greater_than(true, Some("amount"), Some(Value::from(3.0))).unwrap();
    assert_eq!(render_condition(&cond), "amount >= 3.0");
}
