//! Schema filter and column naming tests.

use quickreport::schema::naming::{getter_name, setter_name};
use quickreport::schema::{column_label, derive_schema, SourceType, TypeTag};

fn invoice() -> SourceType {
    SourceType::new("Invoice")
        .field("SerialVersionUID", TypeTag::Int64)
        .field("id", TypeTag::Int64)
        .other_field("customer", "Customer")
        .field("partitaIva", TypeTag::Text)
        .static_field("counter", TypeTag::Int32)
        .field("total", TypeTag::Decimal)
        .field("paid", TypeTag::Bool)
        .field("issuedOn", TypeTag::Date)
        .field("weight", TypeTag::Float64)
        .field("lines", TypeTag::Int32)
}

#[test]
fn test_filter_keeps_declaration_order() {
    let schema = derive_schema(&invoice());

    assert_eq!(schema.source_type_name, "Invoice");
    assert_eq!(
        schema.names(),
        vec!["id", "partitaIva", "total", "paid", "issuedOn", "weight", "lines"]
    );
    let ordinals: Vec<usize> = schema.iter().map(|f| f.ordinal).collect();
    assert_eq!(ordinals, (0..7).collect::<Vec<_>>());
    assert_eq!(schema.field("total").unwrap().tag, TypeTag::Decimal);
}

#[test]
fn test_filter_is_deterministic() {
    let source = invoice();
    assert_eq!(derive_schema(&source), derive_schema(&source));
}

#[test]
fn test_excluded_fields() {
    let schema = derive_schema(&invoice());
    assert!(schema.field("SerialVersionUID").is_none());
    assert!(schema.field("customer").is_none());
    assert!(schema.field("counter").is_none());
}

#[test]
fn test_empty_source_type() {
    let schema = derive_schema(&SourceType::new("Empty").other_field("blob", "Vec<u8>"));
    assert!(schema.is_empty());
}

#[test]
fn test_column_labels() {
    assert_eq!(column_label("partitaIva"), "PARTITA IVA");
    assert_eq!(column_label("id"), "ID");
    assert_eq!(column_label("a"), "A");
    assert_eq!(column_label("issuedOnDate"), "ISSUED ON DATE");
}

#[test]
fn test_accessor_names() {
    assert_eq!(getter_name("partitaIva"), "partita_iva");
    assert_eq!(setter_name("issuedOn"), "set_issued_on");
}
