//! Renders conditions and sort keys to query text.
//!
//! Value formatting:
//!
//! | Value | Rendered as |
//! |-------|-------------|
//! | Date | `TO_DATE('yyyy-MM-dd HH:mm:ss', 'YYYY-MM-DD HH24:MI:SS')` |
//! | Text | `'text'`, embedded quotes are NOT escaped |
//! | List | `(v1, v2, ...)`, each element formatted by these rules |
//! | other | default textual form |

use super::condition::Condition;
use super::order::OrderSpec;
use crate::schema::Value;

/// Separator between combined conditions.
pub const AND_SEPARATOR: &str = " AND ";

/// Separator between sort keys.
pub const ORDER_SEPARATOR: &str = ", ";

const DATE_PATTERN: &str = "%Y-%m-%d %H:%M:%S";
const DATE_LITERAL_FORMAT: &str = "YYYY-MM-DD HH24:MI:SS";

/// Render one condition as `<column><operator token><value>`.
///
/// Nullary operators render without a right-hand value.
pub fn render_condition(condition: &Condition) -> String {
    let mut out = String::new();
    out.push_str(condition.column());
    out.push_str(condition.operator().token());
    if !condition.operator().is_nullary() {
        if let Some(value) = condition.right_value() {
            out.push_str(&format_value(value));
        }
    }
    out
}

/// Combine conditions in the order supplied.
///
/// Absent conditions and blank renderings are skipped; the rest are each
/// wrapped in parentheses and joined with ` AND `.
pub fn render_filter(conditions: &[Option<Condition>]) -> String {
    let mut out = String::new();
    for rendered in conditions
        .iter()
        .flatten()
        .map(render_condition)
        .filter(|r| !r.trim().is_empty())
    {
        if !out.is_empty() {
            out.push_str(AND_SEPARATOR);
        }
        out.push_str(" ( ");
        out.push_str(&rendered);
        out.push_str(" ) ");
    }
    out
}

/// Render one sort key as `<column><direction token>`.
pub fn render_order(order: &OrderSpec) -> String {
    format!("{}{}", order.column(), order.direction().token())
}

/// Join sort keys with `, `, skipping absent ones.
pub fn render_orders(orders: &[Option<OrderSpec>]) -> String {
    orders
        .iter()
        .flatten()
        .map(render_order)
        .collect::<Vec<_>>()
        .join(ORDER_SEPARATOR)
}

/// Format a right-hand value as a query literal.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Date(date) => format!(
            "TO_DATE('{}', '{}')",
            date.format(DATE_PATTERN),
            DATE_LITERAL_FORMAT
        ),
        // No escaping of embedded quotes.
        Value::Text(text) => format!("'{}'", text),
        Value::List(items) => {
            let rendered: Vec<String> = items.iter().map(format_value).collect();
            format!("({})", rendered.join(", "))
        }
        other => other.to_string(),
    }
}
