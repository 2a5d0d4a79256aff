//! Query text assembly.
//!
//! [`QueryBuilder`] collects conditions and sort keys for one report;
//! [`select_statement`] embeds the rendered filter and order into the full
//! constructor-style select used by query-backed sheets:
//!
//! ```text
//!  SELECT new CustomerReportRow( item.id, item.name )  FROM Customer item  WHERE  ( id = 5 )  ORDER BY name ASC
//! ```

use super::condition::Condition;
use super::order::OrderSpec;
use super::parser::{render_filter, render_orders};
use crate::model::RowType;

/// Accumulates filter conditions and sort keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryBuilder {
    conditions: Vec<Option<Condition>>,
    orders: Vec<Option<OrderSpec>>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition joined with AND. Absent conditions are kept and
    /// skipped at render time.
    pub fn condition(mut self, condition: Option<Condition>) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn order(mut self, order: Option<OrderSpec>) -> Self {
        self.orders.push(order);
        self
    }

    pub fn add_condition(&mut self, condition: Option<Condition>) -> &mut Self {
        self.conditions.push(condition);
        self
    }

    pub fn add_order(&mut self, order: Option<OrderSpec>) -> &mut Self {
        self.orders.push(order);
        self
    }

    pub fn conditions(&self) -> &[Option<Condition>] {
        &self.conditions
    }

    pub fn orders(&self) -> &[Option<OrderSpec>] {
        &self.orders
    }

    /// Rendered filter text (may be empty).
    pub fn filter_text(&self) -> String {
        render_filter(&self.conditions)
    }

    /// Rendered order text (may be empty).
    pub fn order_text(&self) -> String {
        render_orders(&self.orders)
    }
}

/// Build the full select statement for a row type over a source table.
///
/// Columns follow schema order. Blank filter or order text omits the
/// corresponding clause.
pub fn select_statement(
    row_type: &RowType,
    table: &str,
    alias: &str,
    filter_text: &str,
    order_text: &str,
) -> String {
    let columns = row_type
        .fields()
        .iter()
        .map(|f| format!("{}.{}", alias, f.name))
        .collect::<Vec<_>>()
        .join(", ");

    let mut query = String::new();
    query.push_str(&format!(" SELECT new {}( {} ) ", row_type.name(), columns));
    query.push_str(&format!(" FROM {} {} ", table, alias));
    if !filter_text.trim().is_empty() {
        query.push_str(" WHERE ");
        query.push_str(filter_text);
    }
    if !order_text.trim().is_empty() {
        query.push_str(" ORDER BY ");
        query.push_str(order_text);
    }
    query
}
