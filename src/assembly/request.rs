//! Report requests.

use crate::error::{ReportError, ReportResult};
use crate::query::{Condition, OrderSpec, QueryBuilder};
use crate::schema::{Reportable, SourceType};

/// What to report on.
///
/// A request without rows produces a query-backed sheet filtered and sorted
/// by its conditions and orders. A request with rows produces a data-backed
/// sheet and ignores the query.
#[derive(Default)]
pub struct ReportRequest<'r> {
    source_type: Option<SourceType>,
    name: Option<String>,
    rows: Option<Vec<&'r dyn Reportable>>,
    query: QueryBuilder,
}

impl<'r> ReportRequest<'r> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request for `source_type` under the report name `name`.
    pub fn define(source_type: SourceType, name: impl Into<String>) -> Self {
        Self::new().source_type(source_type).name(name)
    }

    pub fn source_type(mut self, source_type: SourceType) -> Self {
        self.source_type = Some(source_type);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Supply static rows.
    pub fn rows<R: Reportable>(mut self, rows: &'r [R]) -> Self {
        self.rows = Some(rows.iter().map(|r| r as &dyn Reportable).collect());
        self
    }

    /// Supply static rows of mixed concrete types.
    pub fn dyn_rows(mut self, rows: Vec<&'r dyn Reportable>) -> Self {
        self.rows = Some(rows);
        self
    }

    pub fn condition(mut self, condition: Option<Condition>) -> Self {
        self.query.add_condition(condition);
        self
    }

    pub fn order(mut self, order: Option<OrderSpec>) -> Self {
        self.query.add_order(order);
        self
    }

    pub fn query(mut self, query: QueryBuilder) -> Self {
        self.query = query;
        self
    }

    pub fn query_builder(&self) -> &QueryBuilder {
        &self.query
    }

    pub fn static_rows(&self) -> Option<&[&'r dyn Reportable]> {
        self.rows.as_deref()
    }

    pub fn is_static(&self) -> bool {
        self.rows.is_some()
    }

    /// Check the identifying fields and return them.
    pub fn validate(&self) -> ReportResult<(&SourceType, &str)> {
        let name = self
            .name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| ReportError::Configuration("report name is not set".into()))?;
        let source_type = self
            .source_type
            .as_ref()
            .ok_or_else(|| ReportError::Configuration("source type is not set".into()))?;
        Ok((source_type, name))
    }
}

impl std::fmt::Debug for ReportRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportRequest")
            .field("source_type", &self.source_type.as_ref().map(|s| &s.name))
            .field("name", &self.name)
            .field("rows", &self.rows.as_ref().map(Vec::len))
            .field("query", &self.query)
            .finish()
    }
}
