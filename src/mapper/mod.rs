//! Structural copy of source objects into row instances.
//!
//! A source field is copied into the row field with the same name and the
//! same tag; anything else is skipped. The matching is computed once per
//! (row type, source schema) pair and cached as a [`FieldPlan`].

use std::sync::Arc;

use dashmap::DashMap;

use crate::error::{ReportError, ReportResult};
use crate::model::{RowInstance, RowType};
use crate::schema::{derive_schema, Reportable, TypeSchema};

/// One source field copied into one row field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCopy {
    pub source_field: String,
    pub target_ordinal: usize,
}

/// Precomputed copies for one (row type, source schema) pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPlan {
    pub copies: Vec<FieldCopy>,
    pub skipped: Vec<String>,
}

impl FieldPlan {
    /// Match every retained source field against the row type by name and tag.
    pub fn derive(row_type: &RowType, source: &TypeSchema) -> Self {
        let mut plan = FieldPlan::default();
        for field in source.iter() {
            match row_type.schema().field(&field.name) {
                Some(target) if target.tag == field.tag => plan.copies.push(FieldCopy {
                    source_field: field.name.clone(),
                    target_ordinal: target.ordinal,
                }),
                _ => plan.skipped.push(field.name.clone()),
            }
        }
        plan
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PlanKey {
    row_type: String,
    fingerprint: String,
    source: TypeSchema,
}

/// Maps source objects into instances of a row type.
#[derive(Debug, Default)]
pub struct StructuralRowMapper {
    plans: DashMap<PlanKey, Arc<FieldPlan>>,
}

impl StructuralRowMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map every source into a new row. The first failure aborts the call.
    pub fn map<'s, S>(
        &self,
        row_type: &Arc<RowType>,
        sources: impl IntoIterator<Item = &'s S>,
    ) -> ReportResult<Vec<RowInstance>>
    where
        S: Reportable + ?Sized + 's,
    {
        sources
            .into_iter()
            .map(|source| self.map_one(row_type, source))
            .collect()
    }

    /// Map a single source into a new row.
    pub fn map_one<S>(&self, row_type: &Arc<RowType>, source: &S) -> ReportResult<RowInstance>
    where
        S: Reportable + ?Sized,
    {
        let mut row = row_type.new_instance();
        let schema = derive_schema(&source.source_type());
        let plan = self.plan_for(row_type, schema);

        for copy in &plan.copies {
            let value = source
                .field_value(&copy.source_field)
                .map_err(|e| ReportError::mapping(row_type.name(), e))?;
            row.set_at(copy.target_ordinal, value)
                .map_err(|e| ReportError::mapping(row_type.name(), e))?;
        }
        Ok(row)
    }

    /// Number of cached plans.
    pub fn cached_plans(&self) -> usize {
        self.plans.len()
    }

    fn plan_for(&self, row_type: &RowType, source: TypeSchema) -> Arc<FieldPlan> {
        let key = PlanKey {
            row_type: row_type.name().to_string(),
            fingerprint: row_type.fingerprint().to_string(),
            source,
        };
        if let Some(plan) = self.plans.get(&key) {
            return Arc::clone(plan.value());
        }

        let plan = Arc::new(FieldPlan::derive(row_type, &key.source));
        if !plan.skipped.is_empty() {
            tracing::trace!(
                row_type = %row_type.name(),
                source_type = %key.source.source_type_name,
                skipped = ?plan.skipped,
                "source fields without a matching row field"
            );
        }
        Arc::clone(self.plans.entry(key).or_insert(plan).value())
    }
}
