//! Row type synthesis.

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use regex::Regex;

use super::artifact::ArtifactStore;
use crate::config::Settings;
use crate::error::{ReportError, ReportResult};
use crate::model::{AccessorPair, ColumnMeta, DateFormat, HorizontalAlignment, RowType};
use crate::registry::{schema_fingerprint, GeneratedType, TypeRegistry};
use crate::schema::naming::{column_label, getter_name, setter_name};
use crate::schema::{derive_schema, SourceType, TypeTag};

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{XID_Start}_$][\p{XID_Continue}$]*$").unwrap());

/// Check that a generated type or field name is an identifier. Letters
/// outside ASCII are accepted.
pub(crate) fn ensure_identifier(type_name: &str, candidate: &str, what: &str) -> ReportResult<()> {
    if IDENTIFIER.is_match(candidate) {
        Ok(())
    } else {
        Err(ReportError::synthesis(
            type_name,
            format!("invalid {} `{}`", what, candidate),
        ))
    }
}

/// Builds the row type for a source type, at most once per name.
pub struct RowTypeSynthesizer<'a> {
    registry: &'a TypeRegistry,
    settings: &'a Settings,
    artifacts: &'a ArtifactStore,
}

impl<'a> RowTypeSynthesizer<'a> {
    pub fn new(
        registry: &'a TypeRegistry,
        settings: &'a Settings,
        artifacts: &'a ArtifactStore,
    ) -> Self {
        Self {
            registry,
            settings,
            artifacts,
        }
    }

    /// Return the row type for `source`.
    ///
    /// A registered type is returned unchanged, even if the source type's
    /// shape has changed since it was built.
    pub fn synthesize(&self, source: &SourceType) -> ReportResult<Arc<RowType>> {
        let name = self.settings.naming.row_type_name(&source.name);

        let (generated, inserted) = self
            .registry
            .get_or_try_insert_with(&name, || {
                self.build(&name, source)
                    .map(|row| GeneratedType::Row(Arc::new(row)))
            })?;

        let row_type = generated
            .as_row()
            .cloned()
            .ok_or_else(|| ReportError::synthesis(&name, "name is registered to a sheet type"))?;

        if inserted {
            tracing::debug!(
                type_name = %name,
                fields = row_type.fields().len(),
                "synthesized row type"
            );
            self.artifacts.persist(&name, row_type.as_ref())?;
        }
        Ok(row_type)
    }

    fn build(&self, name: &str, source: &SourceType) -> ReportResult<RowType> {
        ensure_identifier(name, name, "type name")?;

        let schema = derive_schema(source);
        let mut columns = Vec::with_capacity(schema.len());
        let mut accessors = Vec::with_capacity(schema.len());
        let mut fields = HashSet::new();
        let mut getters = HashSet::new();
        let mut setters = HashSet::new();

        for field in schema.iter() {
            ensure_identifier(name, &field.name, "field name")?;
            if !fields.insert(field.name.as_str()) {
                return Err(ReportError::synthesis(
                    name,
                    format!("duplicate field `{}`", field.name),
                ));
            }

            let getter = getter_name(&field.name);
            let setter = setter_name(&field.name);
            if !getters.insert(getter.clone()) || !setters.insert(setter.clone()) {
                return Err(ReportError::synthesis(
                    name,
                    format!("accessors of field `{}` collide with another field", field.name),
                ));
            }

            let date_format = (field.tag == TypeTag::Date)
                .then(|| DateFormat(self.settings.layout.date_format.clone()));
            columns.push(ColumnMeta {
                field: field.name.clone(),
                label: column_label(&field.name),
                index: field.ordinal,
                alignment: HorizontalAlignment::Center,
                date_format,
            });
            accessors.push(AccessorPair {
                field: field.name.clone(),
                getter,
                setter,
            });
        }

        let fingerprint = schema_fingerprint(&schema)?;
        Ok(RowType::new(
            name.to_string(),
            schema,
            columns,
            accessors,
            fingerprint,
        ))
    }
}
