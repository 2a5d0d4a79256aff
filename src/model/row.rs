//! Generated row types and their instances.
//!
//! A [`RowType`] is the report-side representation of a source type: the
//! retained schema plus the per-column metadata the renderer reads. It is
//! immutable once built and shared through `Arc`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{FieldAccessError, ReportError, ReportResult};
use crate::schema::{FieldDescriptor, TypeSchema, TypeTag, Value};

/// Horizontal cell alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HorizontalAlignment {
    Left,
    #[default]
    Center,
    Right,
}

/// Display format attached to date columns (e.g. `yyyy-MM-dd`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateFormat(pub String);

impl DateFormat {
    pub fn pattern(&self) -> &str {
        &self.0
    }
}

/// Layout metadata for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMeta {
    pub field: String,
    pub label: String,
    /// Zero-based column index, equal to the field ordinal.
    pub index: usize,
    pub alignment: HorizontalAlignment,
    /// Present for date columns only.
    pub date_format: Option<DateFormat>,
}

/// Read/write accessor names for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessorPair {
    pub field: String,
    pub getter: String,
    pub setter: String,
}

/// A synthesized row type.
#[derive(Debug, Serialize)]
pub struct RowType {
    name: String,
    schema: TypeSchema,
    columns: Vec<ColumnMeta>,
    accessors: Vec<AccessorPair>,
    fingerprint: String,
}

impl RowType {
    /// Assemble a row type. `columns` and `accessors` run parallel to the
    /// schema fields.
    pub(crate) fn new(
        name: String,
        schema: TypeSchema,
        columns: Vec<ColumnMeta>,
        accessors: Vec<AccessorPair>,
        fingerprint: String,
    ) -> Self {
        debug_assert_eq!(schema.len(), columns.len());
        debug_assert_eq!(schema.len(), accessors.len());
        Self {
            name,
            schema,
            columns,
            accessors,
            fingerprint,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &TypeSchema {
        &self.schema
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.schema.fields
    }

    pub fn columns(&self) -> &[ColumnMeta] {
        &self.columns
    }

    pub fn accessors(&self) -> &[AccessorPair] {
        &self.accessors
    }

    /// SHA-256 of the retained schema this type was built from.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn field_index(&self, field: &str) -> Option<usize> {
        self.schema.fields.iter().position(|f| f.name == field)
    }

    pub fn column(&self, field: &str) -> Option<&ColumnMeta> {
        self.field_index(field).map(|i| &self.columns[i])
    }

    pub fn column_label(&self, field: &str) -> Option<&str> {
        self.column(field).map(|c| c.label.as_str())
    }

    pub fn date_format(&self, field: &str) -> Option<&DateFormat> {
        self.column(field).and_then(|c| c.date_format.as_ref())
    }

    /// Parameter types of the positional constructor, in schema order.
    pub fn constructor_signature(&self) -> Vec<TypeTag> {
        self.schema.fields.iter().map(|f| f.tag).collect()
    }

    /// Default construction path: every field starts as `Null`.
    pub fn new_instance(self: &Arc<Self>) -> RowInstance {
        RowInstance {
            row_type: Arc::clone(self),
            values: vec![Value::Null; self.schema.len()],
        }
    }

    /// Positional constructor: assigns each argument to the field with the
    /// same ordinal.
    pub fn construct(self: &Arc<Self>, args: Vec<Value>) -> ReportResult<RowInstance> {
        if args.len() != self.schema.len() {
            return Err(ReportError::synthesis(
                &self.name,
                format!(
                    "constructor expects {} arguments, got {}",
                    self.schema.len(),
                    args.len()
                ),
            ));
        }

        let mut row = self.new_instance();
        for (ordinal, value) in args.into_iter().enumerate() {
            row.set_at(ordinal, value)
                .map_err(|e| ReportError::synthesis(&self.name, e.to_string()))?;
        }
        Ok(row)
    }

    fn unknown_field(&self, field: &str) -> FieldAccessError {
        FieldAccessError::UnknownField {
            type_name: self.name.clone(),
            field: field.to_string(),
        }
    }
}

/// One row of a generated row type.
#[derive(Debug, Clone)]
pub struct RowInstance {
    row_type: Arc<RowType>,
    values: Vec<Value>,
}

impl RowInstance {
    pub fn row_type(&self) -> &Arc<RowType> {
        &self.row_type
    }

    /// Values in column order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn get(&self, field: &str) -> Result<&Value, FieldAccessError> {
        let index = self
            .row_type
            .field_index(field)
            .ok_or_else(|| self.row_type.unknown_field(field))?;
        Ok(&self.values[index])
    }

    pub fn set(&mut self, field: &str, value: Value) -> Result<(), FieldAccessError> {
        let index = self
            .row_type
            .field_index(field)
            .ok_or_else(|| self.row_type.unknown_field(field))?;
        self.set_at(index, value)
    }

    /// Assign by ordinal, checking the value against the field's tag.
    pub fn set_at(&mut self, ordinal: usize, value: Value) -> Result<(), FieldAccessError> {
        let descriptor = self
            .row_type
            .schema
            .fields
            .get(ordinal)
            .ok_or_else(|| self.row_type.unknown_field(&format!("#{}", ordinal)))?;

        if !value.is_assignable_to(descriptor.tag) {
            return Err(FieldAccessError::TypeMismatch {
                field: descriptor.name.clone(),
                expected: descriptor.tag,
                found: value.kind().to_string(),
            });
        }
        self.values[ordinal] = value;
        Ok(())
    }

    /// Call a read accessor by name (`partita_iva`).
    pub fn invoke_getter(&self, accessor: &str) -> Result<&Value, FieldAccessError> {
        let pair = self
            .row_type
            .accessors
            .iter()
            .find(|a| a.getter == accessor)
            .ok_or_else(|| self.row_type.unknown_field(accessor))?;
        self.get(&pair.field)
    }

    /// Call a write accessor by name (`set_partita_iva`).
    pub fn invoke_setter(&mut self, accessor: &str, value: Value) -> Result<(), FieldAccessError> {
        let field = self
            .row_type
            .accessors
            .iter()
            .find(|a| a.setter == accessor)
            .map(|a| a.field.clone())
            .ok_or_else(|| self.row_type.unknown_field(accessor))?;
        self.set(&field, value)
    }
}

impl PartialEq for RowInstance {
    fn eq(&self, other: &Self) -> bool {
        self.row_type.name == other.row_type.name && self.values == other.values
    }
}
