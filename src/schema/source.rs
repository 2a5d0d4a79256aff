//! Source objects that can be copied into report rows.

use std::collections::HashMap;

use super::{SourceType, Value};
use crate::error::FieldAccessError;

/// An application value whose fields can be read by name.
///
/// Implementations describe their own declared fields; the mapper derives
/// the retained schema from that description, independent of the target
/// row type.
pub trait Reportable {
    /// Declared fields of this value's type, in declaration order.
    fn source_type(&self) -> SourceType;

    /// Read one declared field.
    fn field_value(&self, field: &str) -> Result<Value, FieldAccessError>;
}

impl<T: Reportable + ?Sized> Reportable for Box<T> {
    fn source_type(&self) -> SourceType {
        (**self).source_type()
    }

    fn field_value(&self, field: &str) -> Result<Value, FieldAccessError> {
        (**self).field_value(field)
    }
}

impl<T: Reportable + ?Sized> Reportable for &T {
    fn source_type(&self) -> SourceType {
        (**self).source_type()
    }

    fn field_value(&self, field: &str) -> Result<Value, FieldAccessError> {
        (**self).field_value(field)
    }
}

/// A dynamically described source object.
///
/// Declared fields without an assigned value read as [`Value::Null`].
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRecord {
    source_type: SourceType,
    values: HashMap<String, Value>,
}

impl SourceRecord {
    pub fn new(source_type: SourceType) -> Self {
        Self {
            source_type,
            values: HashMap::new(),
        }
    }

    /// Assign a value, builder style.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(field.into(), value.into());
        self
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(field.into(), value.into());
    }

    pub fn type_name(&self) -> &str {
        &self.source_type.name
    }
}

impl Reportable for SourceRecord {
    fn source_type(&self) -> SourceType {
        self.source_type.clone()
    }

    fn field_value(&self, field: &str) -> Result<Value, FieldAccessError> {
        if self.source_type.declared(field).is_none() {
            return Err(FieldAccessError::UnknownField {
                type_name: self.source_type.name.clone(),
                field: field.to_string(),
            });
        }
        Ok(self.values.get(field).cloned().unwrap_or_default())
    }
}
