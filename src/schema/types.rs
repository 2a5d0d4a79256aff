//! Declared and retained field types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The primitive kinds eligible for a report column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeTag {
    /// 64-bit signed integer.
    Int64,
    /// Double precision float.
    Float64,
    Text,
    /// 32-bit signed integer.
    Int32,
    Bool,
    /// Arbitrary-precision decimal.
    Decimal,
    /// Calendar date (with optional time of day).
    Date,
}

impl TypeTag {
    pub const ALL: [TypeTag; 7] = [
        TypeTag::Int64,
        TypeTag::Float64,
        TypeTag::Text,
        TypeTag::Int32,
        TypeTag::Bool,
        TypeTag::Decimal,
        TypeTag::Date,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TypeTag::Int64 => "Int64",
            TypeTag::Float64 => "Float64",
            TypeTag::Text => "Text",
            TypeTag::Int32 => "Int32",
            TypeTag::Bool => "Bool",
            TypeTag::Decimal => "Decimal",
            TypeTag::Date => "Date",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The type a source field was declared with.
///
/// Anything outside the seven report tags is kept as `Other` so that the
/// schema filter can drop it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeclaredType {
    Supported(TypeTag),
    Other(String),
}

impl DeclaredType {
    pub fn other(type_name: impl Into<String>) -> Self {
        DeclaredType::Other(type_name.into())
    }

    /// The report tag for this type, if it is eligible.
    pub fn tag(&self) -> Option<TypeTag> {
        match self {
            DeclaredType::Supported(tag) => Some(*tag),
            DeclaredType::Other(_) => None,
        }
    }
}

impl From<TypeTag> for DeclaredType {
    fn from(tag: TypeTag) -> Self {
        DeclaredType::Supported(tag)
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclaredType::Supported(tag) => write!(f, "{}", tag),
            DeclaredType::Other(name) => f.write_str(name),
        }
    }
}

/// One field as declared on a source type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeclaredField {
    pub name: String,
    pub declared: DeclaredType,
    /// Class-level field, not part of an instance.
    pub is_static: bool,
}

impl DeclaredField {
    pub fn new(name: impl Into<String>, declared: impl Into<DeclaredType>) -> Self {
        Self {
            name: name.into(),
            declared: declared.into(),
            is_static: false,
        }
    }

    pub fn new_static(name: impl Into<String>, declared: impl Into<DeclaredType>) -> Self {
        Self {
            is_static: true,
            ..Self::new(name, declared)
        }
    }
}

/// A caller-supplied data type: its name and fields in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceType {
    pub name: String,
    pub fields: Vec<DeclaredField>,
}

impl SourceType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append an instance field.
    pub fn field(mut self, name: impl Into<String>, declared: impl Into<DeclaredType>) -> Self {
        self.fields.push(DeclaredField::new(name, declared));
        self
    }

    /// Append a class-level field.
    pub fn static_field(
        mut self,
        name: impl Into<String>,
        declared: impl Into<DeclaredType>,
    ) -> Self {
        self.fields.push(DeclaredField::new_static(name, declared));
        self
    }

    /// Append a field of a type that is not eligible for reports.
    pub fn other_field(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.fields
            .push(DeclaredField::new(name, DeclaredType::other(type_name)));
        self
    }

    pub fn declared(&self, name: &str) -> Option<&DeclaredField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A retained field with its position in the schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub tag: TypeTag,
    /// Zero-based position; contiguous across the schema.
    pub ordinal: usize,
}

/// The ordered, retained fields of a source type.
///
/// Order is declaration order after filtering and must never be re-sorted:
/// it drives constructor arguments, column indexes and query columns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeSchema {
    pub source_type_name: String,
    pub fields: Vec<FieldDescriptor>,
}

impl TypeSchema {
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}
