//! Source type descriptions and the schema filter.
//!
//! - [`types`] - declared fields, report tags and retained schemas
//! - [`value`] - runtime field values
//! - [`filter`] - retained schema derivation
//! - [`naming`] - column labels and accessor names
//! - [`source`] - the [`Reportable`] trait for source objects

pub mod filter;
pub mod naming;
pub mod source;
pub mod types;
pub mod value;

pub use filter::derive_schema;
pub use naming::column_label;
pub use source::{Reportable, SourceRecord};
pub use types::{DeclaredField, DeclaredType, FieldDescriptor, SourceType, TypeSchema, TypeTag};
pub use value::Value;
