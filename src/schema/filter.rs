//! Derives the retained, ordered schema of a source type.
//!
//! Filters run in a fixed sequence:
//!
//! 1. drop the reserved serialization-version field (case-insensitive)
//! 2. drop fields whose declared type is not a report [`TypeTag`]
//! 3. drop class-level (static) fields
//!
//! Survivors keep declaration order and get ordinals `0..n-1`.

use super::{DeclaredField, FieldDescriptor, SourceType, TypeSchema, TypeTag};

/// Reserved name of the serialization-version field.
pub const SERIAL_VERSION_FIELD: &str = "serialVersionUID";

/// Whether the field is not the serialization-version field.
pub fn is_not_serial_version(field: &DeclaredField) -> bool {
    !field.name.eq_ignore_ascii_case(SERIAL_VERSION_FIELD)
}

/// The report tag of the field, if its declared type is eligible.
pub fn allowed_tag(field: &DeclaredField) -> Option<TypeTag> {
    field.declared.tag()
}

/// Whether the field belongs to instances rather than the type.
pub fn is_instance_field(field: &DeclaredField) -> bool {
    !field.is_static
}

/// Derive the retained schema of a source type.
///
/// Pure and deterministic: the same input always yields the same schema.
pub fn derive_schema(source: &SourceType) -> TypeSchema {
    let fields = source
        .fields
        .iter()
        .filter(|f| is_not_serial_version(f))
        .filter_map(|f| allowed_tag(f).map(|tag| (f, tag)))
        .filter(|(f, _)| is_instance_field(f))
        .enumerate()
        .map(|(ordinal, (f, tag))| FieldDescriptor {
            name: f.name.clone(),
            tag,
            ordinal,
        })
        .collect();

    TypeSchema {
        source_type_name: source.name.clone(),
        fields,
    }
}
