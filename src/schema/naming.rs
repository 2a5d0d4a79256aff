//! Column labels and accessor names derived from field names.

use inflector::Inflector;

/// Format a field name as a display column label.
///
/// A space is inserted before every upper-case letter past the first
/// character, then the whole label is upper-cased:
/// `partitaIva` -> `PARTITA IVA`, `id` -> `ID`.
pub fn column_label(field_name: &str) -> String {
    let mut label = String::with_capacity(field_name.len() + 4);
    for (i, c) in field_name.chars().enumerate() {
        if i > 0 && c.is_uppercase() {
            label.push(' ');
        }
        label.extend(c.to_uppercase());
    }
    label
}

/// Name of the read accessor for a field (`partitaIva` -> `partita_iva`).
pub fn getter_name(field_name: &str) -> String {
    field_name.to_snake_case()
}

/// Name of the write accessor for a field (`partitaIva` -> `set_partita_iva`).
pub fn setter_name(field_name: &str) -> String {
    format!("set_{}", field_name.to_snake_case())
}
