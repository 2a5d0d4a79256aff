//! Schema fingerprints.

use sha2::{Digest, Sha256};

use crate::schema::TypeSchema;

/// Fingerprint of a retained schema, as 64 lowercase hex digits.
///
/// Covers the source type name and every field's name, tag and ordinal,
/// so two schemas share a fingerprint only when a row type built from one
/// fits the other. Row types carry it, and the mapper keys its plans on it.
pub fn schema_fingerprint(schema: &TypeSchema) -> Result<String, serde_json::Error> {
    let canonical = serde_json::to_vec(schema)?;
    Ok(Sha256::digest(&canonical)
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect())
}
