//! Error types for report synthesis and row mapping.

use std::io;
use thiserror::Error;

use crate::config::SettingsError;
use crate::schema::TypeTag;

/// Result type for report operations.
pub type ReportResult<T> = Result<T, ReportError>;

/// Errors surfaced by the synthesis pipeline.
///
/// Nothing here is retried: configuration errors are raised before any
/// synthesis starts, and synthesis or mapping errors abort the whole call.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Required identifying input (source type, report name) is missing.
    #[error("report not configured: {0}")]
    Configuration(String),

    /// A generated type could not be built or instantiated.
    #[error("failed to synthesize `{type_name}`: {message}")]
    Synthesis { type_name: String, message: String },

    /// Copying a source value into a row instance failed.
    #[error("failed to map rows into `{type_name}`: {source}")]
    Mapping {
        type_name: String,
        #[source]
        source: FieldAccessError,
    },

    /// Writing a debug artifact failed and the store is configured to abort.
    #[error("failed to write type artifact: {0}")]
    Artifact(#[source] io::Error),

    /// A type definition could not be serialized.
    #[error("failed to serialize type definition: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Settings could not be loaded.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// The external renderer rejected the report.
    #[error("renderer failed: {0}")]
    Render(String),
}

impl ReportError {
    /// Create a synthesis error for the named generated type.
    pub fn synthesis(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Synthesis {
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    /// Create a mapping error for the named row type.
    pub fn mapping(type_name: impl Into<String>, source: FieldAccessError) -> Self {
        Self::Mapping {
            type_name: type_name.into(),
            source,
        }
    }

    /// Check if this error was raised before synthesis started.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::Settings(_))
    }

    /// Check if this error is retriable.
    ///
    /// Every failure in this crate is deterministic for a given input.
    pub fn is_retriable(&self) -> bool {
        false
    }
}

/// Low-level failure while reading or writing a single field.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldAccessError {
    #[error("no field `{field}` on `{type_name}`")]
    UnknownField { type_name: String, field: String },

    #[error("field `{field}` expects {expected}, got {found}")]
    TypeMismatch {
        field: String,
        expected: TypeTag,
        found: String,
    },

    #[error("cannot read field `{field}`: {reason}")]
    Inaccessible { field: String, reason: String },
}

impl FieldAccessError {
    /// Name of the field the failure refers to.
    pub fn field(&self) -> &str {
        match self {
            Self::UnknownField { field, .. }
            | Self::TypeMismatch { field, .. }
            | Self::Inaccessible { field, .. } => field,
        }
    }
}
