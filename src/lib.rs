//! # Quickreport
//!
//! Spreadsheet report definitions derived from plain data types.
//!
//! ## Architecture
//!
//! A source type's declared fields are filtered into a schema, which drives
//! a cached row type and a cached sheet type. The sheet either embeds a
//! select built from filter conditions or carries rows copied from source
//! objects:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │          SourceType / Reportable (caller data)           │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [schema filter]
//! ┌─────────────────────────────────────────────────────────┐
//! │                    TypeSchema                            │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [synth + registry]
//! ┌─────────────────────────────────────────────────────────┐
//! │        RowType ──► SheetType (query or static)           │
//! └─────────────────────────────────────────────────────────┘
//!              │                              │
//!   [query builder]                  [structural mapper]
//!              ▼                              ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │          ReportDescription ──► ReportRenderer            │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod assembly;
pub mod config;
pub mod error;
pub mod mapper;
pub mod model;
pub mod query;
pub mod registry;
pub mod schema;
pub mod synth;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::assembly::{ReportAssembly, ReportFormat, ReportRenderer, ReportRequest};
    pub use crate::config::Settings;
    pub use crate::error::{FieldAccessError, ReportError, ReportResult};
    pub use crate::model::{
        ReportDescription, RowInstance, RowType, SheetDescriptor, SheetKind, SheetPayload,
        SheetType,
    };
    pub use crate::query::{Condition, LikeDirection, OrderSpec, QueryBuilder, SortDir};
    pub use crate::schema::{Reportable, SourceRecord, SourceType, TypeTag, Value};
}

// Also export at crate root for convenience
pub use assembly::{ReportAssembly, ReportRequest};
pub use error::{ReportError, ReportResult};
pub use schema::{Reportable, SourceType, TypeTag, Value};
