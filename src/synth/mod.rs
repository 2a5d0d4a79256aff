//! Synthesis of row and sheet types.
//!
//! - [`row`] - row types derived from a source type's retained schema
//! - [`sheet`] - query-backed and data-backed sheet types
//! - [`artifact`] - debug artifacts written for every synthesized type
//!
//! Both synthesizers consult the [`TypeRegistry`](crate::registry::TypeRegistry)
//! first and only build a type the first time its name is requested.

pub mod artifact;
pub mod row;
pub mod sheet;

pub use artifact::ArtifactStore;
pub use row::RowTypeSynthesizer;
pub use sheet::SheetTypeSynthesizer;
