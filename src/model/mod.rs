//! Generated report types.
//!
//! - [`row`] - row types, column metadata and row instances
//! - [`sheet`] - sheet types, layout and the descriptors sent to the renderer

pub mod row;
pub mod sheet;

pub use row::{AccessorPair, ColumnMeta, DateFormat, HorizontalAlignment, RowInstance, RowType};
pub use sheet::{
    LayoutTag, Margins, ReportDescription, SheetDefinition, SheetDescriptor, SheetKind,
    SheetLayout, SheetPayload, SheetQuery, SheetType,
};
