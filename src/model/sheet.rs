//! Generated sheet types and the sheet descriptors handed to the renderer.

use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use super::row::{RowInstance, RowType};

/// Which payload a sheet carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SheetKind {
    /// Rows are loaded by the renderer from the embedded query.
    Query,
    /// Rows are supplied at assembly time.
    Static,
}

/// Layout marker read by the renderer with its own defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LayoutTag {
    #[default]
    Default,
}

/// Page margins, in the renderer's units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 1.5,
            bottom: 1.5,
            left: 1.5,
            right: 1.5,
        }
    }
}

/// Sheet, header and margin layout metadata.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SheetLayout {
    pub sheet: LayoutTag,
    pub header: LayoutTag,
    pub margins: Margins,
}

/// Query payload of a query-backed sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetQuery {
    /// Full select statement.
    pub select: String,
    /// Rendered sort clause, also embedded in `select`.
    pub order: String,
    /// Whether `select` is a native passthrough query.
    pub native: bool,
}

/// A synthesized sheet type.
///
/// Cached once per source type and kind. The query payload is the only
/// mutable part: a later request for the same source type overwrites it.
/// Each read or overwrite is atomic per sheet.
#[derive(Debug)]
pub struct SheetType {
    name: String,
    row_type: Arc<RowType>,
    kind: SheetKind,
    layout: SheetLayout,
    query: Option<RwLock<SheetQuery>>,
}

impl SheetType {
    pub(crate) fn query_backed(
        name: String,
        row_type: Arc<RowType>,
        layout: SheetLayout,
        query: SheetQuery,
    ) -> Self {
        Self {
            name,
            row_type,
            kind: SheetKind::Query,
            layout,
            query: Some(RwLock::new(query)),
        }
    }

    pub(crate) fn data_backed(name: String, row_type: Arc<RowType>, layout: SheetLayout) -> Self {
        Self {
            name,
            row_type,
            kind: SheetKind::Static,
            layout,
            query: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn row_type(&self) -> &Arc<RowType> {
        &self.row_type
    }

    pub fn kind(&self) -> SheetKind {
        self.kind
    }

    pub fn layout(&self) -> &SheetLayout {
        &self.layout
    }

    /// Snapshot of the current query payload.
    pub fn query(&self) -> Option<SheetQuery> {
        self.query
            .as_ref()
            .map(|q| q.read().unwrap_or_else(PoisonError::into_inner).clone())
    }

    pub fn query_text(&self) -> Option<String> {
        self.query().map(|q| q.select)
    }

    pub fn order_text(&self) -> Option<String> {
        self.query().map(|q| q.order)
    }

    /// Replace the query text in place. Returns false for data-backed sheets.
    pub(crate) fn overwrite_query(&self, select: String, order: String) -> bool {
        match &self.query {
            Some(lock) => {
                let mut query = lock.write().unwrap_or_else(PoisonError::into_inner);
                query.select = select;
                query.order = order;
                true
            }
            None => false,
        }
    }

    /// Serializable view used for debug artifacts.
    pub fn definition(&self) -> SheetDefinition {
        SheetDefinition {
            name: self.name.clone(),
            row_type: self.row_type.name().to_string(),
            kind: self.kind,
            layout: self.layout,
            query: self.query(),
        }
    }
}

/// Point-in-time description of a sheet type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetDefinition {
    pub name: String,
    pub row_type: String,
    pub kind: SheetKind,
    pub layout: SheetLayout,
    pub query: Option<SheetQuery>,
}

/// What a sheet descriptor hands to the renderer: a query or rows, never both.
#[derive(Debug, Clone, PartialEq)]
pub enum SheetPayload {
    Query { select: String, native: bool },
    Rows(Vec<RowInstance>),
}

/// One sheet of a report, ready for rendering.
#[derive(Debug, Clone)]
pub struct SheetDescriptor {
    pub sheet_type: Arc<SheetType>,
    /// Display name of the sheet (the source type name).
    pub sheet_name: String,
    pub payload: SheetPayload,
}

impl SheetDescriptor {
    pub fn row_type(&self) -> &Arc<RowType> {
        self.sheet_type.row_type()
    }

    pub fn layout(&self) -> &SheetLayout {
        self.sheet_type.layout()
    }

    /// Query text captured when this descriptor was assembled.
    pub fn query_text(&self) -> Option<&str> {
        match &self.payload {
            SheetPayload::Query { select, .. } => Some(select),
            SheetPayload::Rows(_) => None,
        }
    }

    pub fn rows(&self) -> &[RowInstance] {
        match &self.payload {
            SheetPayload::Rows(rows) => rows,
            SheetPayload::Query { .. } => &[],
        }
    }
}

/// A named set of sheets passed to the external renderer.
#[derive(Debug, Clone)]
pub struct ReportDescription {
    pub name: String,
    pub sheets: Vec<SheetDescriptor>,
}
