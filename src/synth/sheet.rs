//! Sheet type synthesis.
//!
//! Sheets are cached per source type and kind, not per query. A repeated
//! query-backed request for the same source type rewrites the cached
//! sheet's query text and returns the same sheet.

use std::sync::Arc;

use super::artifact::ArtifactStore;
use super::row::ensure_identifier;
use crate::config::Settings;
use crate::error::{ReportError, ReportResult};
use crate::model::{LayoutTag, Margins, RowType, SheetLayout, SheetQuery, SheetType};
use crate::query::select_statement;
use crate::registry::{GeneratedType, TypeRegistry};
use crate::schema::SourceType;

pub struct SheetTypeSynthesizer<'a> {
    registry: &'a TypeRegistry,
    settings: &'a Settings,
    artifacts: &'a ArtifactStore,
}

impl<'a> SheetTypeSynthesizer<'a> {
    pub fn new(
        registry: &'a TypeRegistry,
        settings: &'a Settings,
        artifacts: &'a ArtifactStore,
    ) -> Self {
        Self {
            registry,
            settings,
            artifacts,
        }
    }

    /// Return the query-backed sheet for `source`, embedding a select built
    /// from `filter_text` and `order_text`.
    pub fn synthesize_query(
        &self,
        source: &SourceType,
        row_type: &Arc<RowType>,
        filter_text: &str,
        order_text: &str,
    ) -> ReportResult<Arc<SheetType>> {
        self.synthesize_query_with_text(source, row_type, filter_text, order_text)
            .map(|(sheet, _)| sheet)
    }

    /// Like [`synthesize_query`](Self::synthesize_query), also returning the
    /// query this call wrote. Another request may overwrite the cached text
    /// afterwards; the returned value is unaffected.
    pub fn synthesize_query_with_text(
        &self,
        source: &SourceType,
        row_type: &Arc<RowType>,
        filter_text: &str,
        order_text: &str,
    ) -> ReportResult<(Arc<SheetType>, SheetQuery)> {
        let name = self.settings.naming.query_sheet_name(&source.name);
        let query = SheetQuery {
            select: select_statement(
                row_type,
                &source.name,
                &self.settings.query.row_alias,
                filter_text,
                order_text,
            ),
            order: order_text.to_string(),
            native: self.settings.query.native,
        };

        let (generated, inserted) = self.registry.get_or_try_insert_with(&name, || {
            ensure_identifier(&name, &name, "type name")?;
            Ok(GeneratedType::Sheet(Arc::new(SheetType::query_backed(
                name.clone(),
                Arc::clone(row_type),
                self.layout(),
                query.clone(),
            ))))
        })?;
        let sheet = as_sheet(&name, &generated)?;

        if inserted {
            tracing::debug!(type_name = %name, "synthesized query sheet type");
            self.artifacts.persist(&name, &sheet.definition())?;
            return Ok((sheet, query));
        }

        if sheet.overwrite_query(query.select.clone(), query.order.clone()) {
            tracing::debug!(type_name = %name, "overwrote cached sheet query");
        }
        // the cached flag wins over the current setting
        let native = sheet.query().map_or(query.native, |q| q.native);
        Ok((sheet, SheetQuery { native, ..query }))
    }

    /// Return the data-backed sheet for `source`. A cached sheet is returned
    /// unchanged.
    pub fn synthesize_static(
        &self,
        source: &SourceType,
        row_type: &Arc<RowType>,
    ) -> ReportResult<Arc<SheetType>> {
        let name = self.settings.naming.data_sheet_name(&source.name);

        let (generated, inserted) = self.registry.get_or_try_insert_with(&name, || {
            ensure_identifier(&name, &name, "type name")?;
            Ok(GeneratedType::Sheet(Arc::new(SheetType::data_backed(
                name.clone(),
                Arc::clone(row_type),
                self.layout(),
            ))))
        })?;
        let sheet = as_sheet(&name, &generated)?;

        if inserted {
            tracing::debug!(type_name = %name, "synthesized data sheet type");
            self.artifacts.persist(&name, &sheet.definition())?;
        }
        Ok(sheet)
    }

    fn layout(&self) -> SheetLayout {
        let layout = &self.settings.layout;
        SheetLayout {
            sheet: LayoutTag::Default,
            header: LayoutTag::Default,
            margins: Margins {
                top: layout.margin_top,
                bottom: layout.margin_bottom,
                left: layout.margin_left,
                right: layout.margin_right,
            },
        }
    }
}

fn as_sheet(name: &str, generated: &GeneratedType) -> ReportResult<Arc<SheetType>> {
    generated
        .as_sheet()
        .cloned()
        .ok_or_else(|| ReportError::synthesis(name, "name is registered to a row type"))
}
