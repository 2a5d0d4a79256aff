//! Report assembly.
//!
//! [`ReportAssembly`] owns the type registry, the settings, the artifact
//! store and the row mapper, and turns a [`ReportRequest`] into a
//! [`ReportDescription`] with one sheet:
//!
//! - no rows: a query-backed sheet whose select embeds the request's
//!   conditions and orders
//! - rows: a data-backed sheet with the rows mapped into the row type
//!
//! Errors propagate unchanged; the caller decides whether to abort the
//! report or substitute an empty sheet.

mod render;
mod request;

pub use render::{ReportFormat, ReportRenderer};
pub use request::ReportRequest;

use std::sync::Arc;

use crate::config::Settings;
use crate::error::ReportResult;
use crate::mapper::StructuralRowMapper;
use crate::model::{
    ReportDescription, RowInstance, RowType, SheetDescriptor, SheetPayload, SheetType,
};
use crate::registry::TypeRegistry;
use crate::schema::{Reportable, SourceType};
use crate::synth::{ArtifactStore, RowTypeSynthesizer, SheetTypeSynthesizer};

#[derive(Debug)]
pub struct ReportAssembly {
    settings: Settings,
    registry: TypeRegistry,
    artifacts: ArtifactStore,
    mapper: StructuralRowMapper,
}

impl ReportAssembly {
    /// Create an assembly with its own empty registry.
    pub fn new(settings: Settings) -> ReportResult<Self> {
        settings.validate()?;
        let artifacts = ArtifactStore::from_settings(&settings.artifacts)?;
        Ok(Self {
            settings,
            registry: TypeRegistry::new(),
            artifacts,
            mapper: StructuralRowMapper::new(),
        })
    }

    /// Create an assembly from the discovered settings file.
    pub fn load() -> ReportResult<Self> {
        Self::new(Settings::load()?)
    }

    /// Replace the artifact store.
    pub fn with_artifacts(mut self, artifacts: ArtifactStore) -> Self {
        self.artifacts = artifacts;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn artifacts(&self) -> &ArtifactStore {
        &self.artifacts
    }

    pub fn mapper(&self) -> &StructuralRowMapper {
        &self.mapper
    }

    pub fn row_types(&self) -> RowTypeSynthesizer<'_> {
        RowTypeSynthesizer::new(&self.registry, &self.settings, &self.artifacts)
    }

    pub fn sheet_types(&self) -> SheetTypeSynthesizer<'_> {
        SheetTypeSynthesizer::new(&self.registry, &self.settings, &self.artifacts)
    }

    /// Row type for `source`, synthesized on first use.
    pub fn row_type(&self, source: &SourceType) -> ReportResult<Arc<RowType>> {
        self.row_types().synthesize(source)
    }

    /// Map source objects into rows of `source`'s row type.
    pub fn map_rows<'s, S>(
        &self,
        source: &SourceType,
        rows: impl IntoIterator<Item = &'s S>,
    ) -> ReportResult<Vec<RowInstance>>
    where
        S: Reportable + ?Sized + 's,
    {
        let row_type = self.row_type(source)?;
        self.mapper.map(&row_type, rows)
    }

    /// Build the description of the requested report.
    pub fn assemble(&self, request: &ReportRequest<'_>) -> ReportResult<ReportDescription> {
        let (source, name) = request.validate()?;
        let row_type = self.row_type(source)?;

        let (sheet_type, payload) = match request.static_rows() {
            Some(rows) => {
                let sheet = self.sheet_types().synthesize_static(source, &row_type)?;
                let rows = self.mapper.map(&row_type, rows.iter().copied())?;
                (sheet, SheetPayload::Rows(rows))
            }
            None => {
                let query = request.query_builder();
                let (sheet, query) = self.sheet_types().synthesize_query_with_text(
                    source,
                    &row_type,
                    &query.filter_text(),
                    &query.order_text(),
                )?;
                let payload = SheetPayload::Query {
                    select: query.select,
                    native: query.native,
                };
                (sheet, payload)
            }
        };

        tracing::debug!(
            report = %name,
            sheet_type = %sheet_type.name(),
            "assembled report"
        );
        Ok(ReportDescription {
            name: name.to_string(),
            sheets: vec![descriptor(sheet_type, source, payload)],
        })
    }

    /// Assemble the report and hand it to `renderer`.
    pub fn render(
        &self,
        request: &ReportRequest<'_>,
        renderer: &dyn ReportRenderer,
        format: ReportFormat,
    ) -> ReportResult<Vec<u8>> {
        let report = self.assemble(request)?;
        let bytes = renderer.render(&report, format)?;
        tracing::info!(
            report = %report.name,
            format = format.extension(),
            bytes = bytes.len(),
            "rendered report"
        );
        Ok(bytes)
    }
}

fn descriptor(
    sheet_type: Arc<SheetType>,
    source: &SourceType,
    payload: SheetPayload,
) -> SheetDescriptor {
    SheetDescriptor {
        sheet_type,
        sheet_name: source.name.clone(),
        payload,
    }
}
