//! The seam to the external spreadsheet renderer.

use serde::{Deserialize, Serialize};

use crate::error::ReportResult;
use crate::model::ReportDescription;

/// Output document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Xlsx,
    /// First sheet only, as comma-separated text.
    Csv,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Xlsx => "xlsx",
            ReportFormat::Csv => "csv",
        }
    }
}

/// Turns a report description into a document.
///
/// Query-backed sheets are executed by the renderer itself; data-backed
/// sheets carry their rows.
pub trait ReportRenderer {
    fn render(&self, report: &ReportDescription, format: ReportFormat) -> ReportResult<Vec<u8>>;
}

impl<T: ReportRenderer + ?Sized> ReportRenderer for &T {
    fn render(&self, report: &ReportDescription, format: ReportFormat) -> ReportResult<Vec<u8>> {
        (**self).render(report, format)
    }
}
