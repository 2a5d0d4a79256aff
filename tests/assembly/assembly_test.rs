//! Report assembly tests.

use std::fs;
use std::sync::{Arc, Mutex};

use quickreport::config::Settings;
use quickreport::model::Margins;
use quickreport::prelude::*;
use quickreport::synth::ArtifactStore;

fn assembly() -> ReportAssembly {
    ReportAssembly::new(Settings::default())
        .unwrap()
        .with_artifacts(ArtifactStore::disabled())
}

fn customer() -> SourceType {
    SourceType::new("Customer")
        .field("serialVersionUID", TypeTag::Int64)
        .field("id", TypeTag::Int32)
        .field("name", TypeTag::Text)
        .field("signedUp", TypeTag::Date)
        .other_field("orders", "Vec<Order>")
}

fn record(id: i32, name: &str) -> SourceRecord {
    SourceRecord::new(customer()).with("id", id).with("name", name)
}

/// Records what it was asked to render.
#[derive(Default)]
struct RecordingRenderer {
    seen: Mutex<Vec<(String, usize, ReportFormat)>>,
}

impl ReportRenderer for RecordingRenderer {
    fn render(&self, report: &ReportDescription, format: ReportFormat) -> ReportResult<Vec<u8>> {
        self.seen
            .lock()
            .unwrap()
            .push((report.name.clone(), report.sheets.len(), format));
        Ok(report.name.as_bytes().to_vec())
    }
}

struct FailingRenderer;

impl ReportRenderer for FailingRenderer {
    fn render(&self, _: &ReportDescription, _: ReportFormat) -> ReportResult<Vec<u8>> {
        Err(ReportError::Render("workbook is locked".to_string()))
    }
}

#[test]
fn test_row_type_identity_is_stable() {
    let assembly = assembly();
    let first = assembly.row_type(&customer()).unwrap();
    let second = assembly.row_type(&customer()).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(assembly.registry().names(), vec!["CustomerReportRow"]);
}

#[test]
fn test_query_report() {
    let assembly = assembly();
    let request = ReportRequest::define(customer(), "customers")
        .condition(Condition::equals_to(Some("id"), Some(Value::from(5))))
        .condition(Condition::is_not_null(Some("name")))
        .order(OrderSpec::order_by(SortDir::Asc, Some("name")));

    let report = assembly.assemble(&request).unwrap();

    assert_eq!(report.name, "customers");
    assert_eq!(report.sheets.len(), 1);
    let sheet = &report.sheets[0];
    assert_eq!(sheet.sheet_name, "Customer");
    assert_eq!(sheet.sheet_type.name(), "CustomerReportSheetQuery");
    assert_eq!(sheet.sheet_type.kind(), SheetKind::Query);
    assert!(sheet.rows().is_empty());
    assert_eq!(
        sheet.payload,
        SheetPayload::Query {
            select: " SELECT new CustomerReportRow( item.id, item.name, item.signedUp )  FROM Customer item  WHERE  ( id = 5 )  AND  ( name IS NOT NULL  )  ORDER BY name ASC ".to_string(),
            native: false,
        }
    );
    assert_eq!(sheet.layout().margins, Margins::default());
    assert_eq!(sheet.layout().margins.top, 1.5);

    let columns = sheet.row_type().columns();
    assert_eq!(columns[0].label, "ID");
    assert_eq!(columns[2].label, "SIGNED UP");
    assert!(columns[2].date_format.is_some());
    assert!(columns[0].date_format.is_none());
}

#[test]
fn test_query_sheet_overwritten_by_later_request() {
    let assembly = assembly();
    let first_request = ReportRequest::define(customer(), "customers")
        .condition(Condition::equals_to(Some("id"), Some(Value::from(1))));
    let second_request = ReportRequest::define(customer(), "customers")
        .condition(Condition::equals_to(Some("id"), Some(Value::from(2))));

    let first = assembly.assemble(&first_request).unwrap();
    let second = assembly.assemble(&second_request).unwrap();

    let first_sheet = &first.sheets[0].sheet_type;
    let second_sheet = &second.sheets[0].sheet_type;
    assert!(Arc::ptr_eq(first_sheet, second_sheet));

    let cached = first_sheet.query_text().unwrap();
    assert!(cached.contains("( id = 2 )"));
    assert!(!cached.contains("( id = 1 )"));

    // descriptors keep the text of their own request
    assert!(first.sheets[0].query_text().unwrap().contains("( id = 1 )"));
    assert!(second.sheets[0].query_text().unwrap().contains("( id = 2 )"));
}

#[test]
fn test_static_report_maps_rows() {
    let assembly = assembly();
    let records = vec![record(7, "Bob"), record(8, "Ann")];
    let request = ReportRequest::define(customer(), "customers").rows(&records);

    let report = assembly.assemble(&request).unwrap();
    let sheet = &report.sheets[0];

    assert_eq!(sheet.sheet_type.name(), "CustomerReportSheetData");
    assert_eq!(sheet.sheet_type.kind(), SheetKind::Static);
    assert!(sheet.query_text().is_none());
    assert_eq!(sheet.rows().len(), 2);
    assert_eq!(sheet.rows()[0].get("id").unwrap(), &Value::Int32(7));
    assert_eq!(sheet.rows()[1].get("name").unwrap(), &Value::from("Ann"));
    assert!(sheet.rows()[1].get("signedUp").unwrap().is_null());
}

#[test]
fn test_query_and_static_sheets_share_row_type() {
    let assembly = assembly();
    let records = vec![record(1, "Bob")];

    let query = assembly
        .assemble(&ReportRequest::define(customer(), "q"))
        .unwrap();
    let data = assembly
        .assemble(&ReportRequest::define(customer(), "d").rows(&records))
        .unwrap();

    assert!(Arc::ptr_eq(
        query.sheets[0].row_type(),
        data.sheets[0].row_type()
    ));
    assert_eq!(
        assembly.registry().names(),
        vec![
            "CustomerReportRow",
            "CustomerReportSheetData",
            "CustomerReportSheetQuery"
        ]
    );
}

#[test]
fn test_missing_identity_fails_before_synthesis() {
    let assembly = assembly();

    let no_name = ReportRequest::new().source_type(customer());
    let err = assembly.assemble(&no_name).unwrap_err();
    assert!(err.is_configuration());

    let no_source = ReportRequest::new().name("customers");
    let err = assembly.assemble(&no_source).unwrap_err();
    assert!(matches!(err, ReportError::Configuration(_)));

    assert!(assembly.registry().is_empty());
}

#[test]
fn test_render_delegates_to_renderer() {
    let assembly = assembly();
    let renderer = RecordingRenderer::default();
    let request = ReportRequest::define(customer(), "customers");

    let bytes = assembly
        .render(&request, &renderer, ReportFormat::Csv)
        .unwrap();

    assert_eq!(bytes, b"customers".to_vec());
    assert_eq!(
        renderer.seen.lock().unwrap().as_slice(),
        &[("customers".to_string(), 1, ReportFormat::Csv)]
    );
}

#[test]
fn test_render_error_propagates() {
    let assembly = assembly();
    let request = ReportRequest::define(customer(), "customers");
    let err = assembly
        .render(&request, &FailingRenderer, ReportFormat::Xlsx)
        .unwrap_err();
    assert!(matches!(err, ReportError::Render(_)));
}

#[test]
fn test_artifacts_written_once_per_type() {
    let dir = tempfile::tempdir().unwrap();
    let assembly = assembly().with_artifacts(ArtifactStore::at(dir.path()));

    assembly
        .assemble(&ReportRequest::define(customer(), "customers"))
        .unwrap();

    let row = fs::read_to_string(dir.path().join("CustomerReportRow")).unwrap();
    let row: serde_json::Value = serde_json::from_str(&row).unwrap();
    assert_eq!(row["name"], "CustomerReportRow");
    assert_eq!(row["columns"][1]["label"], "NAME");

    let sheet = fs::read_to_string(dir.path().join("CustomerReportSheetQuery")).unwrap();
    let sheet: serde_json::Value = serde_json::from_str(&sheet).unwrap();
    assert_eq!(sheet["row_type"], "CustomerReportRow");
    assert_eq!(sheet["query"]["native"], false);
}

#[test]
fn test_artifact_failure_does_not_abort_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, b"file").unwrap();

    let lenient = assembly().with_artifacts(ArtifactStore::at(&blocker));
    assert!(lenient.row_type(&customer()).is_ok());

    let strict = assembly().with_artifacts(ArtifactStore::at(&blocker).fail_on_error(true));
    assert!(matches!(
        strict.row_type(&customer()),
        Err(ReportError::Artifact(_))
    ));
}

#[test]
fn test_settings_drive_names_and_layout() {
    let mut settings = Settings::default();
    settings.naming.row_suffix = "Row".to_string();
    settings.layout.margin_right = 0.5;
    settings.query.row_alias = "c".to_string();
    let assembly = ReportAssembly::new(settings)
        .unwrap()
        .with_artifacts(ArtifactStore::disabled());

    let report = assembly
        .assemble(&ReportRequest::define(customer(), "customers"))
        .unwrap();
    let sheet = &report.sheets[0];

    assert_eq!(sheet.row_type().name(), "CustomerRow");
    assert_eq!(sheet.layout().margins.right, 0.5);
    assert!(sheet
        .query_text()
        .unwrap()
        .starts_with(" SELECT new CustomerRow( c.id, c.name, c.signedUp )  FROM Customer c"));
}
