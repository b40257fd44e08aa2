// SPDX-License-Identifier: PMPL-1.0-or-later
//! Integration tests for a11y-audit

use a11y_audit::annotate::annotate;
use a11y_audit::config::{MarkerConfig, ScanConfig};
use a11y_audit::report::{generate_report, OutputFormat};
use a11y_audit::scanner;
use a11y_audit::sink::summary_line;
use a11y_audit::{
    AuditHandle, AuditReport, Auditor, Document, MemorySink, RuleId, Severity, SinkEvent,
};
use std::path::Path;
use tempfile::TempDir;

fn audit(html: &str) -> (AuditReport, MemorySink) {
    let mut handle = AuditHandle::with_document(Auditor::new(), MemorySink::new(), Document::parse(html));
    let report = handle.check_accessibility().expect("document is ready");
    let (_, sink) = handle.into_parts();
    (report, sink)
}

#[test]
fn test_scan_accessible_fixture() {
    let doc = scanner::scan_file(Path::new("tests/fixtures/accessible.html"), &Auditor::new())
        .expect("scan should succeed");

    assert!(
        doc.report.is_empty(),
        "Accessible fixture should have no findings, got {:?}",
        doc.report.findings.iter().map(|f| f.rule).collect::<Vec<_>>()
    );
    assert!(doc.report.passed());
}

#[test]
fn test_scan_inaccessible_fixture() {
    let doc = scanner::scan_file(Path::new("tests/fixtures/inaccessible.html"), &Auditor::new())
        .expect("scan should succeed");
    let report = &doc.report;

    let errors: Vec<RuleId> = report.errors().iter().map(|f| f.rule).collect();
    assert_eq!(
        errors,
        vec![
            RuleId::ImageAlt,
            RuleId::ButtonName,
            RuleId::FormLabel,
            RuleId::FormLabel,
            RuleId::LinkName,
            RuleId::RoleFocusable,
            RuleId::TableHeaders,
            RuleId::IframeTitle,
            RuleId::ClickHandlerRole,
        ]
    );
    assert_eq!(report.error_count, 9);
    assert_eq!(report.marked.len(), 9);

    let warnings: Vec<RuleId> = report.warnings().iter().map(|f| f.rule).collect();
    assert_eq!(
        warnings,
        vec![
            RuleId::ImageAltEmpty,
            RuleId::TableDescription,
            RuleId::LandmarkMain,
            RuleId::HeadingCount,
        ]
    );
}

#[test]
fn test_form_messages_name_control_type() {
    let doc = scanner::scan_file(Path::new("tests/fixtures/inaccessible.html"), &Auditor::new())
        .expect("scan should succeed");
    let messages: Vec<&str> = doc
        .report
        .by_rule(RuleId::FormLabel)
        .iter()
        .map(|f| f.message.as_str())
        .collect();
    assert!(messages[0].contains("text"));
    assert!(messages[0].contains("\"name\""));
    assert!(messages[1].contains("select-one"));
}

#[test]
fn test_minimal_fixture_passes() {
    let doc = scanner::scan_file(Path::new("tests/fixtures/minimal.html"), &Auditor::new())
        .expect("scan should succeed");
    assert!(doc.report.is_empty());
}

#[test]
fn test_single_image_without_alt() {
    let (report, sink) = audit(r#"<html><body><img src="photo.jpg" class="avatar"></body></html>"#);

    let errors = report.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].rule, RuleId::ImageAlt);
    assert!(errors[0].message.contains("avatar"));
    assert_eq!(report.error_count, 1);
    assert_eq!(sink.summaries(), vec![summary_line(1).as_str()]);
    assert!(sink.summaries()[0].contains("found 1 accessibility error(s)"));
}

#[test]
fn test_clean_page_reports_success() {
    let (report, sink) = audit("<html><body><main><h1>Title</h1><p>Text</p></main></body></html>");

    assert_eq!(report.error_count, 0);
    assert_eq!(report.warning_count(), 0);
    assert_eq!(
        sink.summaries(),
        vec!["Audit complete: no critical accessibility errors found."]
    );
}

#[test]
fn test_button_with_text_is_named() {
    let (report, _) = audit("<main><h1>T</h1><button>Submit</button></main>");
    assert!(report.by_rule(RuleId::ButtonName).is_empty());
}

#[test]
fn test_click_handler_without_role() {
    let (report, _) = audit(r#"<main><h1>T</h1><div onclick="go()">Go</div></main>"#);
    let errors = report.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].rule, RuleId::ClickHandlerRole);
}

#[test]
fn test_table_without_caption_is_only_a_warning() {
    let (report, sink) = audit("<main><h1>T</h1><table><tr><th>Name</th></tr></table></main>");

    assert!(report.by_rule(RuleId::TableHeaders).is_empty());
    let described = report.by_rule(RuleId::TableDescription);
    assert_eq!(described.len(), 1);
    assert_eq!(described[0].severity, Severity::Warning);
    assert_eq!(report.error_count, 0);

    let numbered = sink
        .events
        .iter()
        .filter(|e| matches!(e, SinkEvent::Finding { error_number: Some(_), .. }))
        .count();
    assert_eq!(numbered, 0);
}

#[test]
fn test_error_numbers_are_sequential() {
    let (_, sink) = audit(r#"<img src="a"><img src="b"><iframe src="c"></iframe>"#);
    let numbers: Vec<usize> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            SinkEvent::Finding { error_number, .. } => *error_number,
            _ => None,
        })
        .collect();
    assert_eq!(numbers, vec![1, 2, 3]);
}

#[test]
fn test_deferred_audit_through_handle() {
    let mut handle = AuditHandle::new(Auditor::new(), MemorySink::new());
    assert!(handle.check_accessibility().is_none());
    assert_eq!(handle.sink().runs(), 0);

    let report = handle
        .document_ready(Document::parse(r#"<img src="a.png">"#))
        .expect("first ready signal")
        .expect("queued run executes");

    assert_eq!(report.error_count, 1);
    assert_eq!(handle.sink().runs(), 1);

    let again = handle.check_accessibility().expect("ready documents run immediately");
    assert_eq!(again, report);
    assert_eq!(handle.sink().runs(), 2);
}

#[test]
fn test_annotated_fixture_outlines_errors() {
    let source = std::fs::read_to_string("tests/fixtures/inaccessible.html").unwrap();
    let audited = scanner::audit_source("inaccessible.html", &source, &Auditor::new()).unwrap();
    let html = annotate(&audited.document, &audited.report.marked, &MarkerConfig::default());

    assert_eq!(html.matches("outline: 2px solid red").count(), audited.report.error_count);

    // Annotated output parses back to a document with the same findings
    let reparsed = scanner::audit_source("annotated.html", &html, &Auditor::new()).unwrap();
    assert_eq!(reparsed.report.error_count, audited.report.error_count);
}

#[test]
fn test_directory_scan_reports() {
    let dir = TempDir::new().unwrap();
    std::fs::copy("tests/fixtures/accessible.html", dir.path().join("a.html")).unwrap();
    std::fs::copy("tests/fixtures/inaccessible.html", dir.path().join("b.html")).unwrap();

    let scan = scanner::scan_directory(dir.path(), &Auditor::new(), &ScanConfig::default())
        .expect("scan should succeed");
    assert_eq!(scan.documents.len(), 2);
    assert_eq!(scan.error_count(), 9);

    let text = generate_report(&scan, OutputFormat::Text);
    assert!(text.contains("a.html: 0 error(s), 0 warning(s)"));
    assert!(text.contains("RESULT: FAIL (9 error(s))"));

    let json: serde_json::Value =
        serde_json::from_str(&generate_report(&scan, OutputFormat::Json)).expect("valid JSON");
    assert_eq!(json["documents"].as_array().unwrap().len(), 2);
    assert!(json["generated_at"].is_string());

    let sarif: serde_json::Value =
        serde_json::from_str(&generate_report(&scan, OutputFormat::Sarif)).expect("valid SARIF");
    assert_eq!(sarif["version"], "2.1.0");
    assert_eq!(
        sarif["runs"][0]["results"].as_array().unwrap().len(),
        scan.total_findings()
    );
}

#[test]
fn test_disabled_rules_from_config() {
    let config = a11y_audit::config::parse_config(
        r#"
[rules]
disabled = ["landmark-main", "heading-count", "image-alt-empty", "table-description"]
"#,
    )
    .unwrap();
    let auditor = Auditor::from_config(&config.rules);

    let doc = scanner::scan_file(Path::new("tests/fixtures/inaccessible.html"), &auditor).unwrap();
    assert_eq!(doc.report.warning_count(), 0);
    assert_eq!(doc.report.error_count, 9);
}
