// crates/oscal-core/tests/parser.rs
// ============================================================================
// Module: Document Parser Tests
// Description: Type detection, version detection, and required-field checks.
// Purpose: Ensure every document type parses or fails with a named field.
// Dependencies: oscal-core, serde_json
// ============================================================================

//! ## Overview
//! Exercises the ingestion boundary for all six document types.

#![allow(dead_code, reason = "Common module may have unused helpers.")]
#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use oscal_core::DocumentFormat;
use oscal_core::DocumentType;
use oscal_core::ParseError;
use oscal_core::UNKNOWN_VERSION;
use oscal_core::count_controls;
use oscal_core::detect_document_type;
use oscal_core::detect_oscal_version;
use oscal_core::parse_document;
use oscal_core::parse_document_text;
use oscal_core::parse_json_text;
use serde_json::json;

use crate::common::metadata;
use crate::common::parse_catalog;

// ============================================================================
// SECTION: Catalog Scenario
// ============================================================================

#[test]
fn minimal_catalog_parses_with_one_control() {
    let value = json!({
        "catalog": {
            "uuid": "u1",
            "metadata": { "title": "T", "oscal-version": "1.1.2" },
            "controls": [{ "id": "ac-1", "title": "AC" }]
        }
    });
    let parsed = parse_document(value).expect("parse");
    assert_eq!(parsed.document_type, DocumentType::Catalog);
    assert_eq!(parsed.oscal_version, "1.1.2");
    assert_eq!(parsed.document.uuid(), "u1");
    let oscal_core::Document::Catalog(catalog) = parsed.document else {
        panic!("expected catalog");
    };
    assert_eq!(count_controls(&catalog), 1);
}

#[test]
fn catalog_without_title_names_the_field() {
    let value = json!({
        "catalog": {
            "uuid": "u1",
            "metadata": { "oscal-version": "1.1.2" },
            "controls": [{ "id": "ac-1", "title": "AC" }]
        }
    });
    let err = parse_document(value).unwrap_err();
    match &err {
        ParseError::MissingRequiredField {
            field,
            message,
        } => {
            assert_eq!(field, "metadata.title");
            assert!(message.contains("title"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("metadata.title"));
}

#[test]
fn empty_uuid_is_rejected() {
    let value = json!({ "catalog": { "uuid": "  ", "metadata": metadata("T") } });
    let err = parse_document(value).unwrap_err();
    assert!(matches!(err, ParseError::MissingRequiredField { ref field, .. } if field == "uuid"));
}

#[test]
fn missing_metadata_is_rejected() {
    let value = json!({ "catalog": { "uuid": "u1" } });
    let err = parse_document(value).unwrap_err();
    assert!(
        matches!(err, ParseError::MissingRequiredField { ref field, .. } if field == "metadata")
    );
}

#[test]
fn mistyped_nested_field_is_invalid_structure() {
    let value = json!({
        "catalog": {
            "uuid": "u1",
            "metadata": metadata("T"),
            "controls": [{ "id": "ac-1", "title": 42 }]
        }
    });
    let err = parse_document(value).unwrap_err();
    assert!(matches!(
        err,
        ParseError::InvalidStructure { document_type: DocumentType::Catalog, .. }
    ));
}

// ============================================================================
// SECTION: Type Detection
// ============================================================================

#[test]
fn unknown_envelope_is_unrecognized() {
    let err = parse_document(json!({ "widget": { "uuid": "u" } })).unwrap_err();
    assert_eq!(err, ParseError::UnrecognizedType);
}

#[test]
fn non_object_envelope_value_is_unrecognized() {
    let err = parse_document(json!({ "catalog": "not an object" })).unwrap_err();
    assert_eq!(err, ParseError::UnrecognizedType);
}

#[test]
fn detection_follows_priority_order() {
    let value = json!({ "profile": {}, "catalog": {} });
    assert_eq!(detect_document_type(&value), Some(DocumentType::Catalog));
}

#[test]
fn version_defaults_to_unknown() {
    let value = json!({ "catalog": { "uuid": "u1", "metadata": { "title": "T" } } });
    assert_eq!(detect_oscal_version(&value), UNKNOWN_VERSION);
}

// ============================================================================
// SECTION: Per-Type Requirements
// ============================================================================

#[test]
fn profile_requires_non_empty_imports() {
    let value = json!({ "profile": { "uuid": "p", "metadata": metadata("P"), "imports": [] } });
    let err = parse_document(value).unwrap_err();
    assert!(
        matches!(err, ParseError::MissingRequiredField { ref field, .. } if field == "imports")
    );
}

#[test]
fn ssp_requires_each_top_level_object() {
    let full = json!({
        "uuid": "s",
        "metadata": metadata("SSP"),
        "import-profile": { "href": "profile.json" },
        "system-characteristics": { "system-name": "Sys" },
        "system-implementation": {},
        "control-implementation": { "implemented-requirements": [] }
    });
    let parsed = parse_document(json!({ "system-security-plan": full.clone() })).expect("ssp");
    assert_eq!(parsed.document_type, DocumentType::SystemSecurityPlan);

    for key in
        ["import-profile", "system-characteristics", "system-implementation", "control-implementation"]
    {
        let mut body = full.clone();
        body.as_object_mut().unwrap().remove(key);
        let err = parse_document(json!({ "system-security-plan": body })).unwrap_err();
        assert!(
            matches!(err, ParseError::MissingRequiredField { ref field, .. } if field == key),
            "expected {key} to be required"
        );
    }
}

#[test]
fn assessment_results_require_results() {
    let value = json!({ "assessment-results": { "uuid": "a", "metadata": metadata("AR") } });
    let err = parse_document(value).unwrap_err();
    assert!(
        matches!(err, ParseError::MissingRequiredField { ref field, .. } if field == "results")
    );

    let value = json!({
        "assessment-results": {
            "uuid": "a",
            "metadata": metadata("AR"),
            "results": [{ "uuid": "r1", "title": "Run 1" }]
        }
    });
    assert_eq!(parse_document(value).unwrap().document_type, DocumentType::AssessmentResults);
}

#[test]
fn poam_requires_items() {
    let value = json!({
        "plan-of-action-and-milestones": { "uuid": "m", "metadata": metadata("POAM") }
    });
    let err = parse_document(value).unwrap_err();
    assert!(
        matches!(err, ParseError::MissingRequiredField { ref field, .. } if field == "poam-items")
    );
}

#[test]
fn component_definition_needs_only_common_fields() {
    let value = json!({ "component-definition": { "uuid": "c", "metadata": metadata("CD") } });
    let parsed = parse_document(value).unwrap();
    assert_eq!(parsed.document_type, DocumentType::ComponentDefinition);
    assert_eq!(parsed.document.metadata().title, "CD");
}

// ============================================================================
// SECTION: Text Entry Points
// ============================================================================

#[test]
fn malformed_json_is_malformed_input() {
    let err = parse_json_text("{ not json").unwrap_err();
    assert!(matches!(err, ParseError::MalformedInput(_)));
}

#[test]
fn format_detection_skips_whitespace_and_bom() {
    assert_eq!(DocumentFormat::detect("\u{feff}  <catalog/>"), DocumentFormat::Xml);
    assert_eq!(DocumentFormat::detect("\n{}"), DocumentFormat::Json);
}

#[test]
fn document_text_dispatches_on_format() {
    let json_text = crate::common::three_control_catalog().to_string();
    let parsed = parse_document_text(&json_text).expect("json");
    assert_eq!(parsed.document_type, DocumentType::Catalog);

    let xml_text = r#"<catalog uuid="x1"><metadata><title>X</title><oscal-version>1.1.2</oscal-version></metadata></catalog>"#;
    let parsed = parse_document_text(xml_text).expect("xml");
    assert_eq!(parsed.document.uuid(), "x1");
}

#[test]
fn grouped_controls_are_counted() {
    let catalog = parse_catalog(crate::common::three_control_catalog());
    assert_eq!(count_controls(&catalog), 3);
}
