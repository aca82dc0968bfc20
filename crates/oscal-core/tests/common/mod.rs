// crates/oscal-core/tests/common/mod.rs
// ============================================================================
// Module: Common Test Utilities
// Description: Shared OSCAL fixtures for oscal-core integration tests.
// Purpose: Provide reusable document builders and parse helpers.
// Dependencies: oscal-core, serde_json
// ============================================================================

//! ## Overview
//! Provides small OSCAL documents as `serde_json::Value` builders plus typed
//! parse helpers.

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

use oscal_core::Document;
use oscal_core::model::catalog::Catalog;
use oscal_core::model::profile::Profile;
use oscal_core::parse_document;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Metadata
// ============================================================================

/// Returns minimal valid metadata.
pub fn metadata(title: &str) -> Value {
    json!({
        "title": title,
        "oscal-version": "1.1.2",
        "last-modified": "2024-01-01T00:00:00Z"
    })
}

// ============================================================================
// SECTION: Catalog Fixtures
// ============================================================================

/// Returns a control with a title and optional params.
pub fn control(id: &str, title: &str) -> Value {
    json!({ "id": id, "title": title })
}

/// Returns a catalog envelope with the given top-level controls and groups.
pub fn catalog_value(controls: Vec<Value>, groups: Vec<Value>) -> Value {
    json!({
        "catalog": {
            "uuid": "cat-uuid",
            "metadata": metadata("Test Catalog"),
            "controls": controls,
            "groups": groups
        }
    })
}

/// Returns a catalog with `ac-1`, `ac-2` in an `ac` group and `si-1` in an
/// `si` group.
pub fn three_control_catalog() -> Value {
    catalog_value(
        Vec::new(),
        vec![
            json!({
                "id": "ac",
                "title": "Access Control",
                "controls": [control("ac-1", "Policy"), control("ac-2", "Account Management")]
            }),
            json!({
                "id": "si",
                "title": "System Integrity",
                "controls": [control("si-1", "Integrity Policy")]
            }),
        ],
    )
}

/// Parses a value that must be a catalog.
pub fn parse_catalog(value: Value) -> Catalog {
    match parse_document(value).expect("catalog parses").document {
        Document::Catalog(catalog) => catalog,
        other => panic!("expected catalog, got {:?}", other.document_type()),
    }
}

// ============================================================================
// SECTION: Profile Fixtures
// ============================================================================

/// Returns a profile envelope with the given imports and optional modify block.
pub fn profile_value(imports: Value, modify: Option<Value>) -> Value {
    let mut body = json!({
        "uuid": "profile-uuid",
        "metadata": metadata("Test Profile"),
        "imports": imports
    });
    if let Some(modify) = modify {
        body["modify"] = modify;
    }
    json!({ "profile": body })
}

/// Parses a value that must be a profile.
pub fn parse_profile(value: Value) -> Profile {
    match parse_document(value).expect("profile parses").document {
        Document::Profile(profile) => profile,
        other => panic!("expected profile, got {:?}", other.document_type()),
    }
}
