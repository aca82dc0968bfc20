// crates/oscal-core/tests/selection.rs
// ============================================================================
// Module: Profile Selection Tests
// Description: Include/exclude filtering and modify-block application.
// Purpose: Ensure profile tailoring follows the fixed step order.
// Dependencies: oscal-core, serde_json
// ============================================================================

//! ## Overview
//! Tests `select_controls` and `apply_modifications` against small catalogs.

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

use oscal_core::apply_modifications;
use oscal_core::get_all_controls;
use oscal_core::model::catalog::Control;
use oscal_core::select_controls;
use serde_json::json;

use crate::common::catalog_value;
use crate::common::control;
use crate::common::parse_catalog;
use crate::common::parse_profile;
use crate::common::profile_value;
use crate::common::three_control_catalog;

fn ids(controls: &[Control]) -> Vec<&str> {
    controls.iter().map(|control| control.id.as_str()).collect()
}

// ============================================================================
// SECTION: Flattening
// ============================================================================

#[test]
fn flattening_visits_top_level_then_nested_groups() {
    let catalog = parse_catalog(catalog_value(
        vec![control("top-1", "Top")],
        vec![json!({
            "id": "outer",
            "title": "Outer",
            "controls": [control("outer-1", "Outer One")],
            "groups": [{
                "id": "inner",
                "title": "Inner",
                "controls": [control("inner-1", "Inner One")]
            }]
        })],
    ));
    let flattened: Vec<&str> =
        get_all_controls(&catalog).into_iter().map(|control| control.id.as_str()).collect();
    assert_eq!(flattened, vec!["top-1", "outer-1", "inner-1"]);
}

#[test]
fn lookup_and_parameters_reach_grouped_enhancements() {
    let catalog = parse_catalog(json!({
        "catalog": {
            "uuid": "cat",
            "metadata": { "title": "Cat", "oscal-version": "1.1.2" },
            "params": [{ "id": "org" }],
            "groups": [{
                "id": "ac",
                "title": "Access Control",
                "controls": [{
                    "id": "ac-2",
                    "title": "Accounts",
                    "params": [{ "id": "ac-2_prm_1" }],
                    "controls": [{
                        "id": "ac-2.1",
                        "title": "Automated",
                        "params": [{ "id": "ac-2.1_prm_1" }]
                    }]
                }]
            }]
        }
    }));

    let found = catalog.find_control("ac-2.1").expect("enhancement found");
    assert_eq!(found.title, "Automated");
    assert!(catalog.find_control("ac-9").is_none());
    let params: Vec<&str> = catalog.all_params().into_iter().map(|param| param.id.as_str()).collect();
    assert_eq!(params, vec!["org", "ac-2_prm_1", "ac-2.1_prm_1"]);
}

// ============================================================================
// SECTION: Selection
// ============================================================================

#[test]
fn include_controls_filters_in_catalog_order() {
    let catalog = parse_catalog(three_control_catalog());
    let profile = parse_profile(profile_value(
        json!([{ "href": "cat.json", "include-controls": [{ "with-ids": ["ac-2", "ac-1"] }] }]),
        None,
    ));
    let selected = select_controls(&catalog, &profile.imports[0]);
    assert_eq!(ids(&selected), vec!["ac-1", "ac-2"]);
}

#[test]
fn include_all_and_no_selector_include_everything() {
    let catalog = parse_catalog(three_control_catalog());
    let profile = parse_profile(profile_value(
        json!([
            { "href": "a.json", "include-all": {} },
            { "href": "b.json" }
        ]),
        None,
    ));
    assert_eq!(select_controls(&catalog, &profile.imports[0]).len(), 3);
    assert_eq!(select_controls(&catalog, &profile.imports[1]).len(), 3);
}

#[test]
fn selector_without_ids_includes_everything() {
    let catalog = parse_catalog(three_control_catalog());
    let profile = parse_profile(profile_value(
        json!([{ "href": "cat.json", "include-controls": [{ "with-child-controls": "yes" }] }]),
        None,
    ));
    assert_eq!(select_controls(&catalog, &profile.imports[0]).len(), 3);
}

#[test]
fn exclusion_runs_after_inclusion() {
    let catalog = parse_catalog(three_control_catalog());
    let profile = parse_profile(profile_value(
        json!([{
            "href": "cat.json",
            "include-all": {},
            "exclude-controls": [{ "with-ids": ["ac-2"] }]
        }]),
        None,
    ));
    let selected = select_controls(&catalog, &profile.imports[0]);
    assert_eq!(ids(&selected), vec!["ac-1", "si-1"]);
}

// ============================================================================
// SECTION: Modification
// ============================================================================

#[test]
fn set_parameters_replace_only_present_fields() {
    let catalog = parse_catalog(catalog_value(
        vec![json!({
            "id": "ac-1",
            "title": "Policy",
            "params": [{ "id": "ac-1_prm_1", "label": "frequency", "values": ["yearly"] }],
            "controls": [{
                "id": "ac-1.1",
                "title": "Enhancement",
                "params": [{ "id": "ac-1.1_prm_1", "label": "period" }]
            }]
        })],
        Vec::new(),
    ));
    let profile = parse_profile(profile_value(
        json!([{ "href": "cat.json" }]),
        Some(json!({
            "set-parameters": [
                { "param-id": "ac-1_prm_1", "values": ["monthly"] },
                { "param-id": "ac-1.1_prm_1", "label": "window" }
            ]
        })),
    ));
    let mut controls = select_controls(&catalog, &profile.imports[0]);
    apply_modifications(&mut controls, profile.modify.as_ref());

    let param = &controls[0].params[0];
    assert_eq!(param.values, vec!["monthly".to_string()]);
    assert_eq!(param.label.as_deref(), Some("frequency"));
    let nested = &controls[0].controls[0].params[0];
    assert_eq!(nested.label.as_deref(), Some("window"));
}

#[test]
fn alters_remove_before_adding() {
    let catalog = parse_catalog(catalog_value(
        vec![json!({
            "id": "ac-1",
            "title": "Policy",
            "parts": [
                { "id": "ac-1_smt", "name": "statement", "prose": "Do it." },
                { "id": "ac-1_gdn", "name": "guidance", "prose": "Old guidance." }
            ]
        })],
        Vec::new(),
    ));
    let profile = parse_profile(profile_value(
        json!([{ "href": "cat.json" }]),
        Some(json!({
            "alters": [{
                "control-id": "ac-1",
                "removes": [{ "by-name": "guidance" }],
                "adds": [
                    { "position": "starting", "parts": [{ "name": "overview", "prose": "First." }] },
                    {
                        "parts": [{ "name": "guidance", "prose": "New guidance." }],
                        "props": [{ "name": "status", "value": "tailored" }]
                    }
                ]
            }]
        })),
    ));
    let mut controls = select_controls(&catalog, &profile.imports[0]);
    apply_modifications(&mut controls, profile.modify.as_ref());

    let names: Vec<&str> = controls[0].parts.iter().map(|part| part.name.as_str()).collect();
    assert_eq!(names, vec!["overview", "statement", "guidance"]);
    assert_eq!(controls[0].parts[2].prose.as_deref(), Some("New guidance."));
    assert_eq!(controls[0].props[0].value, "tailored");
}

#[test]
fn remove_by_id_reaches_nested_parts() {
    let catalog = parse_catalog(catalog_value(
        vec![json!({
            "id": "ac-1",
            "title": "Policy",
            "parts": [{
                "id": "ac-1_smt",
                "name": "statement",
                "parts": [
                    { "id": "ac-1_smt.a", "name": "item" },
                    { "id": "ac-1_smt.b", "name": "item" }
                ]
            }]
        })],
        Vec::new(),
    ));
    let profile = parse_profile(profile_value(
        json!([{ "href": "cat.json" }]),
        Some(json!({ "alters": [{ "control-id": "ac-1", "removes": [{ "by-id": "ac-1_smt.a" }] }] })),
    ));
    let mut controls = select_controls(&catalog, &profile.imports[0]);
    apply_modifications(&mut controls, profile.modify.as_ref());
    let nested = &controls[0].parts[0].parts;
    assert_eq!(nested.len(), 1);
    assert_eq!(nested[0].id.as_deref(), Some("ac-1_smt.b"));
}

#[test]
fn controls_without_matches_pass_through() {
    let catalog = parse_catalog(three_control_catalog());
    let profile = parse_profile(profile_value(
        json!([{ "href": "cat.json" }]),
        Some(json!({ "alters": [{ "control-id": "zz-9", "removes": [{ "by-name": "statement" }] }] })),
    ));
    let original = select_controls(&catalog, &profile.imports[0]);
    let mut modified = original.clone();
    apply_modifications(&mut modified, profile.modify.as_ref());
    assert_eq!(original, modified);
}

#[test]
fn alters_apply_to_parent_and_enhancement() {
    let catalog = parse_catalog(catalog_value(
        vec![json!({
            "id": "ac-2",
            "title": "Account Management",
            "parts": [{ "name": "statement", "prose": "Manage accounts." }],
            "controls": [{
                "id": "ac-2.1",
                "title": "Automated Management",
                "parts": [{ "name": "guidance", "prose": "Old." }]
            }]
        })],
        Vec::new(),
    ));
    let profile = parse_profile(profile_value(
        json!([{ "href": "cat.json" }]),
        Some(json!({
            "alters": [
                { "control-id": "ac-2", "adds": [{ "props": [{ "name": "status", "value": "tailored" }] }] },
                {
                    "control-id": "ac-2.1",
                    "removes": [{ "by-name": "guidance" }],
                    "adds": [{ "parts": [{ "name": "guidance", "prose": "New." }] }]
                }
            ]
        })),
    ));
    let mut controls = select_controls(&catalog, &profile.imports[0]);
    apply_modifications(&mut controls, profile.modify.as_ref());

    assert_eq!(controls[0].props[0].value, "tailored");
    let enhancement = &controls[0].controls[0];
    assert_eq!(enhancement.parts.len(), 1);
    assert_eq!(enhancement.parts[0].prose.as_deref(), Some("New."));
    assert!(enhancement.props.is_empty());
}
