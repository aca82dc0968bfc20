// crates/oscal-core/tests/href.rs
// ============================================================================
// Module: Href Classifier Tests
// Description: Classification cases and property tests for `parse_href`.
// Purpose: Detect misclassification and panics across arbitrary input.
// ============================================================================

//! Href classification tests.

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
    reason = "Test-only assertions and helpers are permitted."
)]

use oscal_core::HrefKind;
use oscal_core::parse_href;
use proptest::prelude::*;

#[test]
fn urn_is_not_resolvable() {
    let href = parse_href("urn:uuid:1234#frag");
    assert_eq!(href.kind, HrefKind::Urn);
    assert_eq!(href.path, "urn:uuid:1234#frag");
    assert_eq!(href.fragment, None);
    assert!(!href.resolvable);
}

#[test]
fn absolute_url_splits_first_fragment_only() {
    let href = parse_href("https://example.com/cat.json#a#b");
    assert_eq!(href.kind, HrefKind::AbsoluteUrl);
    assert_eq!(href.path, "https://example.com/cat.json");
    assert_eq!(href.fragment.as_deref(), Some("a#b"));
    assert!(href.resolvable);
}

#[test]
fn scheme_prefixes_are_case_insensitive() {
    assert_eq!(parse_href("HTTP://EXAMPLE.COM/x").kind, HrefKind::AbsoluteUrl);
    assert_eq!(parse_href("URN:x").kind, HrefKind::Urn);
}

#[test]
fn fragment_has_empty_path() {
    let href = parse_href("#res-1");
    assert_eq!(href.kind, HrefKind::Fragment);
    assert_eq!(href.path, "");
    assert_eq!(href.fragment.as_deref(), Some("res-1"));
    assert!(href.resolvable);

    let bare = parse_href("#");
    assert_eq!(bare.fragment.as_deref(), Some(""));
}

#[test]
fn relative_path_is_not_resolvable() {
    let href = parse_href("../catalogs/cat.json#x");
    assert_eq!(href.kind, HrefKind::Relative);
    assert_eq!(href.path, "../catalogs/cat.json");
    assert_eq!(href.fragment.as_deref(), Some("x"));
    assert!(!href.resolvable);
}

#[test]
fn empty_string_is_relative() {
    let href = parse_href("");
    assert_eq!(href.kind, HrefKind::Relative);
    assert_eq!(href.path, "");
    assert_eq!(href.fragment, None);
    assert!(!href.resolvable);
}

#[test]
fn multibyte_input_near_prefix_does_not_panic() {
    assert_eq!(parse_href("ü").kind, HrefKind::Relative);
    assert_eq!(parse_href("htt\u{00e9}://x").kind, HrefKind::Relative);
}

proptest! {
    #[test]
    fn classification_is_total(input in ".*") {
        let href = parse_href(&input);
        let resolvable_kinds = matches!(href.kind, HrefKind::AbsoluteUrl | HrefKind::Fragment);
        prop_assert_eq!(href.resolvable, resolvable_kinds);
    }

    #[test]
    fn path_and_fragment_reassemble_input(input in "[a-z:/#.]{0,24}") {
        let href = parse_href(&input);
        if href.kind != HrefKind::Urn {
            let rebuilt = match &href.fragment {
                Some(fragment) => format!("{}#{}", href.path, fragment),
                None => href.path.clone(),
            };
            prop_assert_eq!(rebuilt, input);
        }
    }
}
