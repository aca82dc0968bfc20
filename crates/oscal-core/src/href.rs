// crates/oscal-core/src/href.rs
// ============================================================================
// Module: Href Classifier
// Description: Classifies OSCAL reference strings by addressing scheme.
// Purpose: Give resolution one total, pure entry point for href handling.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! [`parse_href`] sorts a reference into one of four [`HrefKind`]s and splits
//! off the fragment. It is total: every string classifies, nothing panics.
//! Invariants:
//! - Only the first `#` splits path from fragment.
//! - Relative references are never directly resolvable; callers join them
//!   against a base URL first.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Addressing scheme of an href.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HrefKind {
    /// `urn:` reference.
    Urn,
    /// `http://` or `https://` URL.
    AbsoluteUrl,
    /// Same-document `#fragment`.
    Fragment,
    /// Anything else, including the empty string.
    Relative,
}

/// Classified href.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ParsedHref {
    /// Addressing scheme.
    pub kind: HrefKind,
    /// Path portion (empty for fragments, the full string for URNs).
    pub path: String,
    /// Fragment after the first `#`, if any.
    pub fragment: Option<String>,
    /// Whether the href can be acted on without a base URL.
    pub resolvable: bool,
}

// ============================================================================
// SECTION: Classification
// ============================================================================

/// Classifies an href.
#[must_use]
pub fn parse_href(href: &str) -> ParsedHref {
    if has_prefix_ignore_case(href, "urn:") {
        return ParsedHref {
            kind: HrefKind::Urn,
            path: href.to_string(),
            fragment: None,
            resolvable: false,
        };
    }
    if let Some(fragment) = href.strip_prefix('#') {
        return ParsedHref {
            kind: HrefKind::Fragment,
            path: String::new(),
            fragment: Some(fragment.to_string()),
            resolvable: true,
        };
    }
    let (path, fragment) = split_fragment(href);
    let absolute =
        has_prefix_ignore_case(href, "http://") || has_prefix_ignore_case(href, "https://");
    ParsedHref {
        kind: if absolute { HrefKind::AbsoluteUrl } else { HrefKind::Relative },
        path: path.to_string(),
        fragment: fragment.map(str::to_string),
        resolvable: absolute,
    }
}

/// Splits at the first `#`.
fn split_fragment(href: &str) -> (&str, Option<&str>) {
    match href.split_once('#') {
        Some((path, fragment)) => (path, Some(fragment)),
        None => (href, None),
    }
}

/// ASCII case-insensitive prefix test that never slices inside a code point.
fn has_prefix_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .as_bytes()
        .get(.. prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix.as_bytes()))
}
