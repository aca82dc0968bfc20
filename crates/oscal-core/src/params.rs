// crates/oscal-core/src/params.rs
// ============================================================================
// Module: Parameter Substitution
// Description: Replaces parameter insertion placeholders inside prose.
// Purpose: Produce display segments for prose rendering.
// Dependencies: regex, serde, crate::model
// ============================================================================

//! ## Overview
//! [`substitute_prose`] splits prose into [`ProseSegment`]s, resolving
//! `{{ insert: param, <id> }}` placeholders through a map built by
//! [`build_param_map`].
//! Invariants:
//! - Concatenating segment contents reproduces the input with only resolved
//!   placeholders replaced.
//! - Unknown ids are kept verbatim; substitution never fails.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::model::catalog::Parameter;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Display value lookup keyed by parameter id.
pub type ParamMap = BTreeMap<String, String>;

/// Piece of substituted prose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ProseSegment {
    /// Literal text, including unresolved placeholders.
    Text {
        /// Text content.
        content: String,
    },
    /// Resolved parameter value.
    Param {
        /// Parameter identifier.
        id: String,
        /// Display value.
        content: String,
    },
}

impl ProseSegment {
    /// Returns the segment's display content.
    #[must_use]
    pub fn content(&self) -> &str {
        match self {
            Self::Text {
                content,
            }
            | Self::Param {
                content,
                ..
            } => content,
        }
    }
}

// ============================================================================
// SECTION: Substitution
// ============================================================================

/// Placeholder pattern; the id runs until whitespace or `}`.
static INSERT_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\{\{\s*insert:\s*param,\s*([^\s}]+)\s*\}\}").ok());

/// Splits prose into text and resolved-parameter segments.
#[must_use]
pub fn substitute_prose(prose: &str, params: &ParamMap) -> Vec<ProseSegment> {
    let Some(pattern) = INSERT_PATTERN.as_ref() else {
        return vec![text_segment(prose)];
    };
    let mut segments = Vec::new();
    let mut cursor = 0;
    for captures in pattern.captures_iter(prose) {
        let (Some(whole), Some(id)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        if whole.start() > cursor {
            segments.push(text_segment(&prose[cursor .. whole.start()]));
        }
        match params.get(id.as_str()) {
            Some(value) => segments.push(ProseSegment::Param {
                id: id.as_str().to_string(),
                content: value.clone(),
            }),
            None => segments.push(text_segment(whole.as_str())),
        }
        cursor = whole.end();
    }
    if cursor < prose.len() {
        segments.push(text_segment(&prose[cursor ..]));
    }
    segments
}

/// Renders substituted prose back into one string.
#[must_use]
pub fn render_prose(prose: &str, params: &ParamMap) -> String {
    substitute_prose(prose, params).iter().map(ProseSegment::content).collect()
}

/// Builds a text segment.
fn text_segment(content: &str) -> ProseSegment {
    ProseSegment::Text {
        content: content.to_string(),
    }
}

// ============================================================================
// SECTION: Parameter Map
// ============================================================================

/// Chooses one display value per parameter.
///
/// Priority: first value, then `" | "`-joined choices, then label, then `[<id>]`.
#[must_use]
pub fn build_param_map<'a>(params: impl IntoIterator<Item = &'a Parameter>) -> ParamMap {
    params.into_iter().map(|param| (param.id.clone(), display_value(param))).collect()
}

/// Picks the display value for one parameter.
fn display_value(param: &Parameter) -> String {
    if let Some(first) = param.values.first() {
        return first.clone();
    }
    if let Some(select) = &param.select
        && !select.choice.is_empty()
    {
        return select.choice.join(" | ");
    }
    if let Some(label) = &param.label {
        return label.clone();
    }
    format!("[{}]", param.id)
}
