// crates/oscal-core/src/model/profile.rs
// ============================================================================
// Module: OSCAL Profile Model
// Description: Profile imports, selectors, merge directives, and modifications.
// Purpose: Type the inputs of profile resolution.
// Dependencies: serde, crate::model
// ============================================================================

//! ## Overview
//! A [`Profile`] imports catalogs (by href), selects controls with
//! [`SelectControlById`] rules, and modifies them with [`SetParameter`] and
//! [`Alter`] instructions.
//! Invariants:
//! - `imports` is non-empty once a profile passed parsing.
//! - Override fields are `Option` so an absent field can be told apart
//!   from an empty one.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

use crate::model::catalog::ParameterConstraint;
use crate::model::catalog::ParameterSelection;
use crate::model::common::BackMatter;
use crate::model::common::Metadata;
use crate::model::common::Part;
use crate::model::common::Property;

// ============================================================================
// SECTION: Profile
// ============================================================================

/// OSCAL profile document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Profile {
    /// Document UUID.
    pub uuid: String,
    /// Document metadata.
    pub metadata: Metadata,
    /// Imported catalogs, in resolution order.
    pub imports: Vec<Import>,
    /// Merge directive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merge: Option<Merge>,
    /// Modification directives.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modify: Option<Modify>,
    /// Back matter used for `#uuid` import lookups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back_matter: Option<BackMatter>,
}

/// Catalog import entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Import {
    /// Reference to the imported document.
    pub href: String,
    /// Present when every control is included.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_all: Option<IncludeAll>,
    /// Inclusion selectors.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include_controls: Vec<SelectControlById>,
    /// Exclusion selectors.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_controls: Vec<SelectControlById>,
}

/// Empty marker object (`"include-all": {}`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncludeAll {}

/// Control selector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SelectControlById {
    /// Whether child controls come along (`yes`/`no`); carried, not interpreted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_child_controls: Option<String>,
    /// Selected control identifiers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_ids: Option<Vec<String>>,
}

// ============================================================================
// SECTION: Merge
// ============================================================================

/// Merge directive, passed through unresolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Merge {
    /// Combination rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combine: Option<Combine>,
    /// Keep the catalog structure as-is. XML carries the flag as text.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_flag")]
    pub as_is: Option<bool>,
    /// Flatten the result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flat: Option<IncludeAll>,
}

/// Boolean as written in JSON or as element text converted from XML.
#[derive(Deserialize)]
#[serde(untagged)]
enum FlagInput {
    /// Native boolean.
    Bool(bool),
    /// Lexical `xs:boolean` form.
    Text(String),
}

/// Accepts `true`/`false` as booleans or as `true`, `false`, `1`, `0` text.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<FlagInput>::deserialize(deserializer)? {
        None => Ok(None),
        Some(FlagInput::Bool(value)) => Ok(Some(value)),
        Some(FlagInput::Text(text)) => match text.trim() {
            "true" | "1" => Ok(Some(true)),
            "false" | "0" => Ok(Some(false)),
            other => Err(serde::de::Error::custom(format!("invalid boolean value: {other}"))),
        },
    }
}

/// Duplicate-control combination rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Combine {
    /// Combination method (`use-first`, `merge`, `keep`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

// ============================================================================
// SECTION: Modify
// ============================================================================

/// Modification directives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Modify {
    /// Parameter overrides.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub set_parameters: Vec<SetParameter>,
    /// Content alterations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alters: Vec<Alter>,
}

/// Parameter override keyed by `param_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SetParameter {
    /// Target parameter identifier.
    pub param_id: String,
    /// Replacement label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Replacement values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
    /// Replacement selection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select: Option<ParameterSelection>,
    /// Replacement constraints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Vec<ParameterConstraint>>,
}

/// Alteration of a single control.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Alter {
    /// Target control identifier.
    pub control_id: String,
    /// Removals, applied before additions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub removes: Vec<Remove>,
    /// Additions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub adds: Vec<Add>,
}

/// Part removal matched by name or id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Remove {
    /// Matches `part.name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by_name: Option<String>,
    /// Matches `part.id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by_id: Option<String>,
}

/// Content addition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Add {
    /// `starting` prepends; anything else appends.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    /// Parts to insert.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parts: Vec<Part>,
    /// Properties to append.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
}
