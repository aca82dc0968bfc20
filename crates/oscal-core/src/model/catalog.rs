// crates/oscal-core/src/model/catalog.rs
// ============================================================================
// Module: OSCAL Catalog Model
// Description: Catalog, group, control, and parameter types.
// Purpose: Model the recursive control/group trees and their flattening.
// Dependencies: serde, crate::model::common
// ============================================================================

//! ## Overview
//! A [`Catalog`] carries a tree of [`Group`]s in parallel with a tree of
//! [`Control`]s. [`get_all_controls`] is the single flattening routine shared
//! by profile resolution and the differ.
//! Invariants:
//! - Flattening preserves document order: top-level controls first, then
//!   group controls in depth-first group order.
//! - Control enhancements stay nested inside their parent control.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::model::common::BackMatter;
use crate::model::common::Link;
use crate::model::common::Metadata;
use crate::model::common::Part;
use crate::model::common::Property;

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// OSCAL catalog document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Catalog {
    /// Document UUID.
    pub uuid: String,
    /// Document metadata.
    pub metadata: Metadata,
    /// Catalog-level parameters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Parameter>,
    /// Top-level controls.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub controls: Vec<Control>,
    /// Top-level groups.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<Group>,
    /// Back matter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back_matter: Option<BackMatter>,
}

/// Group of controls, possibly nested.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Group {
    /// Optional group identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Optional class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// Group title.
    #[serde(default)]
    pub title: String,
    /// Group parameters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Parameter>,
    /// Properties.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    /// Prose parts.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parts: Vec<Part>,
    /// Nested groups.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<Group>,
    /// Controls directly inside this group.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub controls: Vec<Control>,
}

/// Control (or control enhancement when nested).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Control {
    /// Control identifier, unique within its catalog.
    pub id: String,
    /// Optional class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// Control title.
    #[serde(default)]
    pub title: String,
    /// Control parameters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Parameter>,
    /// Properties.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    /// Links.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    /// Statement, guidance, and other prose parts.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parts: Vec<Part>,
    /// Control enhancements.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub controls: Vec<Control>,
}

// ============================================================================
// SECTION: Parameters
// ============================================================================

/// Control parameter.
///
/// # Invariants
/// - Only profile `set-parameters` overrides mutate a parameter, by `id` match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Parameter {
    /// Parameter identifier.
    pub id: String,
    /// Optional class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// Placeholder label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Usage description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
    /// Assigned values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
    /// Selection constraint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select: Option<ParameterSelection>,
    /// Value constraints.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<ParameterConstraint>,
    /// Guidance for choosing a value.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub guidelines: Vec<ParameterGuideline>,
    /// Properties.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
}

/// Choice-based parameter selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ParameterSelection {
    /// Cardinality (`one` or `one-or-more`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub how_many: Option<String>,
    /// Allowed choices.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choice: Vec<String>,
}

/// Parameter value constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ParameterConstraint {
    /// Constraint description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Constraint tests.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tests: Vec<ConstraintTest>,
}

/// Machine-checkable constraint test.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConstraintTest {
    /// Test expression.
    pub expression: String,
    /// Remarks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

/// Prose guideline for a parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ParameterGuideline {
    /// Guideline prose.
    #[serde(default)]
    pub prose: String,
}

// ============================================================================
// SECTION: Flattening
// ============================================================================

/// Returns every control of a catalog: top-level controls, then every
/// control reachable through the group tree.
#[must_use]
pub fn get_all_controls(catalog: &Catalog) -> Vec<&Control> {
    let mut controls: Vec<&Control> = catalog.controls.iter().collect();
    for group in &catalog.groups {
        collect_group_controls(group, &mut controls);
    }
    controls
}

/// Returns the number of controls [`get_all_controls`] yields.
#[must_use]
pub fn count_controls(catalog: &Catalog) -> usize {
    get_all_controls(catalog).len()
}

/// Appends a group's controls, then recurses into its sub-groups.
fn collect_group_controls<'a>(group: &'a Group, out: &mut Vec<&'a Control>) {
    out.extend(group.controls.iter());
    for child in &group.groups {
        collect_group_controls(child, out);
    }
}

impl Catalog {
    /// Looks up a control by id among [`get_all_controls`] and their enhancements.
    #[must_use]
    pub fn find_control(&self, id: &str) -> Option<&Control> {
        get_all_controls(self).into_iter().find_map(|control| find_in_control(control, id))
    }

    /// Returns catalog-level parameters, then the parameters of every
    /// control from [`get_all_controls`] with their enhancements.
    #[must_use]
    pub fn all_params(&self) -> Vec<&Parameter> {
        let mut params: Vec<&Parameter> = self.params.iter().collect();
        for control in get_all_controls(self) {
            collect_control_params(control, &mut params);
        }
        params
    }
}

/// Appends a control's parameters, then its enhancements' parameters.
fn collect_control_params<'a>(control: &'a Control, params: &mut Vec<&'a Parameter>) {
    params.extend(control.params.iter());
    for child in &control.controls {
        collect_control_params(child, params);
    }
}

/// Depth-first search through a control and its enhancements.
fn find_in_control<'a>(control: &'a Control, id: &str) -> Option<&'a Control> {
    if control.id == id {
        return Some(control);
    }
    control.controls.iter().find_map(|child| find_in_control(child, id))
}
