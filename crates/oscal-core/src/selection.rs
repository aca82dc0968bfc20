// crates/oscal-core/src/selection.rs
// ============================================================================
// Module: Profile Selection and Modification
// Description: Control filtering and profile modification primitives.
// Purpose: Provide the pure steps of profile resolution.
// Dependencies: crate::model
// ============================================================================

//! ## Overview
//! These functions implement the synchronous half of profile resolution:
//! [`select_controls`] applies one import's include/exclude rules to a
//! catalog, and [`apply_modifications`] applies `set-parameters` then
//! `alters` to the merged control list.
//! Invariants:
//! - Selection preserves catalog order.
//! - Include runs before exclude; set-parameters runs before alters.
//! - Override fields absent from a `set-parameters` entry are left untouched.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::model::catalog::Catalog;
use crate::model::catalog::Control;
use crate::model::catalog::Parameter;
use crate::model::catalog::get_all_controls;
use crate::model::common::Part;
use crate::model::profile::Add;
use crate::model::profile::Alter;
use crate::model::profile::Import;
use crate::model::profile::Modify;
use crate::model::profile::Remove;
use crate::model::profile::SelectControlById;
use crate::model::profile::SetParameter;

// ============================================================================
// SECTION: Selection
// ============================================================================

/// Applies an import's inclusion and exclusion rules to a catalog.
///
/// An `include-controls` selector with an absent or empty `with-ids` list
/// selects every control.
#[must_use]
pub fn select_controls(catalog: &Catalog, import: &Import) -> Vec<Control> {
    let all = get_all_controls(catalog);
    let included = match included_ids(import) {
        Some(ids) => all.into_iter().filter(|control| ids.contains(control.id.as_str())).collect(),
        None => all,
    };
    let excluded = selector_ids(&import.exclude_controls);
    included
        .into_iter()
        .filter(|control| !excluded.contains(control.id.as_str()))
        .cloned()
        .collect()
}

/// Returns the included id set, or `None` when every control is included.
fn included_ids(import: &Import) -> Option<BTreeSet<&str>> {
    if import.include_all.is_some() || import.include_controls.is_empty() {
        return None;
    }
    let mut ids = BTreeSet::new();
    for selector in &import.include_controls {
        match &selector.with_ids {
            Some(with_ids) if !with_ids.is_empty() => {
                ids.extend(with_ids.iter().map(String::as_str));
            }
            _ => return None,
        }
    }
    Some(ids)
}

/// Collects the `with-ids` of every selector.
fn selector_ids(selectors: &[SelectControlById]) -> BTreeSet<&str> {
    selectors
        .iter()
        .filter_map(|selector| selector.with_ids.as_ref())
        .flatten()
        .map(String::as_str)
        .collect()
}

// ============================================================================
// SECTION: Modification
// ============================================================================

/// Applies a profile's `modify` block: parameter overrides, then alterations.
pub fn apply_modifications(controls: &mut [Control], modify: Option<&Modify>) {
    let Some(modify) = modify else {
        return;
    };
    apply_set_parameters(controls, &modify.set_parameters);
    apply_alters(controls, &modify.alters);
}

/// Applies `set-parameters` overrides to every matching parameter, including
/// parameters of nested enhancements.
pub fn apply_set_parameters(controls: &mut [Control], overrides: &[SetParameter]) {
    if overrides.is_empty() {
        return;
    }
    let by_id: BTreeMap<&str, &SetParameter> =
        overrides.iter().map(|entry| (entry.param_id.as_str(), entry)).collect();
    for control in controls {
        override_control_params(control, &by_id);
    }
}

/// Recursively overrides parameters of one control.
fn override_control_params(control: &mut Control, by_id: &BTreeMap<&str, &SetParameter>) {
    for param in &mut control.params {
        if let Some(entry) = by_id.get(param.id.as_str()) {
            override_param(param, entry);
        }
    }
    for child in &mut control.controls {
        override_control_params(child, by_id);
    }
}

/// Replaces only the fields present in the override.
fn override_param(param: &mut Parameter, entry: &SetParameter) {
    if let Some(values) = &entry.values {
        param.values.clone_from(values);
    }
    if let Some(label) = &entry.label {
        param.label = Some(label.clone());
    }
    if let Some(select) = &entry.select {
        param.select = Some(select.clone());
    }
    if let Some(constraints) = &entry.constraints {
        param.constraints.clone_from(constraints);
    }
}

/// Applies `alters` to every control whose id matches, including enhancements.
pub fn apply_alters(controls: &mut [Control], alters: &[Alter]) {
    if alters.is_empty() {
        return;
    }
    for control in controls {
        alter_control(control, alters);
    }
}

/// Recursively applies matching alterations to one control.
fn alter_control(control: &mut Control, alters: &[Alter]) {
    let id = control.id.clone();
    for alter in alters.iter().filter(|alter| alter.control_id == id) {
        for remove in &alter.removes {
            remove_parts(&mut control.parts, remove);
        }
        for add in &alter.adds {
            add_content(control, add);
        }
    }
    for child in &mut control.controls {
        alter_control(child, alters);
    }
}

/// Removes parts matching `by-name` or `by-id` at any depth.
fn remove_parts(parts: &mut Vec<Part>, remove: &Remove) {
    parts.retain(|part| !part_matches(part, remove));
    for part in parts {
        remove_parts(&mut part.parts, remove);
    }
}

/// Returns true when a part matches a removal rule.
fn part_matches(part: &Part, remove: &Remove) -> bool {
    let by_name = remove.by_name.as_deref().is_some_and(|name| part.name == name);
    let by_id =
        remove.by_id.as_deref().is_some_and(|id| part.id.as_deref().is_some_and(|own| own == id));
    by_name || by_id
}

/// Inserts parts at the requested position and appends properties.
fn add_content(control: &mut Control, add: &Add) {
    if add.position.as_deref() == Some("starting") {
        control.parts.splice(0 .. 0, add.parts.iter().cloned());
    } else {
        control.parts.extend(add.parts.iter().cloned());
    }
    control.props.extend(add.props.iter().cloned());
}
