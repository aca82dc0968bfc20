// crates/oscal-core/src/diff/compare.rs
// ============================================================================
// Module: Element Comparison
// Description: Field-level change descriptions for keyed elements.
// Purpose: Feed `diff_by_key` with per-type compare functions.
// Dependencies: crate::model
// ============================================================================

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use crate::model::assessment::AssessmentResult;
use crate::model::assessment::Finding;
use crate::model::assessment::Observation;
use crate::model::assessment::PoamItem;
use crate::model::assessment::Risk;
use crate::model::catalog::Control;
use crate::model::catalog::Group;
use crate::model::catalog::Parameter;
use crate::model::common::Resource;
use crate::model::implementation::Capability;
use crate::model::implementation::DefinedComponent;
use crate::model::implementation::ImplementedRequirement;
use crate::model::implementation::InventoryItem;
use crate::model::implementation::SspImplementedRequirement;
use crate::model::implementation::SystemCharacteristics;
use crate::model::implementation::SystemComponent;
use crate::model::implementation::SystemUser;
use crate::model::profile::Alter;
use crate::model::profile::Import;
use crate::model::profile::SetParameter;

// ============================================================================
// SECTION: Change Collector
// ============================================================================

/// Accumulates human-readable change descriptions.
#[derive(Debug, Default)]
struct Changes(Vec<String>);

impl Changes {
    /// Records a scalar text change.
    fn text(&mut self, field: &str, left: &str, right: &str) -> &mut Self {
        if left != right {
            self.0.push(format!("{field}: \"{left}\" -> \"{right}\""));
        }
        self
    }

    /// Records an optional text change.
    fn optional(&mut self, field: &str, left: Option<&str>, right: Option<&str>) -> &mut Self {
        match (left, right) {
            (Some(left), Some(right)) => {
                self.text(field, left, right);
            }
            (None, Some(_)) => self.0.push(format!("{field} added")),
            (Some(_), None) => self.0.push(format!("{field} removed")),
            (None, None) => {}
        }
        self
    }

    /// Records membership changes between two identifier lists.
    fn ids<'a>(
        &mut self,
        field: &str,
        left: impl IntoIterator<Item = &'a str>,
        right: impl IntoIterator<Item = &'a str>,
    ) -> &mut Self {
        let left: BTreeSet<&str> = left.into_iter().collect();
        let right: BTreeSet<&str> = right.into_iter().collect();
        let added: Vec<&str> = right.difference(&left).copied().collect();
        let removed: Vec<&str> = left.difference(&right).copied().collect();
        if !added.is_empty() {
            self.0.push(format!("{field} added: {}", added.join(", ")));
        }
        if !removed.is_empty() {
            self.0.push(format!("{field} removed: {}", removed.join(", ")));
        }
        self
    }

    /// Records an opaque structural change.
    fn value<T: PartialEq + ?Sized>(&mut self, field: &str, left: &T, right: &T) -> &mut Self {
        if left != right {
            self.0.push(format!("{field} changed"));
        }
        self
    }

    /// Records a count change.
    fn count(&mut self, field: &str, left: usize, right: usize) -> &mut Self {
        if left != right {
            self.0.push(format!("{field}: {left} -> {right}"));
        }
        self
    }

    /// Returns the collected descriptions.
    fn finish(&mut self) -> Vec<String> {
        std::mem::take(&mut self.0)
    }
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Compares two controls with the same id.
pub(super) fn controls(left: &&Control, right: &&Control) -> Vec<String> {
    let mut changes = Changes::default();
    changes
        .text("title", &left.title, &right.title)
        .optional("class", left.class.as_deref(), right.class.as_deref())
        .ids(
            "params",
            left.params.iter().map(|param| param.id.as_str()),
            right.params.iter().map(|param| param.id.as_str()),
        );
    let shared_params_differ = left.params.iter().any(|param| {
        right.params.iter().any(|other| other.id == param.id && other != param)
    });
    if shared_params_differ {
        changes.0.push("params changed".to_string());
    }
    changes
        .value("props", &left.props, &right.props)
        .value("links", &left.links, &right.links)
        .value("parts", &left.parts, &right.parts)
        .ids(
            "enhancements",
            left.controls.iter().map(|child| child.id.as_str()),
            right.controls.iter().map(|child| child.id.as_str()),
        );
    let shared_enhancements_differ = left.controls.iter().any(|child| {
        right.controls.iter().any(|other| other.id == child.id && other != child)
    });
    if shared_enhancements_differ {
        changes.0.push("enhancements changed".to_string());
    }
    changes.finish()
}

/// Compares two groups with the same key.
pub(super) fn groups(left: &&Group, right: &&Group) -> Vec<String> {
    Changes::default()
        .text("title", &left.title, &right.title)
        .optional("class", left.class.as_deref(), right.class.as_deref())
        .ids(
            "controls",
            left.controls.iter().map(|control| control.id.as_str()),
            right.controls.iter().map(|control| control.id.as_str()),
        )
        .count("groups", left.groups.len(), right.groups.len())
        .value("parts", &left.parts, &right.parts)
        .finish()
}

/// Compares two parameters with the same id.
pub(super) fn params(left: &&Parameter, right: &&Parameter) -> Vec<String> {
    Changes::default()
        .optional("label", left.label.as_deref(), right.label.as_deref())
        .optional("usage", left.usage.as_deref(), right.usage.as_deref())
        .value("values", &left.values, &right.values)
        .value("select", &left.select, &right.select)
        .value("constraints", &left.constraints, &right.constraints)
        .value("guidelines", &left.guidelines, &right.guidelines)
        .finish()
}

/// Compares two back-matter resources with the same uuid.
pub(super) fn resources(left: &&Resource, right: &&Resource) -> Vec<String> {
    Changes::default()
        .optional("title", left.title.as_deref(), right.title.as_deref())
        .optional("description", left.description.as_deref(), right.description.as_deref())
        .ids(
            "rlinks",
            left.rlinks.iter().map(|rlink| rlink.href.as_str()),
            right.rlinks.iter().map(|rlink| rlink.href.as_str()),
        )
        .finish()
}

// ============================================================================
// SECTION: Profile
// ============================================================================

/// Compares two imports with the same href.
pub(super) fn imports(left: &&Import, right: &&Import) -> Vec<String> {
    let mut changes = Changes::default();
    match (left.include_all.is_some(), right.include_all.is_some()) {
        (false, true) => changes.0.push("include-all added".to_string()),
        (true, false) => changes.0.push("include-all removed".to_string()),
        _ => {}
    }
    changes
        .ids(
            "include-controls",
            selector_ids(&left.include_controls),
            selector_ids(&right.include_controls),
        )
        .ids(
            "exclude-controls",
            selector_ids(&left.exclude_controls),
            selector_ids(&right.exclude_controls),
        )
        .finish()
}

/// Flattens selector ids.
fn selector_ids(
    selectors: &[crate::model::profile::SelectControlById],
) -> impl Iterator<Item = &str> {
    selectors
        .iter()
        .filter_map(|selector| selector.with_ids.as_ref())
        .flatten()
        .map(String::as_str)
}

/// Compares two parameter overrides with the same param-id.
pub(super) fn set_parameters(left: &&SetParameter, right: &&SetParameter) -> Vec<String> {
    Changes::default()
        .optional("label", left.label.as_deref(), right.label.as_deref())
        .value("values", &left.values, &right.values)
        .value("select", &left.select, &right.select)
        .value("constraints", &left.constraints, &right.constraints)
        .finish()
}

/// Compares two alterations with the same control-id.
pub(super) fn alters(left: &&Alter, right: &&Alter) -> Vec<String> {
    Changes::default()
        .value("removes", &left.removes, &right.removes)
        .value("adds", &left.adds, &right.adds)
        .finish()
}

// ============================================================================
// SECTION: Component Definition
// ============================================================================

/// Compares two defined components with the same uuid.
pub(super) fn defined_components(
    left: &&DefinedComponent,
    right: &&DefinedComponent,
) -> Vec<String> {
    Changes::default()
        .text("title", &left.title, &right.title)
        .text("type", &left.component_type, &right.component_type)
        .optional("description", left.description.as_deref(), right.description.as_deref())
        .value("props", &left.props, &right.props)
        .ids(
            "control-implementations",
            left.control_implementations.iter().map(|set| set.source.as_str()),
            right.control_implementations.iter().map(|set| set.source.as_str()),
        )
        .finish()
}

/// Compares two component-definition requirements with the same uuid.
pub(super) fn implemented_requirements(
    left: &&ImplementedRequirement,
    right: &&ImplementedRequirement,
) -> Vec<String> {
    Changes::default()
        .text("control-id", &left.control_id, &right.control_id)
        .optional("description", left.description.as_deref(), right.description.as_deref())
        .value("props", &left.props, &right.props)
        .finish()
}

/// Compares two capabilities with the same uuid.
pub(super) fn capabilities(left: &&Capability, right: &&Capability) -> Vec<String> {
    Changes::default()
        .text("name", &left.name, &right.name)
        .optional("description", left.description.as_deref(), right.description.as_deref())
        .finish()
}

// ============================================================================
// SECTION: System Security Plan
// ============================================================================

/// Compares system characteristics.
pub(super) fn system_characteristics(
    left: &&SystemCharacteristics,
    right: &&SystemCharacteristics,
) -> Vec<String> {
    Changes::default()
        .optional("system-name", left.system_name.as_deref(), right.system_name.as_deref())
        .optional("description", left.description.as_deref(), right.description.as_deref())
        .optional(
            "security-sensitivity-level",
            left.security_sensitivity_level.as_deref(),
            right.security_sensitivity_level.as_deref(),
        )
        .optional(
            "status",
            left.status.as_ref().map(|status| status.state.as_str()),
            right.status.as_ref().map(|status| status.state.as_str()),
        )
        .finish()
}

/// Compares two SSP requirements with the same control-id.
pub(super) fn ssp_requirements(
    left: &&SspImplementedRequirement,
    right: &&SspImplementedRequirement,
) -> Vec<String> {
    Changes::default()
        .ids(
            "statements",
            left.statements.iter().map(|statement| statement.statement_id.as_str()),
            right.statements.iter().map(|statement| statement.statement_id.as_str()),
        )
        .value("statement content", &left.statements, &right.statements)
        .ids(
            "by-components",
            left.by_components.iter().map(|by| by.component_uuid.as_str()),
            right.by_components.iter().map(|by| by.component_uuid.as_str()),
        )
        .value("by-component content", &left.by_components, &right.by_components)
        .value("props", &left.props, &right.props)
        .finish()
}

/// Compares two system components with the same uuid.
pub(super) fn system_components(left: &&SystemComponent, right: &&SystemComponent) -> Vec<String> {
    Changes::default()
        .text("title", &left.title, &right.title)
        .text("type", &left.component_type, &right.component_type)
        .optional("description", left.description.as_deref(), right.description.as_deref())
        .optional(
            "status",
            left.status.as_ref().map(|status| status.state.as_str()),
            right.status.as_ref().map(|status| status.state.as_str()),
        )
        .finish()
}

/// Compares two users with the same uuid.
pub(super) fn users(left: &&SystemUser, right: &&SystemUser) -> Vec<String> {
    Changes::default()
        .optional("title", left.title.as_deref(), right.title.as_deref())
        .ids(
            "role-ids",
            left.role_ids.iter().map(String::as_str),
            right.role_ids.iter().map(String::as_str),
        )
        .finish()
}

/// Compares two inventory items with the same uuid.
pub(super) fn inventory_items(left: &&InventoryItem, right: &&InventoryItem) -> Vec<String> {
    Changes::default()
        .optional("description", left.description.as_deref(), right.description.as_deref())
        .value("props", &left.props, &right.props)
        .finish()
}

// ============================================================================
// SECTION: Assessment
// ============================================================================

/// Compares two assessment results with the same uuid.
pub(super) fn results(left: &&AssessmentResult, right: &&AssessmentResult) -> Vec<String> {
    Changes::default()
        .text("title", &left.title, &right.title)
        .optional("description", left.description.as_deref(), right.description.as_deref())
        .optional("start", left.start.as_deref(), right.start.as_deref())
        .optional("end", left.end.as_deref(), right.end.as_deref())
        .count("findings", left.findings.len(), right.findings.len())
        .count("observations", left.observations.len(), right.observations.len())
        .count("risks", left.risks.len(), right.risks.len())
        .finish()
}

/// Compares two findings with the same uuid.
pub(super) fn findings(left: &&Finding, right: &&Finding) -> Vec<String> {
    Changes::default()
        .text("title", &left.title, &right.title)
        .optional("description", left.description.as_deref(), right.description.as_deref())
        .optional(
            "target",
            left.target.as_ref().map(|target| target.target_id.as_str()),
            right.target.as_ref().map(|target| target.target_id.as_str()),
        )
        .optional(
            "target status",
            finding_state(left),
            finding_state(right),
        )
        .finish()
}

/// Returns a finding's target status.
fn finding_state(finding: &Finding) -> Option<&str> {
    finding.target.as_ref()?.status.as_ref().map(|status| status.state.as_str())
}

/// Compares two observations with the same uuid.
pub(super) fn observations(left: &&Observation, right: &&Observation) -> Vec<String> {
    Changes::default()
        .optional("title", left.title.as_deref(), right.title.as_deref())
        .optional("description", left.description.as_deref(), right.description.as_deref())
        .ids(
            "methods",
            left.methods.iter().map(String::as_str),
            right.methods.iter().map(String::as_str),
        )
        .optional("collected", left.collected.as_deref(), right.collected.as_deref())
        .finish()
}

/// Compares two risks with the same uuid.
pub(super) fn risks(left: &&Risk, right: &&Risk) -> Vec<String> {
    Changes::default()
        .text("title", &left.title, &right.title)
        .optional("description", left.description.as_deref(), right.description.as_deref())
        .optional("status", left.status.as_deref(), right.status.as_deref())
        .finish()
}

/// Compares two POA&M items with the same key.
pub(super) fn poam_items(left: &&PoamItem, right: &&PoamItem) -> Vec<String> {
    Changes::default()
        .text("title", &left.title, &right.title)
        .optional("description", left.description.as_deref(), right.description.as_deref())
        .value("props", &left.props, &right.props)
        .finish()
}
