// crates/oscal-core/src/diff/documents.rs
// ============================================================================
// Module: Document Diffs
// Description: Per-type decomposition of documents into keyed sections.
// Purpose: Produce a `DocumentDiffResult` for any pair of same-typed documents.
// Dependencies: crate::diff, crate::model
// ============================================================================

//! ## Overview
//! Each document type is split into named sections, each keyed by the
//! element's natural identifier:
//! - catalog: controls and parameters by id, groups by id (falling back to
//!   title), back-matter resources by uuid
//! - profile: imports by href, set-parameters by param-id, alters by control-id
//! - SSP: implemented requirements by control-id, everything else by uuid
//! - component definitions, assessment results, and POA&Ms: by uuid
//!
//! Invariants:
//! - Section order and names are fixed per document type.
//! - [`diff_documents`] returns `None` when the document types differ.

// ============================================================================
// SECTION: Imports
// ============================================================================

use super::DiffSection;
use super::DocumentDiffResult;
use super::FieldDiff;
use super::MetadataDiff;
use super::compare;
use super::diff_by_key;
use crate::model::Document;
use crate::model::DocumentType;
use crate::model::assessment::AssessmentResults;
use crate::model::assessment::Finding;
use crate::model::assessment::Observation;
use crate::model::assessment::PlanOfActionAndMilestones;
use crate::model::assessment::Risk;
use crate::model::catalog::Catalog;
use crate::model::catalog::Control;
use crate::model::catalog::Parameter;
use crate::model::catalog::get_all_controls;
use crate::model::common::BackMatter;
use crate::model::common::Metadata;
use crate::model::common::Resource;
use crate::model::implementation::ComponentDefinition;
use crate::model::implementation::ImplementedRequirement;
use crate::model::implementation::SystemSecurityPlan;
use crate::model::profile::Profile;

// ============================================================================
// SECTION: Dispatch
// ============================================================================

/// Diffs two documents of the same type.
///
/// Returns `None` when the documents have different types.
#[must_use]
pub fn diff_documents(left: &Document, right: &Document) -> Option<DocumentDiffResult> {
    let result = match (left, right) {
        (Document::Catalog(left), Document::Catalog(right)) => diff_catalog(left, right),
        (Document::Profile(left), Document::Profile(right)) => diff_profile(left, right),
        (Document::ComponentDefinition(left), Document::ComponentDefinition(right)) => {
            diff_component_definition(left, right)
        }
        (Document::SystemSecurityPlan(left), Document::SystemSecurityPlan(right)) => {
            diff_ssp(left, right)
        }
        (Document::AssessmentResults(left), Document::AssessmentResults(right)) => {
            diff_assessment_results(left, right)
        }
        (Document::PlanOfActionAndMilestones(left), Document::PlanOfActionAndMilestones(right)) => {
            diff_poam(left, right)
        }
        _ => return None,
    };
    Some(result)
}

/// Compares the identifying metadata fields.
#[must_use]
pub fn diff_metadata(left: &Metadata, right: &Metadata) -> MetadataDiff {
    MetadataDiff {
        title: FieldDiff::new(Some(&left.title), Some(&right.title)),
        version: FieldDiff::new(left.version.as_deref(), right.version.as_deref()),
        oscal_version: FieldDiff::new(Some(&left.oscal_version), Some(&right.oscal_version)),
        last_modified: FieldDiff::new(left.last_modified.as_deref(), right.last_modified.as_deref()),
    }
}

// ============================================================================
// SECTION: Catalog and Profile
// ============================================================================

/// Diffs two catalogs.
#[must_use]
pub fn diff_catalog(left: &Catalog, right: &Catalog) -> DocumentDiffResult {
    let left_controls = get_all_controls(left);
    let right_controls = get_all_controls(right);
    let controls = diff_by_key(
        &left_controls,
        &right_controls,
        |control: &&Control| control.id.clone(),
        |control: &&Control| format!("{} {}", control.id, control.title),
        compare::controls,
    );

    let left_groups: Vec<_> = left.groups.iter().collect();
    let right_groups: Vec<_> = right.groups.iter().collect();
    let groups = diff_by_key(
        &left_groups,
        &right_groups,
        |group| group.id.clone().unwrap_or_else(|| group.title.clone()),
        |group| group.title.clone(),
        compare::groups,
    );

    let parameters = diff_by_key(
        &left.all_params(),
        &right.all_params(),
        |param: &&Parameter| param.id.clone(),
        |param: &&Parameter| param.label.clone().unwrap_or_else(|| param.id.clone()),
        compare::params,
    );

    DocumentDiffResult::new(
        DocumentType::Catalog,
        diff_metadata(&left.metadata, &right.metadata),
        vec![
            DiffSection::new("Controls", controls),
            DiffSection::new("Groups", groups),
            DiffSection::new("Parameters", parameters),
            back_matter_section(left.back_matter.as_ref(), right.back_matter.as_ref()),
        ],
    )
}

/// Diffs two profiles.
#[must_use]
pub fn diff_profile(left: &Profile, right: &Profile) -> DocumentDiffResult {
    let left_imports: Vec<_> = left.imports.iter().collect();
    let right_imports: Vec<_> = right.imports.iter().collect();
    let imports = diff_by_key(
        &left_imports,
        &right_imports,
        |import| import.href.clone(),
        |import| import.href.clone(),
        compare::imports,
    );

    let left_sets: Vec<_> =
        left.modify.iter().flat_map(|modify| modify.set_parameters.iter()).collect();
    let left_alters: Vec<_> = left.modify.iter().flat_map(|modify| modify.alters.iter()).collect();
    let right_sets: Vec<_> =
        right.modify.iter().flat_map(|modify| modify.set_parameters.iter()).collect();
    let right_alters: Vec<_> = right.modify.iter().flat_map(|modify| modify.alters.iter()).collect();

    let set_parameters = diff_by_key(
        &left_sets,
        &right_sets,
        |entry| entry.param_id.clone(),
        |entry| entry.param_id.clone(),
        compare::set_parameters,
    );
    let alters = diff_by_key(
        &left_alters,
        &right_alters,
        |alter| alter.control_id.clone(),
        |alter| alter.control_id.clone(),
        compare::alters,
    );

    DocumentDiffResult::new(
        DocumentType::Profile,
        diff_metadata(&left.metadata, &right.metadata),
        vec![
            DiffSection::new("Imports", imports),
            DiffSection::new("Set Parameters", set_parameters),
            DiffSection::new("Alters", alters),
            back_matter_section(left.back_matter.as_ref(), right.back_matter.as_ref()),
        ],
    )
}

// ============================================================================
// SECTION: Implementation Layer
// ============================================================================

/// Diffs two component definitions.
#[must_use]
pub fn diff_component_definition(
    left: &ComponentDefinition,
    right: &ComponentDefinition,
) -> DocumentDiffResult {
    let left_components: Vec<_> = left.components.iter().collect();
    let right_components: Vec<_> = right.components.iter().collect();
    let components = diff_by_key(
        &left_components,
        &right_components,
        |component| component.uuid.clone(),
        |component| component.title.clone(),
        compare::defined_components,
    );

    let requirements = diff_by_key(
        &definition_requirements(left),
        &definition_requirements(right),
        |requirement: &&ImplementedRequirement| requirement.uuid.clone(),
        |requirement: &&ImplementedRequirement| requirement.control_id.clone(),
        compare::implemented_requirements,
    );

    let left_capabilities: Vec<_> = left.capabilities.iter().collect();
    let right_capabilities: Vec<_> = right.capabilities.iter().collect();
    let capabilities = diff_by_key(
        &left_capabilities,
        &right_capabilities,
        |capability| capability.uuid.clone(),
        |capability| capability.name.clone(),
        compare::capabilities,
    );

    DocumentDiffResult::new(
        DocumentType::ComponentDefinition,
        diff_metadata(&left.metadata, &right.metadata),
        vec![
            DiffSection::new("Components", components),
            DiffSection::new("Implemented Requirements", requirements),
            DiffSection::new("Capabilities", capabilities),
            back_matter_section(left.back_matter.as_ref(), right.back_matter.as_ref()),
        ],
    )
}

/// Flattens implemented requirements across components and implementation sets.
fn definition_requirements(definition: &ComponentDefinition) -> Vec<&ImplementedRequirement> {
    definition
        .components
        .iter()
        .flat_map(|component| component.control_implementations.iter())
        .flat_map(|set| set.implemented_requirements.iter())
        .collect()
}

/// Diffs two system security plans.
#[must_use]
pub fn diff_ssp(left: &SystemSecurityPlan, right: &SystemSecurityPlan) -> DocumentDiffResult {
    let characteristics = diff_by_key(
        &[&left.system_characteristics],
        &[&right.system_characteristics],
        |_| "system-characteristics".to_string(),
        |characteristics| {
            characteristics
                .system_name
                .clone()
                .unwrap_or_else(|| "System Characteristics".to_string())
        },
        compare::system_characteristics,
    );

    let left_requirements: Vec<_> =
        left.control_implementation.implemented_requirements.iter().collect();
    let right_requirements: Vec<_> =
        right.control_implementation.implemented_requirements.iter().collect();
    let requirements = diff_by_key(
        &left_requirements,
        &right_requirements,
        |requirement| requirement.control_id.clone(),
        |requirement| requirement.control_id.clone(),
        compare::ssp_requirements,
    );

    let left_components: Vec<_> = left.system_implementation.components.iter().collect();
    let right_components: Vec<_> = right.system_implementation.components.iter().collect();
    let components = diff_by_key(
        &left_components,
        &right_components,
        |component| component.uuid.clone(),
        |component| component.title.clone(),
        compare::system_components,
    );

    let left_users: Vec<_> = left.system_implementation.users.iter().collect();
    let right_users: Vec<_> = right.system_implementation.users.iter().collect();
    let users = diff_by_key(
        &left_users,
        &right_users,
        |user| user.uuid.clone(),
        |user| user.title.clone().unwrap_or_else(|| user.uuid.clone()),
        compare::users,
    );

    let left_items: Vec<_> = left.system_implementation.inventory_items.iter().collect();
    let right_items: Vec<_> = right.system_implementation.inventory_items.iter().collect();
    let inventory = diff_by_key(
        &left_items,
        &right_items,
        |item| item.uuid.clone(),
        |item| item.description.clone().unwrap_or_else(|| item.uuid.clone()),
        compare::inventory_items,
    );

    DocumentDiffResult::new(
        DocumentType::SystemSecurityPlan,
        diff_metadata(&left.metadata, &right.metadata),
        vec![
            DiffSection::new("System Characteristics", characteristics),
            DiffSection::new("Implemented Requirements", requirements),
            DiffSection::new("Components", components),
            DiffSection::new("Users", users),
            DiffSection::new("Inventory Items", inventory),
            back_matter_section(left.back_matter.as_ref(), right.back_matter.as_ref()),
        ],
    )
}

// ============================================================================
// SECTION: Assessment Layer
// ============================================================================

/// Diffs two assessment-results documents.
#[must_use]
pub fn diff_assessment_results(
    left: &AssessmentResults,
    right: &AssessmentResults,
) -> DocumentDiffResult {
    let left_results: Vec<_> = left.results.iter().collect();
    let right_results: Vec<_> = right.results.iter().collect();
    let results = diff_by_key(
        &left_results,
        &right_results,
        |result| result.uuid.clone(),
        |result| result.title.clone(),
        compare::results,
    );

    let left_findings: Vec<_> = left.results.iter().flat_map(|result| &result.findings).collect();
    let right_findings: Vec<_> = right.results.iter().flat_map(|result| &result.findings).collect();
    let left_observations: Vec<_> =
        left.results.iter().flat_map(|result| &result.observations).collect();
    let right_observations: Vec<_> =
        right.results.iter().flat_map(|result| &result.observations).collect();
    let left_risks: Vec<_> = left.results.iter().flat_map(|result| &result.risks).collect();
    let right_risks: Vec<_> = right.results.iter().flat_map(|result| &result.risks).collect();

    let mut sections = vec![DiffSection::new("Results", results)];
    sections.extend(finding_sections(
        (&left_findings[..], &right_findings[..]),
        (&left_observations[..], &right_observations[..]),
        (&left_risks[..], &right_risks[..]),
    ));
    DocumentDiffResult::new(
        DocumentType::AssessmentResults,
        diff_metadata(&left.metadata, &right.metadata),
        sections,
    )
}

/// Diffs two POA&M documents.
#[must_use]
pub fn diff_poam(
    left: &PlanOfActionAndMilestones,
    right: &PlanOfActionAndMilestones,
) -> DocumentDiffResult {
    let left_items: Vec<_> = left.poam_items.iter().collect();
    let right_items: Vec<_> = right.poam_items.iter().collect();
    let items = diff_by_key(
        &left_items,
        &right_items,
        |item| item.uuid.clone().unwrap_or_else(|| item.title.clone()),
        |item| item.title.clone(),
        compare::poam_items,
    );

    let left_findings: Vec<_> = left.findings.iter().collect();
    let right_findings: Vec<_> = right.findings.iter().collect();
    let left_observations: Vec<_> = left.observations.iter().collect();
    let right_observations: Vec<_> = right.observations.iter().collect();
    let left_risks: Vec<_> = left.risks.iter().collect();
    let right_risks: Vec<_> = right.risks.iter().collect();

    let mut sections = vec![DiffSection::new("POA&M Items", items)];
    sections.extend(finding_sections(
        (&left_findings[..], &right_findings[..]),
        (&left_observations[..], &right_observations[..]),
        (&left_risks[..], &right_risks[..]),
    ));
    DocumentDiffResult::new(
        DocumentType::PlanOfActionAndMilestones,
        diff_metadata(&left.metadata, &right.metadata),
        sections,
    )
}

/// Pair of left and right element lists.
type Sides<'a, T> = (&'a [&'a T], &'a [&'a T]);

/// Builds the shared findings, observations, and risks sections.
fn finding_sections(
    findings: Sides<'_, Finding>,
    observations: Sides<'_, Observation>,
    risks: Sides<'_, Risk>,
) -> [DiffSection; 3] {
    [
        DiffSection::new(
            "Findings",
            diff_by_key(
                findings.0,
                findings.1,
                |finding| finding.uuid.clone(),
                |finding| finding.title.clone(),
                compare::findings,
            ),
        ),
        DiffSection::new(
            "Observations",
            diff_by_key(
                observations.0,
                observations.1,
                |observation| observation.uuid.clone(),
                |observation| observation.title.clone().unwrap_or_else(|| observation.uuid.clone()),
                compare::observations,
            ),
        ),
        DiffSection::new(
            "Risks",
            diff_by_key(
                risks.0,
                risks.1,
                |risk| risk.uuid.clone(),
                |risk| risk.title.clone(),
                compare::risks,
            ),
        ),
    ]
}

// ============================================================================
// SECTION: Back Matter
// ============================================================================

/// Diffs back-matter resources by uuid.
fn back_matter_section(left: Option<&BackMatter>, right: Option<&BackMatter>) -> DiffSection {
    let left: Vec<&Resource> = left.map(|matter| matter.resources.iter().collect()).unwrap_or_default();
    let right: Vec<&Resource> =
        right.map(|matter| matter.resources.iter().collect()).unwrap_or_default();
    DiffSection::new(
        "Back Matter",
        diff_by_key(
            &left,
            &right,
            |resource| resource.uuid.clone(),
            |resource| resource.title.clone().unwrap_or_else(|| resource.uuid.clone()),
            compare::resources,
        ),
    )
}
