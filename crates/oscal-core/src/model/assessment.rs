// crates/oscal-core/src/model/assessment.rs
// ============================================================================
// Module: OSCAL Assessment Models
// Description: Assessment-results and plan-of-action-and-milestones documents.
// Purpose: Type the assessment-layer documents consumed by the differ.
// Dependencies: serde, crate::model::common
// ============================================================================

//! ## Overview
//! [`AssessmentResults`] record findings, observations, and risks per
//! assessment [`AssessmentResult`]; a [`PlanOfActionAndMilestones`] tracks
//! remediation through [`PoamItem`]s.
//! Invariants:
//! - `results` and `poam-items` are non-empty after parsing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::model::common::BackMatter;
use crate::model::common::Metadata;
use crate::model::common::Property;

// ============================================================================
// SECTION: Assessment Results
// ============================================================================

/// OSCAL assessment-results document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AssessmentResults {
    /// Document UUID.
    pub uuid: String,
    /// Document metadata.
    pub metadata: Metadata,
    /// Assessment plan reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import_ap: Option<DocumentReference>,
    /// Assessment results.
    pub results: Vec<AssessmentResult>,
    /// Back matter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back_matter: Option<BackMatter>,
}

/// Reference to another document by href.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DocumentReference {
    /// Reference target.
    #[serde(default)]
    pub href: String,
}

/// A single assessment run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AssessmentResult {
    /// Result UUID.
    pub uuid: String,
    /// Result title.
    #[serde(default)]
    pub title: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Start timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    /// End timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    /// Observations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub observations: Vec<Observation>,
    /// Risks.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub risks: Vec<Risk>,
    /// Findings.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub findings: Vec<Finding>,
}

/// Assessment finding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Finding {
    /// Finding UUID.
    pub uuid: String,
    /// Finding title.
    #[serde(default)]
    pub title: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Assessed target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<FindingTarget>,
}

/// Target of a finding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FindingTarget {
    /// Target kind (`objective-id`, `statement-id`).
    #[serde(rename = "type", default)]
    pub target_type: String,
    /// Target identifier.
    #[serde(default)]
    pub target_id: String,
    /// Target status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TargetStatus>,
}

/// Satisfaction status of a finding target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TargetStatus {
    /// `satisfied` or `not-satisfied`.
    #[serde(default)]
    pub state: String,
}

/// Assessment observation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Observation {
    /// Observation UUID.
    pub uuid: String,
    /// Title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Observation methods.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<String>,
    /// Collection timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collected: Option<String>,
}

/// Identified risk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Risk {
    /// Risk UUID.
    pub uuid: String,
    /// Title.
    #[serde(default)]
    pub title: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Risk status (`open`, `closed`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

// ============================================================================
// SECTION: Plan of Action and Milestones
// ============================================================================

/// OSCAL plan-of-action-and-milestones document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PlanOfActionAndMilestones {
    /// Document UUID.
    pub uuid: String,
    /// Document metadata.
    pub metadata: Metadata,
    /// SSP reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import_ssp: Option<DocumentReference>,
    /// Observations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub observations: Vec<Observation>,
    /// Risks.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub risks: Vec<Risk>,
    /// Findings.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub findings: Vec<Finding>,
    /// Remediation items.
    pub poam_items: Vec<PoamItem>,
    /// Back matter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back_matter: Option<BackMatter>,
}

/// Remediation item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PoamItem {
    /// Item UUID (optional in OSCAL 1.0 documents).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    /// Title.
    #[serde(default)]
    pub title: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Properties.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
}
