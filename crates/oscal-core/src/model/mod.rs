// crates/oscal-core/src/model/mod.rs
// ============================================================================
// Module: OSCAL Document Model
// Description: Tagged document union and the per-type document models.
// Purpose: Provide the typed in-memory representation produced by parsing.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! [`Document`] is a sum type over the six OSCAL document models. The
//! [`DocumentType`] tag is assigned once at parse time and consumers dispatch
//! on it rather than inspecting untyped JSON.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod assessment;
pub mod catalog;
pub mod common;
pub mod implementation;
pub mod profile;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::model::assessment::AssessmentResults;
use crate::model::assessment::PlanOfActionAndMilestones;
use crate::model::catalog::Catalog;
use crate::model::common::BackMatter;
use crate::model::common::Metadata;
use crate::model::implementation::ComponentDefinition;
use crate::model::implementation::SystemSecurityPlan;
use crate::model::profile::Profile;

// ============================================================================
// SECTION: Document Type
// ============================================================================

/// OSCAL document type tag.
///
/// # Invariants
/// - [`DocumentType::ALL`] is the type-detection priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentType {
    /// Control catalog.
    Catalog,
    /// Control baseline profile.
    Profile,
    /// Component definition.
    ComponentDefinition,
    /// System security plan.
    SystemSecurityPlan,
    /// Assessment results.
    AssessmentResults,
    /// Plan of action and milestones.
    PlanOfActionAndMilestones,
}

impl DocumentType {
    /// Every document type in detection priority order.
    pub const ALL: [Self; 6] = [
        Self::Catalog,
        Self::Profile,
        Self::ComponentDefinition,
        Self::SystemSecurityPlan,
        Self::AssessmentResults,
        Self::PlanOfActionAndMilestones,
    ];

    /// Returns the top-level JSON envelope key (also the XML root element name).
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Catalog => "catalog",
            Self::Profile => "profile",
            Self::ComponentDefinition => "component-definition",
            Self::SystemSecurityPlan => "system-security-plan",
            Self::AssessmentResults => "assessment-results",
            Self::PlanOfActionAndMilestones => "plan-of-action-and-milestones",
        }
    }

    /// Returns a human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Catalog => "Catalog",
            Self::Profile => "Profile",
            Self::ComponentDefinition => "Component Definition",
            Self::SystemSecurityPlan => "System Security Plan",
            Self::AssessmentResults => "Assessment Results",
            Self::PlanOfActionAndMilestones => "Plan of Action and Milestones",
        }
    }

    /// Maps an envelope key back to its type.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ============================================================================
// SECTION: Document
// ============================================================================

/// Typed OSCAL document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Document {
    /// Catalog document.
    Catalog(Catalog),
    /// Profile document.
    Profile(Profile),
    /// Component-definition document.
    ComponentDefinition(ComponentDefinition),
    /// System-security-plan document.
    SystemSecurityPlan(SystemSecurityPlan),
    /// Assessment-results document.
    AssessmentResults(AssessmentResults),
    /// Plan-of-action-and-milestones document.
    PlanOfActionAndMilestones(PlanOfActionAndMilestones),
}

impl Document {
    /// Returns the document's type tag.
    #[must_use]
    pub const fn document_type(&self) -> DocumentType {
        match self {
            Self::Catalog(_) => DocumentType::Catalog,
            Self::Profile(_) => DocumentType::Profile,
            Self::ComponentDefinition(_) => DocumentType::ComponentDefinition,
            Self::SystemSecurityPlan(_) => DocumentType::SystemSecurityPlan,
            Self::AssessmentResults(_) => DocumentType::AssessmentResults,
            Self::PlanOfActionAndMilestones(_) => DocumentType::PlanOfActionAndMilestones,
        }
    }

    /// Returns the document UUID.
    #[must_use]
    pub fn uuid(&self) -> &str {
        match self {
            Self::Catalog(doc) => &doc.uuid,
            Self::Profile(doc) => &doc.uuid,
            Self::ComponentDefinition(doc) => &doc.uuid,
            Self::SystemSecurityPlan(doc) => &doc.uuid,
            Self::AssessmentResults(doc) => &doc.uuid,
            Self::PlanOfActionAndMilestones(doc) => &doc.uuid,
        }
    }

    /// Returns the document metadata.
    #[must_use]
    pub const fn metadata(&self) -> &Metadata {
        match self {
            Self::Catalog(doc) => &doc.metadata,
            Self::Profile(doc) => &doc.metadata,
            Self::ComponentDefinition(doc) => &doc.metadata,
            Self::SystemSecurityPlan(doc) => &doc.metadata,
            Self::AssessmentResults(doc) => &doc.metadata,
            Self::PlanOfActionAndMilestones(doc) => &doc.metadata,
        }
    }

    /// Returns the back matter, when present.
    #[must_use]
    pub const fn back_matter(&self) -> Option<&BackMatter> {
        match self {
            Self::Catalog(doc) => doc.back_matter.as_ref(),
            Self::Profile(doc) => doc.back_matter.as_ref(),
            Self::ComponentDefinition(doc) => doc.back_matter.as_ref(),
            Self::SystemSecurityPlan(doc) => doc.back_matter.as_ref(),
            Self::AssessmentResults(doc) => doc.back_matter.as_ref(),
            Self::PlanOfActionAndMilestones(doc) => doc.back_matter.as_ref(),
        }
    }
}

/// Document produced by the parser, tagged with type and detected version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ParsedDocument {
    /// Document type tag.
    pub document_type: DocumentType,
    /// Detected OSCAL version, or `"unknown"`.
    pub oscal_version: String,
    /// Typed document.
    pub document: Document,
}
