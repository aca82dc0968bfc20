// crates/oscal-core/src/model/implementation.rs
// ============================================================================
// Module: OSCAL Implementation Models
// Description: Component-definition and system-security-plan documents.
// Purpose: Type the implementation-layer documents consumed by resolution and diffing.
// Dependencies: serde, crate::model::common
// ============================================================================

//! ## Overview
//! [`ComponentDefinition`] documents describe reusable components and the
//! controls they implement; [`SystemSecurityPlan`] documents describe one
//! system and point at the profile that baselines it.
//! Invariants:
//! - An SSP always carries `import-profile`, `system-characteristics`,
//!   `system-implementation`, and `control-implementation` after parsing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::model::common::BackMatter;
use crate::model::common::Link;
use crate::model::common::Metadata;
use crate::model::common::Property;

// ============================================================================
// SECTION: Component Definition
// ============================================================================

/// OSCAL component-definition document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ComponentDefinition {
    /// Document UUID.
    pub uuid: String,
    /// Document metadata.
    pub metadata: Metadata,
    /// Defined components.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<DefinedComponent>,
    /// Capabilities grouping components.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub capabilities: Vec<Capability>,
    /// Back matter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back_matter: Option<BackMatter>,
}

/// Component described by a component definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DefinedComponent {
    /// Component UUID.
    pub uuid: String,
    /// Component kind (`software`, `service`, ...).
    #[serde(rename = "type", default)]
    pub component_type: String,
    /// Component title.
    #[serde(default)]
    pub title: String,
    /// Component description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Properties.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    /// Links.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    /// Control implementation sets, each tied to a `source` catalog or profile.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub control_implementations: Vec<ControlImplementationSet>,
}

/// Set of implemented requirements against one source document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ControlImplementationSet {
    /// Set UUID.
    pub uuid: String,
    /// Reference to the catalog or profile the requirements come from.
    #[serde(default)]
    pub source: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Implemented requirements.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub implemented_requirements: Vec<ImplementedRequirement>,
}

/// Requirement implemented by a component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ImplementedRequirement {
    /// Requirement UUID.
    pub uuid: String,
    /// Implemented control identifier.
    #[serde(default)]
    pub control_id: String,
    /// Implementation description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Properties.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
}

/// Capability provided by a set of components.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Capability {
    /// Capability UUID.
    pub uuid: String,
    /// Capability name.
    #[serde(default)]
    pub name: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// ============================================================================
// SECTION: System Security Plan
// ============================================================================

/// OSCAL system-security-plan document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SystemSecurityPlan {
    /// Document UUID.
    pub uuid: String,
    /// Document metadata.
    pub metadata: Metadata,
    /// Baseline profile reference.
    pub import_profile: ImportProfile,
    /// System characteristics.
    pub system_characteristics: SystemCharacteristics,
    /// System implementation inventory.
    pub system_implementation: SystemImplementation,
    /// Control implementation statements.
    pub control_implementation: SspControlImplementation,
    /// Back matter used for `#uuid` profile lookups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back_matter: Option<BackMatter>,
}

/// Reference to the profile an SSP implements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ImportProfile {
    /// Profile reference.
    #[serde(default)]
    pub href: String,
}

/// Descriptive system characteristics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SystemCharacteristics {
    /// System name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_name: Option<String>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Overall sensitivity level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_sensitivity_level: Option<String>,
    /// Operational status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

/// Lifecycle state marker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Status {
    /// State label.
    #[serde(default)]
    pub state: String,
}

/// System implementation inventory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SystemImplementation {
    /// System users.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<SystemUser>,
    /// System components.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<SystemComponent>,
    /// Inventory items.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inventory_items: Vec<InventoryItem>,
}

/// System user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SystemUser {
    /// User UUID.
    pub uuid: String,
    /// User title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Assigned role identifiers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub role_ids: Vec<String>,
}

/// System component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SystemComponent {
    /// Component UUID.
    pub uuid: String,
    /// Component kind.
    #[serde(rename = "type", default)]
    pub component_type: String,
    /// Component title.
    #[serde(default)]
    pub title: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Operational status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

/// Inventory item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct InventoryItem {
    /// Item UUID.
    pub uuid: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Properties.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
}

/// SSP control implementation block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SspControlImplementation {
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Implemented requirements.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub implemented_requirements: Vec<SspImplementedRequirement>,
}

/// Requirement implemented by the system.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SspImplementedRequirement {
    /// Requirement UUID.
    pub uuid: String,
    /// Implemented control identifier.
    #[serde(default)]
    pub control_id: String,
    /// Properties.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    /// Per-statement implementations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub statements: Vec<Statement>,
    /// Per-component implementations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub by_components: Vec<ByComponent>,
}

/// Statement-level implementation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Statement {
    /// Statement identifier.
    #[serde(default)]
    pub statement_id: String,
    /// Statement UUID.
    #[serde(default)]
    pub uuid: String,
    /// Per-component implementations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub by_components: Vec<ByComponent>,
}

/// Component contribution to a requirement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ByComponent {
    /// Referenced component UUID.
    #[serde(default)]
    pub component_uuid: String,
    /// Contribution UUID.
    #[serde(default)]
    pub uuid: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
