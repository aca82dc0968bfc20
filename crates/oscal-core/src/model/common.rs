// crates/oscal-core/src/model/common.rs
// ============================================================================
// Module: OSCAL Shared Model Types
// Description: Metadata, back-matter, and content primitives shared by every document.
// Purpose: Provide the building blocks reused across the six document models.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Shared OSCAL assemblies: [`Metadata`], [`BackMatter`], [`Part`],
//! [`Property`], and [`Link`]. Field names follow OSCAL JSON (kebab-case).
//! Invariants:
//! - Optional collections default to empty and are omitted when serialized empty.
//! - Unknown fields are ignored; only the minimum structure is typed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Metadata
// ============================================================================

/// Document metadata block.
///
/// # Invariants
/// - `title` and `oscal_version` are non-empty once a document passed parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Metadata {
    /// Document title.
    pub title: String,
    /// Publication timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<String>,
    /// Last-modified timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    /// Document version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// OSCAL schema version the document targets.
    pub oscal_version: String,
    /// Properties attached to the metadata.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    /// Related links.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    /// Declared roles.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<Role>,
    /// Declared parties.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parties: Vec<Party>,
    /// Free-form remarks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

/// Role declared in metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Role {
    /// Role identifier.
    pub id: String,
    /// Role title.
    #[serde(default)]
    pub title: String,
    /// Role description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Person or organization declared in metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Party {
    /// Party UUID.
    pub uuid: String,
    /// Party kind (`person` or `organization`).
    #[serde(rename = "type", default)]
    pub party_type: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Contact email addresses.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub email_addresses: Vec<String>,
}

// ============================================================================
// SECTION: Content Primitives
// ============================================================================

/// Name/value property attached to most OSCAL assemblies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Property {
    /// Property name.
    pub name: String,
    /// Property value.
    #[serde(default)]
    pub value: String,
    /// Optional namespace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ns: Option<String>,
    /// Optional class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

/// Hyperlink to a related resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Link {
    /// Link target.
    pub href: String,
    /// Link relation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rel: Option<String>,
    /// Media type of the target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    /// Link text. XML-sourced links carry it under `_text`.
    #[serde(default, alias = "_text", skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Nested prose/content tree node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Part {
    /// Optional part identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Part name (for example `statement` or `guidance`).
    #[serde(default)]
    pub name: String,
    /// Optional namespace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ns: Option<String>,
    /// Optional class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// Optional title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Properties.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    /// Prose content, possibly containing parameter insertion placeholders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prose: Option<String>,
    /// Nested parts.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parts: Vec<Part>,
    /// Links.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

// ============================================================================
// SECTION: Back Matter
// ============================================================================

/// Back-matter section holding uuid-addressed resources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BackMatter {
    /// Resources available for fragment lookups.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<Resource>,
}

impl BackMatter {
    /// Looks up a resource by UUID.
    #[must_use]
    pub fn resource(&self, uuid: &str) -> Option<&Resource> {
        self.resources.iter().find(|resource| resource.uuid == uuid)
    }
}

/// Back-matter resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Resource {
    /// Resource UUID referenced by `#<uuid>` fragments.
    pub uuid: String,
    /// Resource title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Resource description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Properties.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    /// Alternate-format links to the resource content.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rlinks: Vec<Rlink>,
}

impl Resource {
    /// Picks the rlink used for resolution: the first JSON-typed rlink, else the first rlink.
    #[must_use]
    pub fn preferred_rlink(&self) -> Option<&Rlink> {
        self.rlinks
            .iter()
            .find(|rlink| rlink.media_type.as_deref().is_some_and(|media| media.contains("json")))
            .or_else(|| self.rlinks.first())
    }
}

/// Resource link carrying an href and media type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Rlink {
    /// Link target.
    pub href: String,
    /// Media type of the target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
}
