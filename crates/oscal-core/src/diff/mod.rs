// crates/oscal-core/src/diff/mod.rs
// ============================================================================
// Module: OSCAL Document Differ
// Description: Identifier-keyed structural comparison of two documents.
// Purpose: Classify every keyed element as added, removed, modified, or unchanged.
// Dependencies: serde, serde_json, crate::model
// ============================================================================

//! ## Overview
//! [`diff_by_key`] is the core primitive: both sides are indexed by a stable
//! domain key (control id, parameter id, uuid, ...) and compared key by key.
//! The per-type functions in [`documents`] decompose each document type into
//! keyed collections and assemble a [`DocumentDiffResult`].
//! Invariants:
//! - Keys never depend on array position.
//! - Entry order is added, removed, modified, unchanged; within a status
//!   group, left-side order, with right-side order for added keys.
//! - Diffing is total; there is no error channel.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod compare;
pub mod documents;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::model::DocumentType;

pub use self::documents::diff_assessment_results;
pub use self::documents::diff_catalog;
pub use self::documents::diff_component_definition;
pub use self::documents::diff_documents;
pub use self::documents::diff_metadata;
pub use self::documents::diff_poam;
pub use self::documents::diff_profile;
pub use self::documents::diff_ssp;

// ============================================================================
// SECTION: Diff Types
// ============================================================================

/// Classification of one keyed element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiffStatus {
    /// Present only on the right.
    Added,
    /// Present only on the left.
    Removed,
    /// Present on both sides with differences.
    Modified,
    /// Present on both sides without differences.
    Unchanged,
}

/// Comparison outcome for one key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct DiffEntry<T> {
    /// Classification.
    pub status: DiffStatus,
    /// Stable key the sides were matched on.
    pub key: String,
    /// Human-readable label.
    pub label: String,
    /// Left-side value.
    pub left: Option<T>,
    /// Right-side value.
    pub right: Option<T>,
    /// Field-level change descriptions (non-empty only for `modified`).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub changes: Vec<String>,
}

/// Per-status counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    /// Added entries.
    pub added: usize,
    /// Removed entries.
    pub removed: usize,
    /// Modified entries.
    pub modified: usize,
    /// Unchanged entries.
    pub unchanged: usize,
    /// All entries.
    pub total: usize,
}

impl DiffSummary {
    /// Counts the statuses of a set of entries.
    #[must_use]
    pub fn from_entries<T>(entries: &[DiffEntry<T>]) -> Self {
        let mut summary = Self::default();
        for entry in entries {
            summary.record(entry.status);
        }
        summary
    }

    /// Adds one status to the counts.
    pub const fn record(&mut self, status: DiffStatus) {
        match status {
            DiffStatus::Added => self.added += 1,
            DiffStatus::Removed => self.removed += 1,
            DiffStatus::Modified => self.modified += 1,
            DiffStatus::Unchanged => self.unchanged += 1,
        }
        self.total += 1;
    }

    /// Adds another summary's counts.
    pub const fn absorb(&mut self, other: &Self) {
        self.added += other.added;
        self.removed += other.removed;
        self.modified += other.modified;
        self.unchanged += other.unchanged;
        self.total += other.total;
    }

    /// Returns true when anything was added, removed, or modified.
    #[must_use]
    pub const fn has_changes(&self) -> bool {
        self.added + self.removed + self.modified > 0
    }
}

/// Entries and summary for one keyed collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyedDiff<T> {
    /// Ordered entries.
    pub entries: Vec<DiffEntry<T>>,
    /// Status counts.
    pub summary: DiffSummary,
}

/// Named section of a document diff.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiffSection {
    /// Section name (for example `Controls`).
    pub name: String,
    /// Entries with sides rendered as JSON values.
    pub entries: Vec<DiffEntry<Value>>,
    /// Section counts.
    pub summary: DiffSummary,
}

impl DiffSection {
    /// Builds a section from a typed keyed diff.
    #[must_use]
    pub fn new<T: Serialize>(name: impl Into<String>, diff: KeyedDiff<T>) -> Self {
        let entries = diff
            .entries
            .into_iter()
            .map(|entry| DiffEntry {
                status: entry.status,
                key: entry.key,
                label: entry.label,
                left: entry.left.and_then(|value| serde_json::to_value(value).ok()),
                right: entry.right.and_then(|value| serde_json::to_value(value).ok()),
                changes: entry.changes,
            })
            .collect();
        Self {
            name: name.into(),
            entries,
            summary: diff.summary,
        }
    }
}

/// One metadata field on both sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDiff {
    /// Left value.
    pub left: Option<String>,
    /// Right value.
    pub right: Option<String>,
    /// Whether the values differ.
    pub changed: bool,
}

impl FieldDiff {
    /// Compares two optional values.
    #[must_use]
    pub fn new(left: Option<&str>, right: Option<&str>) -> Self {
        Self {
            left: left.map(str::to_string),
            right: right.map(str::to_string),
            changed: left != right,
        }
    }
}

/// Metadata comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct MetadataDiff {
    /// Title.
    pub title: FieldDiff,
    /// Document version.
    pub version: FieldDiff,
    /// OSCAL version.
    pub oscal_version: FieldDiff,
    /// Last-modified timestamp.
    pub last_modified: FieldDiff,
}

impl MetadataDiff {
    /// Returns true when any compared field differs.
    #[must_use]
    pub const fn changed(&self) -> bool {
        self.title.changed
            || self.version.changed
            || self.oscal_version.changed
            || self.last_modified.changed
    }
}

/// Full comparison of two same-typed documents.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct DocumentDiffResult {
    /// Shared document type.
    pub document_type: DocumentType,
    /// Metadata comparison.
    pub metadata: MetadataDiff,
    /// Counts across every section.
    pub summary: DiffSummary,
    /// Ordered sections.
    pub sections: Vec<DiffSection>,
}

impl DocumentDiffResult {
    /// Assembles a result, deriving the overall summary from the sections.
    #[must_use]
    pub fn new(document_type: DocumentType, metadata: MetadataDiff, sections: Vec<DiffSection>) -> Self {
        let mut summary = DiffSummary::default();
        for section in &sections {
            summary.absorb(&section.summary);
        }
        Self {
            document_type,
            metadata,
            summary,
            sections,
        }
    }

    /// Looks up a section by name.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&DiffSection> {
        self.sections.iter().find(|section| section.name == name)
    }
}

// ============================================================================
// SECTION: Keyed Diff
// ============================================================================

/// Compares two collections by a stable key.
///
/// `compare_fn` returns field-level change descriptions; an empty list means
/// unchanged. Duplicate keys keep their first position and last value.
pub fn diff_by_key<T, K, L, C>(
    left: &[T],
    right: &[T],
    key_fn: K,
    label_fn: L,
    compare_fn: C,
) -> KeyedDiff<T>
where
    T: Clone,
    K: Fn(&T) -> String,
    L: Fn(&T) -> String,
    C: Fn(&T, &T) -> Vec<String>,
{
    let (left_order, left_map) = index_by_key(left, &key_fn);
    let (right_order, right_map) = index_by_key(right, &key_fn);

    let mut added = Vec::new();
    let mut removed = Vec::new();
    let mut modified = Vec::new();
    let mut unchanged = Vec::new();

    for key in left_order {
        let Some(left_item) = left_map.get(&key) else {
            continue;
        };
        let label = label_fn(left_item);
        match right_map.get(&key) {
            None => removed.push(DiffEntry {
                status: DiffStatus::Removed,
                key,
                label,
                left: Some((*left_item).clone()),
                right: None,
                changes: Vec::new(),
            }),
            Some(right_item) => {
                let changes = compare_fn(left_item, right_item);
                let status =
                    if changes.is_empty() { DiffStatus::Unchanged } else { DiffStatus::Modified };
                let entry = DiffEntry {
                    status,
                    key,
                    label,
                    left: Some((*left_item).clone()),
                    right: Some((*right_item).clone()),
                    changes,
                };
                if status == DiffStatus::Modified {
                    modified.push(entry);
                } else {
                    unchanged.push(entry);
                }
            }
        }
    }
    for key in right_order {
        if left_map.contains_key(&key) {
            continue;
        }
        let Some(right_item) = right_map.get(&key) else {
            continue;
        };
        added.push(DiffEntry {
            status: DiffStatus::Added,
            label: label_fn(right_item),
            key,
            left: None,
            right: Some((*right_item).clone()),
            changes: Vec::new(),
        });
    }

    let mut entries = added;
    entries.append(&mut removed);
    entries.append(&mut modified);
    entries.append(&mut unchanged);
    let summary = DiffSummary::from_entries(&entries);
    KeyedDiff {
        entries,
        summary,
    }
}

/// Indexes items by key, returning first-occurrence order and the lookup map.
fn index_by_key<'a, T, K>(items: &'a [T], key_fn: &K) -> (Vec<String>, BTreeMap<String, &'a T>)
where
    K: Fn(&T) -> String,
{
    let mut order = Vec::with_capacity(items.len());
    let mut map = BTreeMap::new();
    for item in items {
        let key = key_fn(item);
        if map.insert(key.clone(), item).is_none() {
            order.push(key);
        }
    }
    (order, map)
}
