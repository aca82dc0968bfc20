// crates/oscal-resolver/src/types.rs
// ============================================================================
// Module: Resolution Types
// Description: Result records and errors produced by the resolution engine.
// Purpose: Carry per-import provenance and merged controls to callers.
// Dependencies: oscal-core, serde, thiserror
// ============================================================================

//! ## Overview
//! [`ResolvedProfile`] and [`ResolvedSsp`] carry the merged control list plus
//! one [`ImportSource`] per import. Failures inside one import are recorded
//! on its `ImportSource`; [`ResolveError`] classifies them.
//! Invariants:
//! - `imports` has exactly one entry per profile import, in import order.
//! - `errors` holds only failures that escaped a per-import handler (and, for
//!   SSPs, the failure to load the profile itself).

// ============================================================================
// SECTION: Imports
// ============================================================================

use oscal_core::DocumentType;
use oscal_core::ParseError;
use oscal_core::model::catalog::Control;
use oscal_core::model::profile::Merge;
use oscal_core::model::profile::Modify;
use serde::Serialize;
use thiserror::Error;

use crate::source::SourceError;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Remediation hint attached to network-level fetch failures.
pub const CORS_HINT: &str = "the server may not allow cross-origin requests; try downloading the \
                             document and loading it locally";

/// Resolution failures for a single reference.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The href cannot be turned into a fetchable URL.
    #[error("{0}")]
    UnresolvableReference(String),
    /// Network-level failure (connectivity, CORS, timeout).
    #[error("failed to fetch {url}: {message}; {hint}", hint = CORS_HINT)]
    FetchFailure {
        /// Resolved URL.
        url: String,
        /// Transport diagnostic.
        message: String,
    },
    /// Server answered with a non-2xx status.
    #[error("failed to fetch {url}: HTTP {status}: {reason}")]
    HttpError {
        /// Resolved URL.
        url: String,
        /// Numeric status code.
        status: u16,
        /// Reason phrase.
        reason: String,
    },
    /// The fetched document is not the type its role requires.
    #[error("Expected {expected}, got {actual}")]
    UnexpectedDocumentType {
        /// Required type.
        expected: DocumentType,
        /// Fetched type.
        actual: DocumentType,
    },
    /// The fetched bytes did not parse as an OSCAL document.
    #[error("failed to parse {url}: {source}")]
    Parse {
        /// Resolved URL.
        url: String,
        /// Parser failure.
        source: ParseError,
    },
    /// Any other source failure (scheme, size, local I/O).
    #[error("failed to fetch {url}: {source}")]
    Source {
        /// Resolved URL.
        url: String,
        /// Source failure.
        source: SourceError,
    },
}

impl ResolveError {
    /// Classifies a source failure for a URL.
    #[must_use]
    pub fn from_source(url: &str, err: SourceError) -> Self {
        match err {
            SourceError::Network(message) => Self::FetchFailure {
                url: url.to_string(),
                message,
            },
            SourceError::Http {
                status,
                reason,
            } => Self::HttpError {
                url: url.to_string(),
                status,
                reason,
            },
            other => Self::Source {
                url: url.to_string(),
                source: other,
            },
        }
    }
}

// ============================================================================
// SECTION: Provenance
// ============================================================================

/// Terminal state of one import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImportStatus {
    /// Fetched and parsed during this call.
    Loaded,
    /// Served from the session cache.
    Cached,
    /// Failed; see the record's `error`.
    Error,
}

/// Provenance record for one import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ImportSource {
    /// Href as written in the document.
    pub href: String,
    /// Resolved URL, when resolution got that far.
    pub resolved_url: Option<String>,
    /// Terminal state.
    pub status: ImportStatus,
    /// Controls this import contributed.
    pub control_count: usize,
    /// Failure description when `status` is `error`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ImportSource {
    /// Builds a failed record.
    #[must_use]
    pub fn failed(href: &str, resolved_url: Option<String>, error: impl Into<String>) -> Self {
        Self {
            href: href.to_string(),
            resolved_url,
            status: ImportStatus::Error,
            control_count: 0,
            error: Some(error.into()),
        }
    }
}

// ============================================================================
// SECTION: Results
// ============================================================================

/// Outcome of profile resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResolvedProfile {
    /// Merged, modified controls in import order.
    pub controls: Vec<Control>,
    /// One record per import, in import order.
    pub imports: Vec<ImportSource>,
    /// Failures that escaped per-import handling.
    pub errors: Vec<String>,
}

/// Identifying fields of the profile behind an SSP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProfileSummary {
    /// Profile UUID.
    pub uuid: String,
    /// Profile title.
    pub title: String,
    /// Profile version.
    pub version: Option<String>,
    /// Number of imports the profile declares.
    pub import_count: usize,
}

/// Outcome of SSP resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResolvedSsp {
    /// Profile summary; absent when the profile could not be loaded.
    pub profile: Option<ProfileSummary>,
    /// Provenance of the SSP's `import-profile` reference.
    pub profile_source: ImportSource,
    /// Provenance of the profile's own imports.
    pub catalog_sources: Vec<ImportSource>,
    /// Merged, modified controls.
    pub controls: Vec<Control>,
    /// Profile merge block, passed through.
    pub merge: Option<Merge>,
    /// Profile modify block, passed through (already applied to `controls`).
    pub modify: Option<Modify>,
    /// Failures from both levels.
    pub errors: Vec<String>,
}

/// Identifying fields of a single referenced document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SourceSummary {
    /// Href as given.
    pub href: String,
    /// Resolved URL.
    pub resolved_url: String,
    /// `loaded` or `cached`.
    pub status: ImportStatus,
    /// Document type.
    pub document_type: DocumentType,
    /// Document title.
    pub title: String,
    /// Document version.
    pub version: Option<String>,
    /// OSCAL schema version.
    pub oscal_version: String,
}
