// crates/oscal-resolver/src/source/mod.rs
// ============================================================================
// Module: OSCAL Document Sources
// Description: Async fetch boundary for referenced OSCAL documents.
// Purpose: Turn resolved URLs into document bytes.
// Dependencies: async-trait, thiserror, url
// ============================================================================

//! ## Overview
//! A [`DocumentSource`] is the resolver's only I/O boundary. Implementations
//! fetch the bytes behind a URL; parsing happens in the resolution engine.
//! Invariants:
//! - Connection-level failures are [`SourceError::Network`]; non-2xx responses
//!   are [`SourceError::Http`]. Callers rely on the distinction.
//! - Payloads are capped at a configured byte limit.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Source Payload
// ============================================================================

/// Document bytes fetched from a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePayload {
    /// Raw document bytes.
    pub bytes: Vec<u8>,
    /// Optional content type hint.
    pub content_type: Option<String>,
}

/// Default maximum document size accepted by sources (16 MiB).
pub const DEFAULT_MAX_DOCUMENT_BYTES: usize = 16 * 1024 * 1024;

// ============================================================================
// SECTION: Source Errors
// ============================================================================

/// Errors emitted by document sources.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// Connection-level failure (connect, timeout, TLS, request build).
    #[error("network failure: {0}")]
    Network(String),
    /// Server answered with a non-success status.
    #[error("HTTP {status}: {reason}")]
    Http {
        /// Numeric status code.
        status: u16,
        /// Canonical reason phrase.
        reason: String,
    },
    /// No source handles the URL scheme.
    #[error("unsupported uri scheme: {0}")]
    UnsupportedScheme(String),
    /// URL could not be mapped to a fetchable location.
    #[error("invalid uri: {0}")]
    InvalidUri(String),
    /// Payload exceeded the configured byte limit.
    #[error("document exceeds size limit: {actual_bytes} bytes (max {max_bytes})")]
    TooLarge {
        /// Maximum allowed bytes.
        max_bytes: usize,
        /// Observed size in bytes.
        actual_bytes: usize,
    },
    /// Local I/O failure.
    #[error("io failure: {0}")]
    Io(String),
}

/// Returns an error when a payload exceeds the size cap.
pub(crate) const fn enforce_max_bytes(actual_bytes: usize, max_bytes: usize) -> Result<(), SourceError> {
    if actual_bytes > max_bytes {
        return Err(SourceError::TooLarge {
            max_bytes,
            actual_bytes,
        });
    }
    Ok(())
}

// ============================================================================
// SECTION: Source Trait
// ============================================================================

/// Fetches the bytes behind a resolved document URL.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetches the document at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the document cannot be fetched.
    async fn fetch(&self, url: &Url) -> Result<SourcePayload, SourceError>;
}

// ============================================================================
// SECTION: Implementations
// ============================================================================

pub mod file;
pub mod http;
pub mod router;

pub use file::FileSource;
pub use http::HttpSource;
pub use router::SourceRouter;
pub use router::SourceRouterBuilder;
