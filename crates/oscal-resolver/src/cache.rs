// crates/oscal-resolver/src/cache.rs
// ============================================================================
// Module: OSCAL Document Cache
// Description: Session cache of parsed documents keyed by normalized URL.
// Purpose: Avoid refetching documents shared by several imports.
// Dependencies: oscal-core
// ============================================================================

//! ## Overview
//! [`DocumentCache`] stores parsed documents under
//! [`normalize_url`]`(url)`, which drops any `#fragment` and lowercases the
//! rest. It has no eviction; one cache lives for one resolution session.
//! Invariants:
//! - Normalization is idempotent.
//! - Concurrent writers to one key are safe; the last writer wins.
//! - A poisoned lock is recovered rather than propagated.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::PoisonError;
use std::sync::RwLock;

use oscal_core::ParsedDocument;

// ============================================================================
// SECTION: Normalization
// ============================================================================

/// Normalizes a URL into its cache key.
#[must_use]
pub fn normalize_url(url: &str) -> String {
    let without_fragment = url.split_once('#').map_or(url, |(head, _)| head);
    without_fragment.to_lowercase()
}

// ============================================================================
// SECTION: Cache
// ============================================================================

/// Thread-safe document cache shared across concurrent import tasks.
#[derive(Debug, Default)]
pub struct DocumentCache {
    /// Parsed documents keyed by normalized URL.
    entries: RwLock<HashMap<String, Arc<ParsedDocument>>>,
}

impl DocumentCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached document for a URL.
    #[must_use]
    pub fn get(&self, url: &str) -> Option<Arc<ParsedDocument>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(&normalize_url(url)).cloned()
    }

    /// Stores a document under a URL, replacing any previous entry.
    pub fn set(&self, url: &str, document: Arc<ParsedDocument>) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(normalize_url(url), document);
    }

    /// Returns true when a document is cached for a URL.
    #[must_use]
    pub fn has(&self, url: &str) -> bool {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.contains_key(&normalize_url(url))
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.entries.write().unwrap_or_else(PoisonError::into_inner).clear();
    }

    /// Returns the number of cached documents.
    #[must_use]
    pub fn size(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}
