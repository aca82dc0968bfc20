// crates/oscal-resolver/src/source/router.rs
// ============================================================================
// Module: OSCAL Source Router
// Description: Scheme-based dispatch across registered document sources.
// Purpose: Present several sources as one `DocumentSource`.
// Dependencies: async-trait, url
// ============================================================================

//! ## Overview
//! [`SourceRouter`] selects a registered source by URL scheme. A compound
//! scheme such as `git+https` falls back to its base scheme's source.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use crate::source::DocumentSource;
use crate::source::SourceError;
use crate::source::SourcePayload;

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Builder for a [`SourceRouter`].
#[derive(Default)]
pub struct SourceRouterBuilder {
    /// Sources keyed by scheme.
    sources: BTreeMap<String, Arc<dyn DocumentSource>>,
}

impl SourceRouterBuilder {
    /// Registers a source for a URL scheme.
    #[must_use]
    pub fn source(mut self, scheme: impl Into<String>, source: impl DocumentSource + 'static) -> Self {
        self.sources.insert(scheme.into(), Arc::new(source));
        self
    }

    /// Registers an already shared source for a URL scheme.
    #[must_use]
    pub fn shared_source(
        mut self,
        scheme: impl Into<String>,
        source: Arc<dyn DocumentSource>,
    ) -> Self {
        self.sources.insert(scheme.into(), source);
        self
    }

    /// Builds the router.
    #[must_use]
    pub fn build(self) -> SourceRouter {
        SourceRouter {
            sources: self.sources,
        }
    }
}

// ============================================================================
// SECTION: Router
// ============================================================================

/// Scheme-dispatching document source.
pub struct SourceRouter {
    /// Sources keyed by scheme.
    sources: BTreeMap<String, Arc<dyn DocumentSource>>,
}

impl SourceRouter {
    /// Returns a builder for the router.
    #[must_use]
    pub fn builder() -> SourceRouterBuilder {
        SourceRouterBuilder::default()
    }

    /// Returns the registered schemes in sorted order.
    #[must_use]
    pub fn schemes(&self) -> Vec<&str> {
        self.sources.keys().map(String::as_str).collect()
    }

    /// Resolves the configured source for a URL.
    fn resolve_source(&self, url: &Url) -> Result<Arc<dyn DocumentSource>, SourceError> {
        let scheme = url.scheme();
        if let Some(source) = self.sources.get(scheme) {
            return Ok(Arc::clone(source));
        }
        if let Some((base, _)) = scheme.split_once('+')
            && let Some(source) = self.sources.get(base)
        {
            return Ok(Arc::clone(source));
        }
        Err(SourceError::UnsupportedScheme(scheme.to_string()))
    }
}

#[async_trait]
impl DocumentSource for SourceRouter {
    async fn fetch(&self, url: &Url) -> Result<SourcePayload, SourceError> {
        let source = self.resolve_source(url)?;
        source.fetch(url).await
    }
}
