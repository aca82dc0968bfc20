// crates/oscal-resolver/src/engine.rs
// ============================================================================
// Module: Resolution Engine
// Description: Profile and SSP import resolution with concurrent fetching.
// Purpose: Turn a profile's import graph into one filtered, modified control list.
// Dependencies: oscal-core, oscal-config, tokio, tracing, url
// ============================================================================

//! ## Overview
//! [`Resolver`] walks a profile's imports concurrently. Each import resolves
//! its href (URN, fragment via back-matter, absolute or relative URL), runs
//! the result through the rewrite policy, loads it through the session
//! [`DocumentCache`], and selects controls from the fetched catalog.
//! Invariants:
//! - One failing import never aborts its siblings; it becomes an `error`
//!   [`ImportSource`].
//! - Output order is import order, whatever order the fetches complete in.
//! - Modifications run once, after every import has settled.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use oscal_config::ResolverConfig;
use oscal_core::Document;
use oscal_core::DocumentType;
use oscal_core::HrefKind;
use oscal_core::ParseError;
use oscal_core::ParsedDocument;
use oscal_core::apply_modifications;
use oscal_core::model::catalog::Control;
use oscal_core::model::common::BackMatter;
use oscal_core::model::implementation::SystemSecurityPlan;
use oscal_core::model::profile::Import;
use oscal_core::model::profile::Profile;
use oscal_core::parse_document_text;
use oscal_core::parse_href;
use oscal_core::select_controls;
use tokio::task::JoinSet;
use url::Url;

use crate::cache::DocumentCache;
use crate::rewrite::UrlRewritePolicy;
use crate::source::DocumentSource;
use crate::source::FileSource;
use crate::source::HttpSource;
use crate::source::SourceError;
use crate::source::SourceRouter;
use crate::types::ImportSource;
use crate::types::ImportStatus;
use crate::types::ProfileSummary;
use crate::types::ResolveError;
use crate::types::ResolvedProfile;
use crate::types::ResolvedSsp;
use crate::types::SourceSummary;

// ============================================================================
// SECTION: Resolver
// ============================================================================

/// Resolution session: a document source, a cache, and a rewrite policy.
///
/// # Invariants
/// - Clones share the same source and cache.
#[derive(Clone)]
pub struct Resolver {
    /// Fetch boundary.
    source: Arc<dyn DocumentSource>,
    /// Session cache.
    cache: Arc<DocumentCache>,
    /// Rewrite rules applied to every resolved URL.
    rewrites: UrlRewritePolicy,
}

impl Resolver {
    /// Creates a resolver with a fresh cache and the default rewrite policy.
    #[must_use]
    pub fn new(source: Arc<dyn DocumentSource>) -> Self {
        Self {
            source,
            cache: Arc::new(DocumentCache::new()),
            rewrites: UrlRewritePolicy::default(),
        }
    }

    /// Builds the production resolver (HTTP plus optional file access).
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the HTTP client cannot be constructed.
    pub fn from_config(config: &ResolverConfig) -> Result<Self, SourceError> {
        let mut builder = SourceRouter::builder();
        if config.allow_http {
            let http: Arc<dyn DocumentSource> = Arc::new(HttpSource::with_settings(
                Duration::from_millis(config.timeout_ms),
                &config.user_agent,
                config.max_document_bytes,
            )?);
            builder = builder.shared_source("http", Arc::clone(&http)).shared_source("https", http);
        }
        if config.allow_file {
            builder = builder.source(
                "file",
                FileSource::unrestricted().with_max_bytes(config.max_document_bytes),
            );
        }
        let rewrites = if config.rewrite_github_blobs {
            UrlRewritePolicy::default()
        } else {
            UrlRewritePolicy::none()
        };
        Ok(Self::new(Arc::new(builder.build())).with_rewrites(rewrites))
    }

    /// Replaces the session cache.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<DocumentCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Replaces the rewrite policy.
    #[must_use]
    pub fn with_rewrites(mut self, rewrites: UrlRewritePolicy) -> Self {
        self.rewrites = rewrites;
        self
    }

    /// Returns the session cache.
    #[must_use]
    pub fn cache(&self) -> &DocumentCache {
        &self.cache
    }

    // ------------------------------------------------------------------------
    // Reference resolution
    // ------------------------------------------------------------------------

    /// Turns an href into the URL that will be fetched.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::UnresolvableReference`] for URNs, unknown or
    /// link-less back-matter fragments, relative hrefs without a base, and
    /// hrefs that do not form a valid URL.
    pub fn resolve_reference(
        &self,
        href: &str,
        base_url: Option<&Url>,
        back_matter: Option<&BackMatter>,
    ) -> Result<Url, ResolveError> {
        let parsed = parse_href(href);
        let url = match parsed.kind {
            HrefKind::Urn => {
                return Err(ResolveError::UnresolvableReference(format!(
                    "URN references cannot be resolved: {href}"
                )));
            }
            HrefKind::Fragment => {
                let uuid = parsed.fragment.unwrap_or_default();
                let target = back_matter_target(&uuid, back_matter)?;
                join_reference(target, base_url)?
            }
            HrefKind::AbsoluteUrl | HrefKind::Relative => join_reference(href, base_url)?,
        };
        Ok(self.rewrites.apply(url))
    }

    /// Loads a document through the cache.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] when the fetch fails or the bytes do not parse.
    pub async fn load_document(
        &self,
        url: &Url,
    ) -> Result<(Arc<ParsedDocument>, ImportStatus), ResolveError> {
        if let Some(document) = self.cache.get(url.as_str()) {
            tracing::debug!(url = %url, "document cache hit");
            return Ok((document, ImportStatus::Cached));
        }
        tracing::debug!(url = %url, "fetching document");
        let payload = self
            .source
            .fetch(url)
            .await
            .map_err(|err| ResolveError::from_source(url.as_str(), err))?;
        let text = String::from_utf8(payload.bytes).map_err(|_| ResolveError::Parse {
            url: url.to_string(),
            source: ParseError::MalformedInput("document is not valid utf-8".to_string()),
        })?;
        let document = parse_document_text(&text).map_err(|source| ResolveError::Parse {
            url: url.to_string(),
            source,
        })?;
        let document = Arc::new(document);
        self.cache.set(url.as_str(), Arc::clone(&document));
        Ok((document, ImportStatus::Loaded))
    }

    // ------------------------------------------------------------------------
    // Profile resolution
    // ------------------------------------------------------------------------

    /// Resolves a profile's imports into one control list.
    ///
    /// Import failures are recorded per import and never abort resolution.
    pub async fn resolve_profile(
        &self,
        profile: &Profile,
        base_url: Option<&Url>,
    ) -> ResolvedProfile {
        let back_matter = Arc::new(profile.back_matter.clone());
        let base_url = base_url.cloned();
        let mut tasks = JoinSet::new();
        for (index, import) in profile.imports.iter().enumerate() {
            let resolver = self.clone();
            let import = import.clone();
            let base_url = base_url.clone();
            let back_matter = Arc::clone(&back_matter);
            tasks.spawn(async move {
                let outcome = resolver
                    .resolve_import(&import, base_url.as_ref(), (*back_matter).as_ref())
                    .await;
                (index, outcome)
            });
        }

        let mut slots: Vec<Option<(ImportSource, Vec<Control>)>> =
            profile.imports.iter().map(|_| None).collect();
        let mut errors = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, outcome)) => {
                    if let Some(slot) = slots.get_mut(index) {
                        *slot = Some(outcome);
                    }
                }
                Err(err) => {
                    tracing::warn!(error = %err, "import task did not complete");
                    errors.push(format!("import task failed: {err}"));
                }
            }
        }

        let mut imports = Vec::with_capacity(slots.len());
        let mut controls = Vec::new();
        for (slot, import) in slots.into_iter().zip(&profile.imports) {
            match slot {
                Some((source, selected)) => {
                    imports.push(source);
                    controls.extend(selected);
                }
                None => imports.push(ImportSource::failed(
                    &import.href,
                    None,
                    "import task did not complete",
                )),
            }
        }
        apply_modifications(&mut controls, profile.modify.as_ref());

        let failed = imports.iter().filter(|source| source.status == ImportStatus::Error).count();
        tracing::info!(
            imports = imports.len(),
            failed,
            controls = controls.len(),
            "profile resolved"
        );
        ResolvedProfile {
            controls,
            imports,
            errors,
        }
    }

    /// Resolves one import into its provenance record and selected controls.
    async fn resolve_import(
        &self,
        import: &Import,
        base_url: Option<&Url>,
        back_matter: Option<&BackMatter>,
    ) -> (ImportSource, Vec<Control>) {
        let url = match self.resolve_reference(&import.href, base_url, back_matter) {
            Ok(url) => url,
            Err(err) => return (import_failure(&import.href, None, &err), Vec::new()),
        };
        let (document, status) = match self.load_document(&url).await {
            Ok(loaded) => loaded,
            Err(err) => {
                return (import_failure(&import.href, Some(url.to_string()), &err), Vec::new());
            }
        };
        let Document::Catalog(catalog) = &document.document else {
            let err = ResolveError::UnexpectedDocumentType {
                expected: DocumentType::Catalog,
                actual: document.document_type,
            };
            return (import_failure(&import.href, Some(url.to_string()), &err), Vec::new());
        };
        let controls = select_controls(catalog, import);
        tracing::debug!(
            href = %import.href,
            url = %url,
            cached = status == ImportStatus::Cached,
            controls = controls.len(),
            "import resolved"
        );
        let source = ImportSource {
            href: import.href.clone(),
            resolved_url: Some(url.to_string()),
            status,
            control_count: controls.len(),
            error: None,
        };
        (source, controls)
    }

    // ------------------------------------------------------------------------
    // SSP resolution
    // ------------------------------------------------------------------------

    /// Resolves an SSP's profile and, through it, the profile's catalogs.
    ///
    /// A profile that cannot be loaded is reported in `errors` and on
    /// `profile_source`; the result then carries no controls.
    pub async fn resolve_ssp(
        &self,
        ssp: &SystemSecurityPlan,
        base_url: Option<&Url>,
    ) -> ResolvedSsp {
        let href = &ssp.import_profile.href;
        let (url, document, status) = match self.load_profile(href, base_url, ssp).await {
            Ok(loaded) => loaded,
            Err((resolved_url, err)) => {
                let message = err.to_string();
                return ResolvedSsp {
                    profile: None,
                    profile_source: ImportSource::failed(href, resolved_url, message.clone()),
                    catalog_sources: Vec::new(),
                    controls: Vec::new(),
                    merge: None,
                    modify: None,
                    errors: vec![message],
                };
            }
        };
        let Document::Profile(profile) = &document.document else {
            let message = ResolveError::UnexpectedDocumentType {
                expected: DocumentType::Profile,
                actual: document.document_type,
            }
            .to_string();
            return ResolvedSsp {
                profile: None,
                profile_source: ImportSource::failed(href, Some(url.to_string()), message.clone()),
                catalog_sources: Vec::new(),
                controls: Vec::new(),
                merge: None,
                modify: None,
                errors: vec![message],
            };
        };

        let profile_base = url.join(".").unwrap_or_else(|_| url.clone());
        let nested = self.resolve_profile(profile, Some(&profile_base)).await;
        ResolvedSsp {
            profile: Some(ProfileSummary {
                uuid: profile.uuid.clone(),
                title: profile.metadata.title.clone(),
                version: profile.metadata.version.clone(),
                import_count: profile.imports.len(),
            }),
            profile_source: ImportSource {
                href: href.clone(),
                resolved_url: Some(url.to_string()),
                status,
                control_count: nested.controls.len(),
                error: None,
            },
            catalog_sources: nested.imports,
            controls: nested.controls,
            merge: profile.merge.clone(),
            modify: profile.modify.clone(),
            errors: nested.errors,
        }
    }

    /// Resolves and loads the SSP's profile reference.
    async fn load_profile(
        &self,
        href: &str,
        base_url: Option<&Url>,
        ssp: &SystemSecurityPlan,
    ) -> Result<(Url, Arc<ParsedDocument>, ImportStatus), (Option<String>, ResolveError)> {
        let url = self
            .resolve_reference(href, base_url, ssp.back_matter.as_ref())
            .map_err(|err| (None, err))?;
        let (document, status) =
            self.load_document(&url).await.map_err(|err| (Some(url.to_string()), err))?;
        Ok((url, document, status))
    }

    // ------------------------------------------------------------------------
    // Single source
    // ------------------------------------------------------------------------

    /// Resolves and loads one referenced document, returning its identity.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] when the reference cannot be resolved,
    /// fetched, or parsed.
    pub async fn resolve_source(
        &self,
        href: &str,
        base_url: Option<&Url>,
        back_matter: Option<&BackMatter>,
    ) -> Result<SourceSummary, ResolveError> {
        let url = self.resolve_reference(href, base_url, back_matter)?;
        let (document, status) = self.load_document(&url).await?;
        let metadata = document.document.metadata();
        Ok(SourceSummary {
            href: href.to_string(),
            resolved_url: url.to_string(),
            status,
            document_type: document.document_type,
            title: metadata.title.clone(),
            version: metadata.version.clone(),
            oscal_version: document.oscal_version.clone(),
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Looks up the rlink href a `#uuid` fragment points at.
fn back_matter_target<'a>(
    uuid: &str,
    back_matter: Option<&'a BackMatter>,
) -> Result<&'a str, ResolveError> {
    let resource = back_matter.and_then(|matter| matter.resource(uuid)).ok_or_else(|| {
        ResolveError::UnresolvableReference(format!("resource #{uuid} not found in back-matter"))
    })?;
    let rlink = resource.preferred_rlink().ok_or_else(|| {
        ResolveError::UnresolvableReference(format!("back-matter resource #{uuid} has no rlinks"))
    })?;
    Ok(&rlink.href)
}

/// Parses an absolute href or joins a relative one onto the base.
fn join_reference(href: &str, base_url: Option<&Url>) -> Result<Url, ResolveError> {
    match Url::parse(href) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = base_url.ok_or_else(|| {
                ResolveError::UnresolvableReference(format!(
                    "relative reference {href} requires a base URL"
                ))
            })?;
            base.join(href).map_err(|err| {
                ResolveError::UnresolvableReference(format!("cannot resolve {href}: {err}"))
            })
        }
        Err(err) => {
            Err(ResolveError::UnresolvableReference(format!("invalid reference {href}: {err}")))
        }
    }
}

/// Builds a failed import record and logs the failure.
fn import_failure(href: &str, resolved_url: Option<String>, err: &ResolveError) -> ImportSource {
    tracing::warn!(
        href = %href,
        url = resolved_url.as_deref().unwrap_or_default(),
        error = %err,
        "import failed"
    );
    ImportSource::failed(href, resolved_url, err.to_string())
}
