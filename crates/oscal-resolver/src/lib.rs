// crates/oscal-resolver/src/lib.rs
// ============================================================================
// Module: OSCAL Resolver Library
// Description: Async profile and SSP resolution over pluggable document sources.
// Purpose: Fetch, cache, and merge the documents a profile imports.
// Dependencies: oscal-core, reqwest, tokio, tracing, url
// ============================================================================

//! ## Overview
//! `oscal-resolver` owns the I/O side of the toolkit. [`DocumentSource`]
//! implementations fetch bytes (HTTP, file, or a scheme router over both),
//! [`DocumentCache`] keeps parsed documents for one session, and
//! [`Resolver`] drives profile and SSP resolution with concurrent imports.
//! Invariants:
//! - Library code only emits `tracing` events; it never installs a subscriber.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod cache;
pub mod engine;
pub mod rewrite;
pub mod source;
pub mod types;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use cache::DocumentCache;
pub use cache::normalize_url;
pub use engine::Resolver;
pub use rewrite::GithubBlobRewrite;
pub use rewrite::UrlRewrite;
pub use rewrite::UrlRewritePolicy;
pub use source::DEFAULT_MAX_DOCUMENT_BYTES;
pub use source::DocumentSource;
pub use source::FileSource;
pub use source::HttpSource;
pub use source::SourceError;
pub use source::SourcePayload;
pub use source::SourceRouter;
pub use source::SourceRouterBuilder;
pub use types::ImportSource;
pub use types::ImportStatus;
pub use types::ProfileSummary;
pub use types::ResolveError;
pub use types::ResolvedProfile;
pub use types::ResolvedSsp;
pub use types::SourceSummary;
