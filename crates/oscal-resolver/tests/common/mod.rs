// crates/oscal-resolver/tests/common/mod.rs
// ============================================================================
// Module: Common Test Utilities
// Description: In-memory document source and OSCAL fixtures for resolver tests.
// Purpose: Drive resolution without a network.
// Dependencies: oscal-core, oscal-resolver, serde_json
// ============================================================================

//! ## Overview
//! [`MemorySource`] serves canned bodies or canned failures per URL and
//! counts fetches so cache behavior is observable.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use oscal_core::Document;
use oscal_core::model::implementation::SystemSecurityPlan;
use oscal_core::model::profile::Profile;
use oscal_core::parse_document;
use oscal_resolver::DocumentSource;
use oscal_resolver::Resolver;
use oscal_resolver::SourceError;
use oscal_resolver::SourcePayload;
use serde_json::Value;
use serde_json::json;
use url::Url;

// ============================================================================
// SECTION: Memory Source
// ============================================================================

/// Document source backed by a URL-to-response map.
#[derive(Default)]
pub struct MemorySource {
    responses: HashMap<String, Result<String, SourceError>>,
    fetches: AtomicUsize,
}

impl MemorySource {
    /// Serves a JSON value at a URL.
    pub fn with_document(mut self, url: &str, value: &Value) -> Self {
        self.responses.insert(url.to_string(), Ok(value.to_string()));
        self
    }

    /// Serves raw text at a URL.
    pub fn with_text(mut self, url: &str, text: &str) -> Self {
        self.responses.insert(url.to_string(), Ok(text.to_string()));
        self
    }

    /// Fails fetches of a URL with the given error.
    pub fn with_failure(mut self, url: &str, error: SourceError) -> Self {
        self.responses.insert(url.to_string(), Err(error));
        self
    }

    /// Returns how many fetches reached this source.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentSource for MemorySource {
    async fn fetch(&self, url: &Url) -> Result<SourcePayload, SourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        match self.responses.get(url.as_str()) {
            Some(Ok(body)) => Ok(SourcePayload {
                bytes: body.clone().into_bytes(),
                content_type: Some("application/json".to_string()),
            }),
            Some(Err(error)) => Err(error.clone()),
            None => Err(SourceError::Http {
                status: 404,
                reason: "Not Found".to_string(),
            }),
        }
    }
}

/// Builds a resolver over a shared memory source.
pub fn resolver(source: &Arc<MemorySource>) -> Resolver {
    let shared: Arc<dyn DocumentSource> = Arc::clone(source) as Arc<dyn DocumentSource>;
    Resolver::new(shared)
}

/// Parses a base URL.
pub fn url(text: &str) -> Url {
    Url::parse(text).expect("valid url")
}

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Returns minimal valid metadata.
pub fn metadata(title: &str) -> Value {
    json!({ "title": title, "version": "1.0", "oscal-version": "1.1.2" })
}

/// Returns a catalog whose top-level controls have the given ids.
pub fn catalog(title: &str, ids: &[&str]) -> Value {
    let controls: Vec<Value> = ids
        .iter()
        .map(|id| {
            json!({
                "id": id,
                "title": format!("Control {id}"),
                "params": [{ "id": format!("{id}_prm_1"), "label": "frequency" }]
            })
        })
        .collect();
    json!({
        "catalog": {
            "uuid": format!("{title}-uuid"),
            "metadata": metadata(title),
            "controls": controls
        }
    })
}

/// Returns a profile envelope.
pub fn profile_value(imports: Value, extra: Option<Value>) -> Value {
    let mut body = json!({
        "uuid": "profile-uuid",
        "metadata": metadata("Baseline"),
        "imports": imports
    });
    if let Some(Value::Object(extra)) = extra {
        for (key, value) in extra {
            body[key] = value;
        }
    }
    json!({ "profile": body })
}

/// Parses a value that must be a profile.
pub fn parse_profile(value: Value) -> Profile {
    match parse_document(value).expect("profile parses").document {
        Document::Profile(profile) => profile,
        other => panic!("expected profile, got {}", other.document_type()),
    }
}

/// Returns an SSP referencing a profile href.
pub fn ssp(profile_href: &str, back_matter: Option<Value>) -> SystemSecurityPlan {
    let mut body = json!({
        "uuid": "ssp-uuid",
        "metadata": metadata("System Plan"),
        "import-profile": { "href": profile_href },
        "system-characteristics": { "system-name": "Sys" },
        "system-implementation": {},
        "control-implementation": { "implemented-requirements": [] }
    });
    if let Some(back_matter) = back_matter {
        body["back-matter"] = back_matter;
    }
    match parse_document(json!({ "system-security-plan": body })).expect("ssp parses").document {
        Document::SystemSecurityPlan(ssp) => ssp,
        other => panic!("expected ssp, got {}", other.document_type()),
    }
}
