// crates/oscal-resolver/src/source/http.rs
// ============================================================================
// Module: OSCAL HTTP Source
// Description: HTTP-backed document source.
// Purpose: Fetch OSCAL documents via async HTTP GET.
// Dependencies: reqwest, url
// ============================================================================

//! ## Overview
//! [`HttpSource`] resolves `http://` and `https://` URLs into document bytes.
//! Invariants:
//! - Non-success status codes fail as [`SourceError::Http`].
//! - Transport failures fail as [`SourceError::Network`].
//! - Bodies are read incrementally and rejected once they pass the byte cap.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use url::Url;

use crate::source::DEFAULT_MAX_DOCUMENT_BYTES;
use crate::source::DocumentSource;
use crate::source::SourceError;
use crate::source::SourcePayload;
use crate::source::enforce_max_bytes;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default user agent.
pub const DEFAULT_USER_AGENT: &str = concat!("oscal-resolver/", env!("CARGO_PKG_VERSION"));

/// Maximum redirects followed per request.
const MAX_REDIRECTS: usize = 5;

// ============================================================================
// SECTION: HTTP Source
// ============================================================================

/// HTTP-backed document source.
#[derive(Debug, Clone)]
pub struct HttpSource {
    /// HTTP client used for fetch requests.
    client: Client,
    /// Maximum accepted body size.
    max_bytes: usize,
}

impl HttpSource {
    /// Builds an HTTP source with default timeout, user agent, and size cap.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Network`] when the HTTP client cannot be constructed.
    pub fn new() -> Result<Self, SourceError> {
        Self::with_settings(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, DEFAULT_MAX_DOCUMENT_BYTES)
    }

    /// Builds an HTTP source with explicit settings.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Network`] when the HTTP client cannot be constructed.
    pub fn with_settings(
        timeout: Duration,
        user_agent: &str,
        max_bytes: usize,
    ) -> Result<Self, SourceError> {
        let client = Client::builder()
            .redirect(Policy::limited(MAX_REDIRECTS))
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|err| SourceError::Network(err.to_string()))?;
        Ok(Self {
            client,
            max_bytes,
        })
    }

    /// Creates an HTTP source with a preconfigured client.
    #[must_use]
    pub const fn with_client(client: Client, max_bytes: usize) -> Self {
        Self {
            client,
            max_bytes,
        }
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    async fn fetch(&self, url: &Url) -> Result<SourcePayload, SourceError> {
        match url.scheme() {
            "http" | "https" => {}
            scheme => return Err(SourceError::UnsupportedScheme(scheme.to_string())),
        }

        let mut response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|err| SourceError::Network(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown Status").to_string(),
            });
        }
        if let Some(length) = response.content_length() {
            let length = usize::try_from(length).unwrap_or(usize::MAX);
            enforce_max_bytes(length, self.max_bytes)?;
        }
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let mut bytes = Vec::new();
        while let Some(chunk) =
            response.chunk().await.map_err(|err| SourceError::Network(err.to_string()))?
        {
            bytes.extend_from_slice(&chunk);
            enforce_max_bytes(bytes.len(), self.max_bytes)?;
        }
        Ok(SourcePayload {
            bytes,
            content_type,
        })
    }
}
