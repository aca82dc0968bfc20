// crates/oscal-resolver/src/rewrite.rs
// ============================================================================
// Module: URL Rewrite Policy
// Description: Ordered rewrite rules applied to resolved URLs before fetching.
// Purpose: Map browse URLs (such as GitHub blob pages) to raw content URLs.
// Dependencies: regex, url
// ============================================================================

//! ## Overview
//! A [`UrlRewritePolicy`] runs its [`UrlRewrite`] rules in order; the first
//! rule that returns a rewritten URL wins. The default policy carries only
//! [`GithubBlobRewrite`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

// ============================================================================
// SECTION: Rule Trait
// ============================================================================

/// One URL rewrite rule.
pub trait UrlRewrite: Send + Sync {
    /// Short rule name for logs.
    fn name(&self) -> &'static str;

    /// Returns the rewritten URL, or `None` when the rule does not apply.
    fn rewrite(&self, url: &Url) -> Option<Url>;
}

// ============================================================================
// SECTION: GitHub Rule
// ============================================================================

/// Blob page pattern: owner, repository, and the ref-plus-path remainder.
static GITHUB_BLOB: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^https?://github\.com/([^/]+)/([^/]+)/blob/(.+)$").ok()
});

/// Rewrites `github.com/<owner>/<repo>/blob/<path>` to
/// `raw.githubusercontent.com/<owner>/<repo>/<path>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GithubBlobRewrite;

impl UrlRewrite for GithubBlobRewrite {
    fn name(&self) -> &'static str {
        "github-blob"
    }

    fn rewrite(&self, url: &Url) -> Option<Url> {
        let pattern = GITHUB_BLOB.as_ref()?;
        let captures = pattern.captures(url.as_str())?;
        let owner = captures.get(1)?.as_str();
        let repo = captures.get(2)?.as_str();
        let rest = captures.get(3)?.as_str();
        Url::parse(&format!("https://raw.githubusercontent.com/{owner}/{repo}/{rest}")).ok()
    }
}

// ============================================================================
// SECTION: Policy
// ============================================================================

/// Ordered set of rewrite rules.
#[derive(Clone)]
pub struct UrlRewritePolicy {
    /// Rules in evaluation order.
    rules: Vec<Arc<dyn UrlRewrite>>,
}

impl UrlRewritePolicy {
    /// Returns a policy with no rules.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            rules: Vec::new(),
        }
    }

    /// Appends a rule.
    #[must_use]
    pub fn with_rule(mut self, rule: impl UrlRewrite + 'static) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Applies the first matching rule, returning the URL unchanged otherwise.
    #[must_use]
    pub fn apply(&self, url: Url) -> Url {
        for rule in &self.rules {
            if let Some(rewritten) = rule.rewrite(&url) {
                tracing::debug!(rule = rule.name(), from = %url, to = %rewritten, "rewrote url");
                return rewritten;
            }
        }
        url
    }

    /// Returns true when no rules are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for UrlRewritePolicy {
    fn default() -> Self {
        Self::none().with_rule(GithubBlobRewrite)
    }
}

impl fmt::Debug for UrlRewritePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rules.iter().map(|rule| rule.name())).finish()
    }
}
