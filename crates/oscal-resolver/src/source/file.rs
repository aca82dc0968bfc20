// crates/oscal-resolver/src/source/file.rs
// ============================================================================
// Module: OSCAL File Source
// Description: File-backed document source.
// Purpose: Read OSCAL documents referenced through `file://` URLs.
// Dependencies: tokio, url
// ============================================================================

//! ## Overview
//! [`FileSource`] resolves `file://` URLs into document bytes so a locally
//! loaded document's relative imports resolve against its own directory. A
//! root directory can be configured to refuse paths outside it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::AsyncReadExt;
use url::Url;

use crate::source::DEFAULT_MAX_DOCUMENT_BYTES;
use crate::source::DocumentSource;
use crate::source::SourceError;
use crate::source::SourcePayload;
use crate::source::enforce_max_bytes;

// ============================================================================
// SECTION: File Source
// ============================================================================

/// File-backed document source.
#[derive(Debug, Clone)]
pub struct FileSource {
    /// Optional root directory paths must stay under.
    root: Option<PathBuf>,
    /// Maximum accepted file size.
    max_bytes: usize,
}

impl FileSource {
    /// Creates a file source rooted at the provided directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            max_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
        }
    }

    /// Creates a file source with no root restriction.
    #[must_use]
    pub const fn unrestricted() -> Self {
        Self {
            root: None,
            max_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
        }
    }

    /// Replaces the size cap.
    #[must_use]
    pub const fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Maps a file URL to a local path, enforcing the root when configured.
    async fn resolve_path(&self, url: &Url) -> Result<PathBuf, SourceError> {
        if url.scheme() != "file" {
            return Err(SourceError::UnsupportedScheme(url.scheme().to_string()));
        }
        let path = url
            .to_file_path()
            .map_err(|()| SourceError::InvalidUri(format!("cannot map {url} to a file path")))?;

        if let Some(root) = &self.root {
            let root = tokio::fs::canonicalize(root).await.map_err(|err| io_error(root, &err))?;
            let resolved =
                tokio::fs::canonicalize(&path).await.map_err(|err| io_error(&path, &err))?;
            if !resolved.starts_with(&root) {
                return Err(SourceError::InvalidUri("file path escapes configured root".to_string()));
            }
        }
        Ok(path)
    }

    /// Reads at most `max_bytes + 1` bytes so oversize files fail fast.
    async fn read_with_limit(&self, path: &Path) -> Result<Vec<u8>, SourceError> {
        let file = tokio::fs::File::open(path).await.map_err(|err| io_error(path, &err))?;
        let limit = u64::try_from(self.max_bytes).unwrap_or(u64::MAX).saturating_add(1);
        let mut limited = file.take(limit);
        let mut bytes = Vec::new();
        limited.read_to_end(&mut bytes).await.map_err(|err| io_error(path, &err))?;
        enforce_max_bytes(bytes.len(), self.max_bytes)?;
        Ok(bytes)
    }
}

impl Default for FileSource {
    fn default() -> Self {
        Self::unrestricted()
    }
}

/// Formats an I/O failure with the offending path.
fn io_error(path: &Path, err: &std::io::Error) -> SourceError {
    if err.kind() == ErrorKind::NotFound {
        SourceError::Io(format!("file not found: {}", path.display()))
    } else {
        SourceError::Io(format!("{}: {err}", path.display()))
    }
}

#[async_trait]
impl DocumentSource for FileSource {
    async fn fetch(&self, url: &Url) -> Result<SourcePayload, SourceError> {
        let path = self.resolve_path(url).await?;
        let bytes = self.read_with_limit(&path).await?;
        Ok(SourcePayload {
            bytes,
            content_type: None,
        })
    }
}
