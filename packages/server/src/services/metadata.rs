//! Link metadata extraction.
//!
//! The only implementation is a no-op. A fetching extractor can be swapped in
//! through [`AppState::metadata`](crate::state::AppState) without touching the
//! handlers' signatures.

use async_trait::async_trait;
use serde::Serialize;

/// Best-effort page metadata for a URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkMetadata {
    pub url: String,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Produces page metadata for a URL. Never fails: anything that cannot be
/// determined is `None`.
#[async_trait]
pub trait MetadataExtractor: Send + Sync {
    async fn extract(&self, url: &str) -> LinkMetadata;
}

/// Extractor that returns no title or description.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMetadataExtractor;

#[async_trait]
impl MetadataExtractor for NoopMetadataExtractor {
    async fn extract(&self, url: &str) -> LinkMetadata {
        tracing::trace!(url, "metadata extraction not implemented");
        LinkMetadata {
            url: url.to_string(),
            title: None,
            description: None,
        }
    }
}
