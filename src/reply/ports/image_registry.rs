//! Image registry port: resolve image tags to pinned digests.

use crate::reply::domain::{ImageDigest, ImageTag};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for image registry operations.
pub type ImageRegistryResult<T> = Result<T, ImageRegistryError>;

/// Capability to look up the content digest currently behind an image tag.
#[async_trait]
pub trait ImageRegistry: Send + Sync {
    /// Resolves `tag` to its digest.
    ///
    /// Returns `None` when the tag does not exist; a missing tag is the
    /// caller's precondition failure, not a registry error.
    ///
    /// # Errors
    ///
    /// Returns [`ImageRegistryError`] on transport failure.
    async fn resolve(&self, tag: &ImageTag) -> ImageRegistryResult<Option<ImageDigest>>;
}

/// Errors returned by image registry implementations.
#[derive(Debug, Clone, Error)]
pub enum ImageRegistryError {
    /// Transport failure while talking to the registry.
    #[error("image registry failure: {0}")]
    Lookup(Arc<dyn std::error::Error + Send + Sync>),
}

impl ImageRegistryError {
    /// Wraps a lookup error.
    pub fn lookup(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Lookup(Arc::new(err))
    }
}
