//! In-memory image registry for engine tests.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::reply::domain::{ImageDigest, ImageTag};
use crate::reply::ports::{ImageRegistry, ImageRegistryError, ImageRegistryResult};

/// Thread-safe in-memory tag-to-digest registry.
#[derive(Debug, Clone, Default)]
pub struct InMemoryImageRegistry {
    state: Arc<RwLock<BTreeMap<ImageTag, ImageDigest>>>,
}

impl InMemoryImageRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_error(err: impl ToString) -> ImageRegistryError {
        ImageRegistryError::lookup(std::io::Error::other(err.to_string()))
    }

    /// Publishes `tag` with a digest derived from the tag's own bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ImageRegistryError`] when the lock is poisoned.
    pub fn publish(&self, tag: ImageTag) -> ImageRegistryResult<ImageDigest> {
        let digest = ImageDigest::from_content(tag.as_str().as_bytes());
        self.publish_with_digest(tag, digest.clone())?;
        Ok(digest)
    }

    /// Publishes `tag` with an explicit digest.
    ///
    /// # Errors
    ///
    /// Returns [`ImageRegistryError`] when the lock is poisoned.
    pub fn publish_with_digest(
        &self,
        tag: ImageTag,
        digest: ImageDigest,
    ) -> ImageRegistryResult<()> {
        let mut state = self.state.write().map_err(Self::lock_error)?;
        state.insert(tag, digest);
        Ok(())
    }
}

#[async_trait]
impl ImageRegistry for InMemoryImageRegistry {
    async fn resolve(&self, tag: &ImageTag) -> ImageRegistryResult<Option<ImageDigest>> {
        let state = self.state.read().map_err(Self::lock_error)?;
        Ok(state.get(tag).cloned())
    }
}
