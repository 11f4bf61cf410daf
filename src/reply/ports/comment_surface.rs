//! Comment surface port: post and edit PR comments.

use crate::reply::domain::{CommentRef, ThreadRef};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for comment surface operations.
pub type CommentSurfaceResult<T> = Result<T, CommentSurfaceError>;

/// Capability to post and edit comments on a pull request conversation.
#[async_trait]
pub trait CommentSurface: Send + Sync {
    /// Posts a new comment and returns its reference.
    ///
    /// # Errors
    ///
    /// Returns [`CommentSurfaceError`] on transport failure.
    async fn post(&self, thread: &ThreadRef, body: &str) -> CommentSurfaceResult<CommentRef>;

    /// Replaces the body of an existing comment.
    ///
    /// # Errors
    ///
    /// Returns [`CommentSurfaceError`] on transport failure or when the
    /// reference no longer resolves.
    async fn edit(&self, comment: &CommentRef, body: &str) -> CommentSurfaceResult<()>;
}

/// Errors returned by comment surface implementations.
#[derive(Debug, Clone, Error)]
pub enum CommentSurfaceError {
    /// Transport failure while talking to the comment host.
    #[error("comment surface failure: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The comment reference did not resolve to an editable comment.
    #[error("comment '{0}' was not found")]
    CommentNotFound(CommentRef),
}

impl CommentSurfaceError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
