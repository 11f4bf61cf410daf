//! Recording comment surface for engine tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::reply::domain::{CommentRef, ThreadRef};
use crate::reply::ports::{CommentSurface, CommentSurfaceError, CommentSurfaceResult};

/// A comment as originally posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedComment {
    /// Reference issued for the comment.
    pub comment: CommentRef,
    /// Conversation the comment was posted to.
    pub thread: ThreadRef,
    /// Body at post time.
    pub body: String,
}

#[derive(Debug, Default)]
struct SurfaceState {
    counter: u64,
    posts: Vec<PostedComment>,
    bodies: HashMap<String, String>,
    edits: u64,
}

/// Thread-safe comment surface that records every post and edit.
#[derive(Debug, Clone, Default)]
pub struct RecordingCommentSurface {
    state: Arc<RwLock<SurfaceState>>,
}

impl RecordingCommentSurface {
    /// Creates an empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_error(err: impl ToString) -> CommentSurfaceError {
        CommentSurfaceError::transport(std::io::Error::other(err.to_string()))
    }

    /// Returns every comment posted so far, in order.
    ///
    /// # Errors
    ///
    /// Returns [`CommentSurfaceError`] when the lock is poisoned.
    pub fn posted(&self) -> CommentSurfaceResult<Vec<PostedComment>> {
        let state = self.state.read().map_err(Self::lock_error)?;
        Ok(state.posts.clone())
    }

    /// Returns the current body of a comment, following edits.
    ///
    /// # Errors
    ///
    /// Returns [`CommentSurfaceError`] when the lock is poisoned.
    pub fn body_of(&self, comment: &CommentRef) -> CommentSurfaceResult<Option<String>> {
        let state = self.state.read().map_err(Self::lock_error)?;
        Ok(state.bodies.get(comment.as_str()).cloned())
    }

    /// Returns how many edits the surface has served.
    ///
    /// # Errors
    ///
    /// Returns [`CommentSurfaceError`] when the lock is poisoned.
    pub fn edit_count(&self) -> CommentSurfaceResult<u64> {
        let state = self.state.read().map_err(Self::lock_error)?;
        Ok(state.edits)
    }
}

#[async_trait]
impl CommentSurface for RecordingCommentSurface {
    async fn post(&self, thread: &ThreadRef, body: &str) -> CommentSurfaceResult<CommentRef> {
        let mut state = self.state.write().map_err(Self::lock_error)?;
        state.counter += 1;
        let comment =
            CommentRef::new(format!("comment-{}", state.counter)).map_err(Self::lock_error)?;
        state.posts.push(PostedComment {
            comment: comment.clone(),
            thread: thread.clone(),
            body: body.to_owned(),
        });
        state
            .bodies
            .insert(comment.as_str().to_owned(), body.to_owned());
        Ok(comment)
    }

    async fn edit(&self, comment: &CommentRef, body: &str) -> CommentSurfaceResult<()> {
        let mut state = self.state.write().map_err(Self::lock_error)?;
        let slot = state
            .bodies
            .get_mut(comment.as_str())
            .ok_or_else(|| CommentSurfaceError::CommentNotFound(comment.clone()))?;
        *slot = body.to_owned();
        state.edits += 1;
        Ok(())
    }
}
