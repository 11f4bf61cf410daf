//! Error types for reply-command domain validation.

use thiserror::Error;

use super::{EntryId, Status};

/// Errors returned while constructing domain reply values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReplyDomainError {
    /// The repository name does not follow `owner/repo` format.
    #[error("invalid repository name '{0}', expected owner/repo")]
    InvalidRepository(String),

    /// The pull request number is invalid.
    #[error("invalid pull request number {0}, expected a positive integer")]
    InvalidPullRequestNumber(u64),

    /// The comment reference is empty after trimming.
    #[error("comment reference must not be empty")]
    EmptyCommentRef,

    /// The build project reference is empty after trimming.
    #[error("project reference must not be empty")]
    EmptyProjectRef,

    /// The external job identifier is empty after trimming.
    #[error("job identifier must not be empty")]
    EmptyJobId,

    /// The external job handle is empty after trimming.
    #[error("job handle must not be empty")]
    EmptyJobHandle,

    /// The image tag is empty after trimming.
    #[error("image tag must not be empty")]
    EmptyImageTag,

    /// The image digest does not carry a `sha256:` prefix.
    #[error("invalid image digest '{0}', expected sha256:<hex>")]
    InvalidImageDigest(String),
}

/// Error raised by the generic payload validation layer.
///
/// Signals store corruption or schema drift: the persisted bytes no longer
/// deserialize into the shape the command declared.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid {subject} payload: {reason}")]
pub struct ValidationError {
    /// The payload being validated (command kind or argument set).
    pub subject: String,
    /// Deserialization failure detail.
    pub reason: String,
}

impl ValidationError {
    /// Creates a validation error for the named subject.
    #[must_use]
    pub fn new(subject: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            reason: reason.into(),
        }
    }
}

/// Invariant violations on the [`super::EntryRecord`] envelope.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EntryRecordError {
    /// A comment reference was already attached to the record.
    #[error("entry {0} already has a comment attached")]
    CommentAlreadyAttached(EntryId),

    /// A terminal rendered status would be overwritten with a different one.
    #[error("entry {id} rendered status is terminal ({from:?}) and cannot become {to:?}")]
    TerminalStatusChange {
        /// Entry whose status was already terminal.
        id: EntryId,
        /// The terminal status previously rendered.
        from: Status,
        /// The rejected replacement status.
        to: Status,
    },
}
