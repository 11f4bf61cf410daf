//! Persistence envelope for command entries.

use super::{CommentRef, EntryId, EntryRecordError, ImageDigest, ImageTag, Status, ThreadRef};
use crate::reply::registry::CommandKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Envelope persisted in the entry store, keyed by [`EntryId`].
///
/// Identity fields (`id`, `command`, `thread`, `payload` job identity,
/// `created_at`) never change after creation. The envelope itself admits a
/// few controlled mutations: the comment reference learned after the first
/// post is attached exactly once, the last-rendered status only advances
/// along the [`Status`] state machine, and the reconciled flag is set once
/// the first reconciliation pass has run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRecord {
    id: EntryId,
    command: CommandKind,
    thread: ThreadRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    comment_ref: Option<CommentRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_rendered: Option<Status>,
    #[serde(default)]
    reconciled: bool,
    payload: Value,
    created_at: DateTime<Utc>,
}

impl EntryRecord {
    /// Creates a fresh envelope around a command's serialized entry.
    #[must_use]
    pub const fn new(
        id: EntryId,
        command: CommandKind,
        thread: ThreadRef,
        payload: Value,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            command,
            thread,
            comment_ref: None,
            last_rendered: None,
            reconciled: false,
            payload,
            created_at,
        }
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> EntryId {
        self.id
    }

    /// Returns the command kind that owns the payload.
    #[must_use]
    pub const fn command(&self) -> CommandKind {
        self.command
    }

    /// Returns the originating conversation reference.
    #[must_use]
    pub const fn thread(&self) -> &ThreadRef {
        &self.thread
    }

    /// Returns the attached comment reference, if the post already happened.
    #[must_use]
    pub const fn comment_ref(&self) -> Option<&CommentRef> {
        self.comment_ref.as_ref()
    }

    /// Returns the status most recently rendered into the comment.
    #[must_use]
    pub const fn last_rendered(&self) -> Option<Status> {
        self.last_rendered
    }

    /// Returns `true` once a reconciliation pass has run for the entry.
    ///
    /// The dispatcher's initial render does not count: the first
    /// reconciliation re-renders the comment even when the status has not
    /// moved, so facts learned from the first poll reach the thread.
    #[must_use]
    pub const fn reconciled(&self) -> bool {
        self.reconciled
    }

    /// Returns the command-specific entry payload.
    #[must_use]
    pub const fn payload(&self) -> &Value {
        &self.payload
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Attaches the comment reference learned from the first post.
    ///
    /// # Errors
    ///
    /// Returns [`EntryRecordError::CommentAlreadyAttached`] when a reference
    /// is already present; the association is append-once.
    pub fn attach_comment(&mut self, comment_ref: CommentRef) -> Result<(), EntryRecordError> {
        if self.comment_ref.is_some() {
            return Err(EntryRecordError::CommentAlreadyAttached(self.id));
        }
        self.comment_ref = Some(comment_ref);
        Ok(())
    }

    /// Records the status that was just rendered into the comment.
    ///
    /// # Errors
    ///
    /// Returns [`EntryRecordError::TerminalStatusChange`] when the previously
    /// rendered status is terminal and `status` differs from it.
    pub fn mark_rendered(&mut self, status: Status) -> Result<(), EntryRecordError> {
        if let Some(previous) = self.last_rendered
            && !previous.accepts(status)
        {
            return Err(EntryRecordError::TerminalStatusChange {
                id: self.id,
                from: previous,
                to: status,
            });
        }
        self.last_rendered = Some(status);
        Ok(())
    }

    /// Marks that a reconciliation pass has run for the entry.
    pub const fn mark_reconciled(&mut self) {
        self.reconciled = true;
    }

    /// Replaces the entry payload with a reconciled version.
    ///
    /// Identity fields inside the payload are the owning command's contract;
    /// the envelope only carries the opaque value.
    pub fn set_payload(&mut self, payload: Value) {
        self.payload = payload;
    }
}

/// Cross-command correlation data offered to `launch`.
///
/// Carries facts a sibling command already established for the same thread,
/// such as image digests resolved by a prior `/build`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharedEntry {
    image_digests: BTreeMap<ImageTag, ImageDigest>,
}

impl SharedEntry {
    /// Creates an empty shared entry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            image_digests: BTreeMap::new(),
        }
    }

    /// Records a digest a sibling command resolved for `tag`.
    #[must_use]
    pub fn with_image_digest(mut self, tag: ImageTag, digest: ImageDigest) -> Self {
        self.image_digests.insert(tag, digest);
        self
    }

    /// Returns the digest a sibling command resolved for `tag`, if any.
    #[must_use]
    pub fn image_digest(&self, tag: &ImageTag) -> Option<&ImageDigest> {
        self.image_digests.get(tag)
    }
}
