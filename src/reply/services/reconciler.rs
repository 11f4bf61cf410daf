//! Reconciler: advances one previously-dispatched command toward a terminal
//! state.

use crate::config::BotConfig;
use crate::reply::commands::{BuildImageCommand, PreviewEnvCommand};
use crate::reply::contract::{CommandContext, CommandError, ReplyCommand};
use crate::reply::domain::{EntryId, EntryRecord, EntryRecordError, Status, ThreadRef};
use crate::reply::ports::{
    BuildJobClient, CommentSurface, CommentSurfaceError, EntryStore, EntryStoreError, ImageRegistry,
};
use crate::reply::registry::CommandKind;
use crate::reply::validation;
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced by a reconciliation pass.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// No entry exists for the identifier: an orphaned comment, which is a
    /// configuration error rather than something to retry.
    #[error("no entry found for '{0}'")]
    EntryNotFound(EntryId),

    /// The entry was persisted but never had a comment attached.
    #[error("entry '{0}' has no comment attached")]
    MissingComment(EntryId),

    /// The pass outlived its budget and was abandoned before any store
    /// mutation.
    #[error("reconciliation of entry '{0}' timed out")]
    Timeout(EntryId),

    /// The command's `reconcile` or entry validation failed; the previously
    /// rendered comment is left untouched.
    #[error(transparent)]
    Command(#[from] CommandError),

    /// An envelope invariant was violated.
    #[error(transparent)]
    Record(#[from] EntryRecordError),

    /// The entry store failed.
    #[error(transparent)]
    Store(#[from] EntryStoreError),

    /// The comment surface failed.
    #[error(transparent)]
    Surface(#[from] CommentSurfaceError),
}

/// Result of a reconciliation pass, telling the scheduler what happened and
/// whether to keep polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The entry was already terminal before any external poll.
    Settled(Status),
    /// The comment was re-rendered for a first pass or a status change.
    Edited(Status),
    /// The status matched the last render; nothing was written.
    Unchanged(Status),
}

impl ReconcileOutcome {
    /// Returns the status the entry holds after the pass.
    #[must_use]
    pub const fn status(self) -> Status {
        match self {
            Self::Settled(status) | Self::Edited(status) | Self::Unchanged(status) => status,
        }
    }

    /// Returns `true` when no further reconciliation should be scheduled.
    #[must_use]
    pub const fn finished(self) -> bool {
        self.status().is_terminal()
    }
}

/// Entry reconciliation service.
#[derive(Clone)]
pub struct Reconciler<S, M, J, I>
where
    S: EntryStore,
    M: CommentSurface,
    J: BuildJobClient + 'static,
    I: ImageRegistry + 'static,
{
    store: Arc<S>,
    comments: Arc<M>,
    jobs: Arc<J>,
    images: Arc<I>,
    config: BotConfig,
}

impl<S, M, J, I> Reconciler<S, M, J, I>
where
    S: EntryStore,
    M: CommentSurface,
    J: BuildJobClient + 'static,
    I: ImageRegistry + 'static,
{
    /// Creates a reconciler over the given collaborators.
    #[must_use]
    pub const fn new(
        store: Arc<S>,
        comments: Arc<M>,
        jobs: Arc<J>,
        images: Arc<I>,
        config: BotConfig,
    ) -> Self {
        Self {
            store,
            comments,
            jobs,
            images,
            config,
        }
    }

    fn context(&self, entry_id: EntryId, thread: ThreadRef) -> CommandContext {
        CommandContext {
            entry_id,
            thread,
            jobs: self.jobs.clone(),
            images: self.images.clone(),
            projects: self.config.projects.clone(),
        }
    }

    /// Runs one reconciliation pass for the entry.
    ///
    /// A terminal last-rendered status short-circuits before any external
    /// poll. The external read runs under the configured timeout; a pass
    /// that outlives it is abandoned with no store mutation. The comment is
    /// edited on the first reconciliation and whenever the status changed;
    /// the rendered status is persisted only after a successful edit, so a
    /// failed edit is retried by a later pass. Update failures propagate and
    /// leave the previous render untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError`] on store miss, validation failure, command
    /// failure, timeout, or collaborator failure.
    pub async fn reconcile(&self, id: EntryId) -> Result<ReconcileOutcome, ReconcileError> {
        let record = self
            .store
            .get(id)
            .await?
            .ok_or(ReconcileError::EntryNotFound(id))?;

        if let Some(status) = record.last_rendered()
            && status.is_terminal()
        {
            tracing::debug!(entry = %id, status = %status, "entry already settled");
            return Ok(ReconcileOutcome::Settled(status));
        }

        match record.command() {
            CommandKind::BuildImage => self.run(&BuildImageCommand, record).await,
            CommandKind::PreviewEnv => self.run(&PreviewEnvCommand, record).await,
        }
    }

    async fn run<D: ReplyCommand>(
        &self,
        command: &D,
        mut record: EntryRecord,
    ) -> Result<ReconcileOutcome, ReconcileError> {
        let kind = command.kind();
        let entry = command
            .validate_entry(record.payload())
            .map_err(CommandError::from)?;
        let ctx = self.context(record.id(), record.thread().clone());

        let reconciled = tokio::time::timeout(
            self.config.reconcile_timeout(),
            command.reconcile(&entry, &ctx),
        )
        .await
        .map_err(|_elapsed| ReconcileError::Timeout(record.id()))?;
        let output = reconciled.map_err(|err| {
            tracing::error!(
                entry = %record.id(),
                command = %kind,
                category = ?err.category(),
                error = %err,
                "reconciliation failed; leaving comment untouched"
            );
            err
        })?;

        let first_pass = !record.reconciled();
        if !first_pass && record.last_rendered() == Some(output.status) {
            return Ok(ReconcileOutcome::Unchanged(output.status));
        }

        let comment_ref = record
            .comment_ref()
            .cloned()
            .ok_or(ReconcileError::MissingComment(record.id()))?;
        let payload =
            validation::serialize_payload(kind.as_str(), &output.entry).map_err(CommandError::from)?;
        record.set_payload(payload);
        record.mark_reconciled();
        self.store.put(&record).await?;

        let body = command.render(&output.entry, &output.values).to_markdown();
        self.comments.edit(&comment_ref, &body).await?;

        // The rendered status advances only once the edit has landed; a
        // failed edit keeps the previous status so a later pass retries the
        // render instead of settling on a stale comment.
        record.mark_rendered(output.status)?;
        self.store.put(&record).await?;

        tracing::info!(
            entry = %record.id(),
            command = %kind,
            status = %output.status,
            "comment re-rendered"
        );
        Ok(ReconcileOutcome::Edited(output.status))
    }
}
