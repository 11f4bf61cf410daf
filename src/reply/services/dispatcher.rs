//! Dispatcher: bridges one inbound command invocation to a persisted entry
//! and a posted comment.

use crate::config::BotConfig;
use crate::reply::commands::{BuildImageCommand, PreviewEnvCommand};
use crate::reply::contract::{CommandContext, CommandError, ReplyCommand};
use crate::reply::domain::{
    CommandInvocation, CommentRef, EntryId, EntryRecord, EntryRecordError, InvocationError,
    RenderedComment, SharedEntry, Status, ThreadRef, ValidationError,
};
use crate::reply::ports::{
    BuildJobClient, CommentSurface, CommentSurfaceError, EntryStore, EntryStoreError, ImageRegistry,
};
use crate::reply::registry::{CommandKind, UnknownCommandError};
use crate::reply::validation;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced by a dispatch attempt.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The comment line could not be parsed as a command.
    #[error(transparent)]
    Invocation(#[from] InvocationError),

    /// The command name is not in the registry.
    #[error(transparent)]
    UnknownCommand(#[from] UnknownCommandError),

    /// The arguments failed schema validation.
    #[error(transparent)]
    Arguments(ValidationError),

    /// The command's `launch` failed; a failure comment was posted.
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

/// Summary of a successful dispatch, for the transport glue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReceipt {
    /// Identifier the entry was persisted under.
    pub entry_id: EntryId,
    /// Reference of the posted comment.
    pub comment_ref: CommentRef,
    /// Status rendered into the comment (always `Undone` at dispatch).
    pub status: Status,
}

/// Command dispatch service.
#[derive(Clone)]
pub struct Dispatcher<S, M, J, I, C>
where
    S: EntryStore,
    M: CommentSurface,
    J: BuildJobClient + 'static,
    I: ImageRegistry + 'static,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    comments: Arc<M>,
    jobs: Arc<J>,
    images: Arc<I>,
    clock: Arc<C>,
    config: BotConfig,
}

impl<S, M, J, I, C> Dispatcher<S, M, J, I, C>
where
    S: EntryStore,
    M: CommentSurface,
    J: BuildJobClient + 'static,
    I: ImageRegistry + 'static,
    C: Clock + Send + Sync,
{
    /// Creates a dispatcher over the given collaborators.
    #[must_use]
    pub const fn new(
        store: Arc<S>,
        comments: Arc<M>,
        jobs: Arc<J>,
        images: Arc<I>,
        clock: Arc<C>,
        config: BotConfig,
    ) -> Self {
        Self {
            store,
            comments,
            jobs,
            images,
            clock,
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

    /// Dispatches the command line of a PR comment.
    ///
    /// Parsing, registry lookup, and argument validation all happen before
    /// any command definition runs. On `launch` success the entry is
    /// persisted before the comment is posted, so a crash between the two
    /// can never leave an unreferenceable entry. On `launch` failure nothing
    /// is persisted and a failure comment is posted instead.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError`] on any failure; command failures are also
    /// reflected as a posted failure comment.
    pub async fn dispatch(
        &self,
        thread: &ThreadRef,
        comment_line: &str,
        shared: &SharedEntry,
    ) -> Result<DispatchReceipt, DispatchError> {
        let invocation = CommandInvocation::parse(comment_line)?;
        let kind = CommandKind::try_from(invocation.command())?;
        match kind {
            CommandKind::BuildImage => {
                self.run(&BuildImageCommand, thread, &invocation, shared)
                    .await
            }
            CommandKind::PreviewEnv => {
                self.run(&PreviewEnvCommand, thread, &invocation, shared)
                    .await
            }
        }
    }

    async fn run<D: ReplyCommand>(
        &self,
        command: &D,
        thread: &ThreadRef,
        invocation: &CommandInvocation,
        shared: &SharedEntry,
    ) -> Result<DispatchReceipt, DispatchError> {
        let kind = command.kind();
        let args: D::Args = validation::validate_args(kind.as_str(), invocation.arguments())
            .map_err(DispatchError::Arguments)?;
        let ctx = self.context(EntryId::new(), thread.clone());

        let output = match command.launch(&ctx, args, shared).await {
            Ok(output) => output,
            Err(err) => {
                tracing::warn!(
                    command = %kind,
                    thread = %thread,
                    category = ?err.category(),
                    error = %err,
                    "command launch failed"
                );
                let body = RenderedComment::failure(kind.as_str(), &err.to_string()).to_markdown();
                self.comments.post(thread, &body).await?;
                return Err(DispatchError::Command(err));
            }
        };

        let payload = validation::serialize_payload(kind.as_str(), &output.entry)
            .map_err(CommandError::from)?;
        let mut record = EntryRecord::new(
            ctx.entry_id,
            kind,
            thread.clone(),
            payload,
            self.clock.utc(),
        );
        self.store.put(&record).await?;

        let body = command.render(&output.entry, &output.values).to_markdown();
        let comment_ref = self.comments.post(thread, &body).await?;
        record.attach_comment(comment_ref.clone())?;
        record.mark_rendered(output.status)?;
        self.store.put(&record).await?;

        tracing::info!(
            entry = %record.id(),
            command = %kind,
            thread = %thread,
            comment = %comment_ref,
            "command dispatched"
        );
        Ok(DispatchReceipt {
            entry_id: record.id(),
            comment_ref,
            status: output.status,
        })
    }
}
