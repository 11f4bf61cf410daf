//! The command definition contract.
//!
//! One [`ReplyCommand`] implementation exists per supported command. The
//! contract splits a command's lifecycle into three operations: `launch`
//! starts the external job, `reconcile` advances it toward a terminal state,
//! and `render` turns the current entry and values into a comment. The
//! dispatcher and reconciler own persistence and posting; command code only
//! computes.

use crate::config::JobProjects;
use crate::reply::domain::{
    EntryId, ImageTag, JobId, RenderedComment, ReplyDomainError, SharedEntry, Status, ThreadRef,
    ValidationError, Values,
};
use crate::reply::ports::{BuildJobClient, ImageRegistry, ImageRegistryError, JobClientError};
use crate::reply::registry::CommandKind;
use crate::reply::validation;
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Broad classification of a command failure, per the propagation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A referenced upstream resource does not exist; fatal to this
    /// invocation and reported as a user-visible failure comment.
    Precondition,
    /// The external system returned a malformed or missing record; fatal,
    /// logged, never downgraded to `undone`.
    Integration,
    /// Persisted data failed schema validation; reconciliation for the entry
    /// halts rather than guessing defaults.
    Validation,
}

/// Errors produced by command definitions.
#[derive(Debug, Clone, Error)]
pub enum CommandError {
    /// An image tag could not be resolved to a digest.
    #[error("image tag '{0}' could not be resolved to a digest")]
    UnresolvedImage(ImageTag),

    /// The job service returned no record for a job this entry references.
    #[error("no job record returned for job '{0}'")]
    MissingJobRecord(JobId),

    /// A job record lacks a field any well-formed record must carry.
    #[error("job '{job_id}' record is missing required field '{field}'")]
    IncompleteJobRecord {
        /// Job whose record is malformed.
        job_id: JobId,
        /// Name of the absent field.
        field: &'static str,
    },

    /// A finished job exported an output the command cannot interpret.
    #[error("job '{job_id}' output '{name}' is malformed: {reason}")]
    MalformedJobOutput {
        /// Job whose output is malformed.
        job_id: JobId,
        /// Name of the exported output.
        name: &'static str,
        /// Parse failure detail.
        reason: String,
    },

    /// The job client failed.
    #[error(transparent)]
    JobClient(#[from] JobClientError),

    /// The image registry failed.
    #[error(transparent)]
    ImageRegistry(#[from] ImageRegistryError),

    /// Persisted or argument data failed schema validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An argument value failed domain validation.
    #[error(transparent)]
    Domain(#[from] ReplyDomainError),
}

impl CommandError {
    /// Classifies the error for the propagation policy.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::UnresolvedImage(_) => ErrorCategory::Precondition,
            Self::MissingJobRecord(_)
            | Self::IncompleteJobRecord { .. }
            | Self::MalformedJobOutput { .. }
            | Self::JobClient(_)
            | Self::ImageRegistry(_) => ErrorCategory::Integration,
            Self::Validation(_) | Self::Domain(_) => ErrorCategory::Validation,
        }
    }
}

/// Result of a `launch` or `reconcile` call: the status to render, the entry
/// to persist, and the transient values for this render cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput<E> {
    /// Status the caller should render and record.
    pub status: Status,
    /// Entry to persist (unchanged identity; supplementary fields may have
    /// been appended).
    pub entry: E,
    /// Presentation state for this cycle only.
    pub values: Values,
}

/// Execution context handed to command operations.
///
/// Collaborator handles are acquired per invocation and released with it; no
/// command holds a client across calls.
#[derive(Clone)]
pub struct CommandContext {
    /// Correlation identifier generated for (or loaded with) the entry.
    pub entry_id: EntryId,
    /// Conversation the command came from.
    pub thread: ThreadRef,
    /// External job service client.
    pub jobs: Arc<dyn BuildJobClient>,
    /// Image registry client.
    pub images: Arc<dyn ImageRegistry>,
    /// Build project references from configuration.
    pub projects: JobProjects,
}

/// A named, typed command definition.
#[async_trait]
pub trait ReplyCommand: Send + Sync {
    /// Shape of the persisted entry.
    type Entry: Serialize + DeserializeOwned + Send + Sync;
    /// Shape of the validated arguments.
    type Args: DeserializeOwned + Send;

    /// Returns the registry kind this definition implements.
    fn kind(&self) -> CommandKind;

    /// Validates a persisted payload against the declared entry shape.
    ///
    /// Called before every `reconcile` and render, guarding against store
    /// corruption and schema drift.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the payload does not deserialize.
    fn validate_entry(&self, raw: &Value) -> Result<Self::Entry, ValidationError> {
        validation::validate_payload(self.kind().as_str(), raw)
    }

    /// Launches the external job.
    ///
    /// Fails fast on missing preconditions; no retries happen here. On
    /// success the returned status is always [`Status::Undone`].
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] on precondition or integration failure.
    async fn launch(
        &self,
        ctx: &CommandContext,
        args: Self::Args,
        shared: &SharedEntry,
    ) -> Result<CommandOutput<Self::Entry>, CommandError>;

    /// Reconciles the entry against the external job's current state.
    ///
    /// Idempotent: repeated calls with unchanged external state return
    /// identical output. A malformed job record is a typed integration
    /// error, never a silent `undone`.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] on integration failure.
    async fn reconcile(
        &self,
        entry: &Self::Entry,
        ctx: &CommandContext,
    ) -> Result<CommandOutput<Self::Entry>, CommandError>;

    /// Renders the entry and values into a structured comment.
    ///
    /// Total: must tolerate any valid entry/values combination, including
    /// all-absent optional fields, and never panic.
    fn render(&self, entry: &Self::Entry, values: &Values) -> RenderedComment;
}
