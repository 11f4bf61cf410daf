//! Domain model for the reply-command engine.
//!
//! Pure types with no infrastructure dependencies: validated identifiers,
//! the three-state job status machine, the persisted entry envelope, the
//! transient per-render values, the structured comment model, and the
//! comment command-line parser.

mod comment;
mod error;
mod ids;
mod invocation;
mod record;
mod status;
mod values;

pub use comment::{HintSection, RenderedComment};
pub use error::{EntryRecordError, ReplyDomainError, ValidationError};
pub use ids::{
    CommentRef, EntryId, ImageDigest, ImageTag, JobHandle, JobId, ProjectRef, PullRequestNumber,
    RepositoryFullName, ThreadRef,
};
pub use invocation::{CommandInvocation, InvocationError};
pub use record::{EntryRecord, SharedEntry};
pub use status::Status;
pub use values::{BuiltInfo, Values};
