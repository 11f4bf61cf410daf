//! Port contracts for the reply-command engine's collaborators.

pub mod comment_surface;
pub mod entry_store;
pub mod image_registry;
pub mod job_client;

pub use comment_surface::{CommentSurface, CommentSurfaceError, CommentSurfaceResult};
pub use entry_store::{EntryStore, EntryStoreError, EntryStoreResult};
pub use image_registry::{ImageRegistry, ImageRegistryError, ImageRegistryResult};
pub use job_client::{
    BuildJobClient, EnvOverride, JobClientError, JobClientResult, JobRecord, StartedJob,
};
