//! In-memory adapters for every port, used by engine and integration tests.

mod comment_surface;
mod entry_store;
mod image_registry;
mod job_client;

pub use comment_surface::{PostedComment, RecordingCommentSurface};
pub use entry_store::InMemoryEntryStore;
pub use image_registry::InMemoryImageRegistry;
pub use job_client::InMemoryBuildJobClient;
