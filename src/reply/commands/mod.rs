//! Concrete command definitions.

mod build_image;
mod poll;
mod preview_env;

pub use build_image::{BuildImageArgs, BuildImageCommand, BuildImageEntry};
pub use preview_env::{PreviewEnvArgs, PreviewEnvCommand, PreviewEnvEntry};
