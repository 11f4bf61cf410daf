//! Closed registry of command kinds.
//!
//! Command dispatch is a closed tagged variant rather than a string-keyed
//! map: every supported command is enumerated here, and lookup of an unknown
//! name is a typed error instead of a panic.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error returned when a comment names a command the registry does not carry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unsupported command '/{0}'")]
pub struct UnknownCommandError(pub String);

/// Enumerated set of supported reply commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    /// `/build`: build a container image for the pull request.
    BuildImage,
    /// `/preview`: stand up a preview environment for the pull request.
    PreviewEnv,
}

impl CommandKind {
    /// Returns the name as typed in PR comments, without the leading slash.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BuildImage => "build",
            Self::PreviewEnv => "preview",
        }
    }
}

impl TryFrom<&str> for CommandKind {
    type Error = UnknownCommandError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "build" => Ok(Self::BuildImage),
            "preview" => Ok(Self::PreviewEnv),
            _ => Err(UnknownCommandError(value.to_owned())),
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
