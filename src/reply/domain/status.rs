//! Command status state machine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tracked state of a command's external job.
///
/// `Success` and `Failure` are terminal; once rendered they never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Job in flight, or in a state the mapping table does not recognize.
    Undone,
    /// Job finished successfully.
    Success,
    /// Job finished unsuccessfully.
    Failure,
}

impl Status {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Undone => "undone",
            Self::Success => "success",
            Self::Failure => "failure",
        }
    }

    /// Returns `true` for `Success` and `Failure`.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Failure)
    }

    /// Maps an external job-service status string onto the state machine.
    ///
    /// Anything outside the known terminal values maps to [`Status::Undone`],
    /// so an unrecognized status keeps the entry polling instead of flapping
    /// the rendered comment.
    #[must_use]
    pub fn from_external(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "SUCCEEDED" => Self::Success,
            "FAILED" | "FAULT" | "TIMED_OUT" | "STOPPED" => Self::Failure,
            _ => Self::Undone,
        }
    }

    /// Returns `true` when a transition from `self` to `next` is permitted.
    ///
    /// `Undone` may move anywhere (including re-polling back to itself);
    /// terminal states only accept themselves.
    #[must_use]
    pub const fn accepts(self, next: Self) -> bool {
        match self {
            Self::Undone => true,
            Self::Success => matches!(next, Self::Success),
            Self::Failure => matches!(next, Self::Failure),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
