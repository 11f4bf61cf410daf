//! Transient presentation state recomputed on every render cycle.
//!
//! [`Values`] deliberately does not implement `Serialize`: it is owned by a
//! single render pass and must never be persisted, so stale presentation data
//! cannot survive a change in what the external job reports.

use super::Status;
use chrono::{DateTime, Utc};

/// Human-readable elapsed-time summary of a successfully finished job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltInfo {
    elapsed: String,
}

impl BuiltInfo {
    /// Computes the elapsed summary from job start and end timestamps.
    ///
    /// An end before the start clamps to zero seconds rather than producing
    /// a negative summary.
    #[must_use]
    pub fn from_bounds(started_at: DateTime<Utc>, finished_at: DateTime<Utc>) -> Self {
        let total_seconds = (finished_at - started_at).num_seconds().max(0);
        Self {
            elapsed: format_elapsed(total_seconds),
        }
    }

    /// Returns the elapsed summary, e.g. `"4m 12s"`.
    #[must_use]
    pub fn elapsed(&self) -> &str {
        &self.elapsed
    }
}

/// Formats whole seconds as `Xh Ym Zs`, omitting leading zero units.
fn format_elapsed(total_seconds: i64) -> String {
    let hours = total_seconds.div_euclid(3600);
    let minutes = total_seconds.rem_euclid(3600).div_euclid(60);
    let seconds = total_seconds.rem_euclid(60);
    if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

/// Per-render presentation state derived from the current job record.
///
/// Timestamps come from the job record itself, never from a wall clock, so
/// reconciling an unchanged job yields identical values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Values {
    status: Status,
    changed_at: DateTime<Utc>,
    logs_link: Option<String>,
    built_info: Option<BuiltInfo>,
}

impl Values {
    /// Creates values for a job that has not reached a terminal state.
    #[must_use]
    pub const fn in_flight(changed_at: DateTime<Utc>, logs_link: Option<String>) -> Self {
        Self {
            status: Status::Undone,
            changed_at,
            logs_link,
            built_info: None,
        }
    }

    /// Creates values for a terminally finished job.
    #[must_use]
    pub const fn terminal(
        status: Status,
        changed_at: DateTime<Utc>,
        logs_link: Option<String>,
        built_info: Option<BuiltInfo>,
    ) -> Self {
        Self {
            status,
            changed_at,
            logs_link,
            built_info,
        }
    }

    /// Returns the status these values were rendered for.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Returns the timestamp the status last changed.
    #[must_use]
    pub const fn changed_at(&self) -> DateTime<Utc> {
        self.changed_at
    }

    /// Returns the deep link to the job's logs, when the service reported one.
    #[must_use]
    pub fn logs_link(&self) -> Option<&str> {
        self.logs_link.as_deref()
    }

    /// Returns the elapsed-time summary, populated only on success.
    #[must_use]
    pub const fn built_info(&self) -> Option<&BuiltInfo> {
        self.built_info.as_ref()
    }
}
