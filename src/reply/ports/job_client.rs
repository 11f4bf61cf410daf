//! External job client port: start and query asynchronous build jobs.

use crate::reply::domain::{JobHandle, JobId, ProjectRef};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for job client operations.
pub type JobClientResult<T> = Result<T, JobClientError>;

/// A named environment value passed into a job at start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvOverride {
    /// Variable name.
    pub name: String,
    /// Variable value.
    pub value: String,
}

impl EnvOverride {
    /// Creates an environment override.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Identity and initial state of a freshly started job.
///
/// Every field is required: an accepted start request whose response lacks
/// one of these is an [`JobClientError::IncompleteResponse`], raised by the
/// adapter rather than smoothed over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartedJob {
    /// Short job identifier used for later queries.
    pub job_id: JobId,
    /// Full reference string locating the job on the service.
    pub job_handle: JobHandle,
    /// Raw status string the service reported at start.
    pub status: String,
    /// Timestamp the service recorded for the start.
    pub started_at: DateTime<Utc>,
}

/// Current state of a previously started job, as the service reports it.
///
/// Optional fields stay optional here so command code can distinguish a
/// still-running job from a structurally broken record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRecord {
    /// Short job identifier.
    pub job_id: JobId,
    /// Raw status string.
    pub status: String,
    /// Start timestamp; required for any well-formed record.
    pub started_at: Option<DateTime<Utc>>,
    /// End timestamp; present once the job is terminal.
    pub finished_at: Option<DateTime<Utc>>,
    /// Deep link to the job's logs.
    pub logs_link: Option<String>,
    /// Name/value pairs the job exported on completion.
    pub outputs: Vec<EnvOverride>,
}

/// Capability to start an asynchronous build job and query its status.
#[async_trait]
pub trait BuildJobClient: Send + Sync {
    /// Starts a job on `project` with the given environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`JobClientError::IncompleteResponse`] when the service
    /// accepts the request but replies without a required field, or
    /// [`JobClientError::Remote`] on transport failure.
    async fn start(&self, project: &ProjectRef, env: &[EnvOverride])
    -> JobClientResult<StartedJob>;

    /// Queries the current records for the given job identifiers.
    ///
    /// The returned order follows the service's reply; callers match records
    /// by `job_id` rather than position.
    ///
    /// # Errors
    ///
    /// Returns [`JobClientError::Remote`] on transport failure.
    async fn query(&self, job_ids: &[JobId]) -> JobClientResult<Vec<JobRecord>>;
}

/// Errors returned by job client implementations.
#[derive(Debug, Clone, Error)]
pub enum JobClientError {
    /// The service accepted a start request but replied without a required
    /// field.
    #[error("job service response missing required field '{field}'")]
    IncompleteResponse {
        /// Name of the absent field.
        field: &'static str,
    },

    /// Transport or service failure.
    #[error("job service failure: {0}")]
    Remote(Arc<dyn std::error::Error + Send + Sync>),
}

impl JobClientError {
    /// Wraps a remote failure.
    pub fn remote(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Remote(Arc::new(err))
    }
}
