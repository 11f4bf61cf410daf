//! In-memory build job client with scriptable job records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::config::JobSettings;
use crate::reply::domain::{JobHandle, JobId, ProjectRef};
use crate::reply::ports::{
    BuildJobClient, EnvOverride, JobClientError, JobClientResult, JobRecord, StartedJob,
};

#[derive(Debug, Default)]
struct ClientState {
    counter: u64,
    queries: u64,
    records: HashMap<JobId, JobRecord>,
    next_start_error: Option<JobClientError>,
}

/// Thread-safe in-memory job service.
///
/// Jobs start in `IN_PROGRESS`; tests advance them by rewriting their records
/// through [`InMemoryBuildJobClient::upsert_record`] or
/// [`InMemoryBuildJobClient::finish`]. Handles are fabricated from the
/// configured region and account, mirroring how a real client is constructed
/// from [`JobSettings`] rather than literals.
#[derive(Debug, Clone)]
pub struct InMemoryBuildJobClient {
    settings: JobSettings,
    state: Arc<RwLock<ClientState>>,
}

impl InMemoryBuildJobClient {
    /// Creates a client for the configured job service location.
    #[must_use]
    pub fn new(settings: JobSettings) -> Self {
        Self {
            settings,
            state: Arc::new(RwLock::new(ClientState::default())),
        }
    }

    fn lock_error(err: impl ToString) -> JobClientError {
        JobClientError::remote(std::io::Error::other(err.to_string()))
    }

    /// Scripts the next `start` call to fail with `error`.
    ///
    /// # Errors
    ///
    /// Returns [`JobClientError`] when the lock is poisoned.
    pub fn fail_next_start(&self, error: JobClientError) -> JobClientResult<()> {
        let mut state = self.state.write().map_err(Self::lock_error)?;
        state.next_start_error = Some(error);
        Ok(())
    }

    /// Replaces (or inserts) the record the service reports for a job.
    ///
    /// # Errors
    ///
    /// Returns [`JobClientError`] when the lock is poisoned.
    pub fn upsert_record(&self, record: JobRecord) -> JobClientResult<()> {
        let mut state = self.state.write().map_err(Self::lock_error)?;
        state.records.insert(record.job_id.clone(), record);
        Ok(())
    }

    /// Marks a started job as finished with the given raw status.
    ///
    /// # Errors
    ///
    /// Returns [`JobClientError`] when the job was never started or the lock
    /// is poisoned.
    pub fn finish(
        &self,
        job_id: &JobId,
        status: impl Into<String>,
        finished_at: DateTime<Utc>,
        outputs: Vec<EnvOverride>,
    ) -> JobClientResult<()> {
        let mut state = self.state.write().map_err(Self::lock_error)?;
        let record = state
            .records
            .get_mut(job_id)
            .ok_or_else(|| Self::lock_error(format!("unknown job '{job_id}'")))?;
        record.status = status.into();
        record.finished_at = Some(finished_at);
        record.outputs = outputs;
        Ok(())
    }

    /// Returns how many `query` calls the client has served.
    ///
    /// # Errors
    ///
    /// Returns [`JobClientError`] when the lock is poisoned.
    pub fn query_count(&self) -> JobClientResult<u64> {
        let state = self.state.read().map_err(Self::lock_error)?;
        Ok(state.queries)
    }
}

#[async_trait]
impl BuildJobClient for InMemoryBuildJobClient {
    async fn start(
        &self,
        project: &ProjectRef,
        _env: &[EnvOverride],
    ) -> JobClientResult<StartedJob> {
        let mut state = self.state.write().map_err(Self::lock_error)?;
        if let Some(error) = state.next_start_error.take() {
            return Err(error);
        }

        state.counter += 1;
        let job_id =
            JobId::new(format!("{}:{}", project.as_str(), state.counter)).map_err(Self::lock_error)?;
        let job_handle = JobHandle::new(format!(
            "arn:aws:codebuild:{}:{}:build/{job_id}",
            self.settings.region, self.settings.account_id
        ))
        .map_err(Self::lock_error)?;
        let started_at = Utc::now();

        state.records.insert(
            job_id.clone(),
            JobRecord {
                job_id: job_id.clone(),
                status: "IN_PROGRESS".to_owned(),
                started_at: Some(started_at),
                finished_at: None,
                logs_link: None,
                outputs: Vec::new(),
            },
        );

        Ok(StartedJob {
            job_id,
            job_handle,
            status: "IN_PROGRESS".to_owned(),
            started_at,
        })
    }

    async fn query(&self, job_ids: &[JobId]) -> JobClientResult<Vec<JobRecord>> {
        let mut state = self.state.write().map_err(Self::lock_error)?;
        state.queries += 1;
        Ok(job_ids
            .iter()
            .filter_map(|id| state.records.get(id).cloned())
            .collect())
    }
}
