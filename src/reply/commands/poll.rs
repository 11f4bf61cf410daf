//! Shared job-record reconciliation logic.
//!
//! Both commands track their job the same way: find the record, insist on
//! the fields any well-formed record carries, map the raw status onto the
//! state machine, and derive presentation values from the record's own
//! timestamps so repeated polls of an unchanged job are bit-for-bit
//! identical.

use crate::reply::contract::CommandError;
use crate::reply::domain::{BuiltInfo, JobId, Status, Values};
use crate::reply::ports::JobRecord;

/// Extracts the record for `job_id` from a query reply.
///
/// # Errors
///
/// Returns [`CommandError::MissingJobRecord`] when the service returned no
/// record for the job this entry references.
pub(crate) fn find_record(
    records: Vec<JobRecord>,
    job_id: &JobId,
) -> Result<JobRecord, CommandError> {
    records
        .into_iter()
        .find(|record| record.job_id == *job_id)
        .ok_or_else(|| CommandError::MissingJobRecord(job_id.clone()))
}

/// Maps a job record onto a status and this cycle's values.
///
/// A record without a start time is malformed regardless of status. A
/// terminal record additionally requires an end time. Unrecognized status
/// strings map to [`Status::Undone`] and keep the entry polling.
///
/// # Errors
///
/// Returns [`CommandError::IncompleteJobRecord`] when a required timestamp
/// is absent.
pub(crate) fn reconcile_record(record: &JobRecord) -> Result<(Status, Values), CommandError> {
    let started_at = record
        .started_at
        .ok_or_else(|| CommandError::IncompleteJobRecord {
            job_id: record.job_id.clone(),
            field: "started_at",
        })?;

    let status = Status::from_external(&record.status);
    if !status.is_terminal() {
        return Ok((
            status,
            Values::in_flight(started_at, record.logs_link.clone()),
        ));
    }

    let finished_at = record
        .finished_at
        .ok_or_else(|| CommandError::IncompleteJobRecord {
            job_id: record.job_id.clone(),
            field: "finished_at",
        })?;

    let built_info =
        (status == Status::Success).then(|| BuiltInfo::from_bounds(started_at, finished_at));
    Ok((
        status,
        Values::terminal(status, finished_at, record.logs_link.clone(), built_info),
    ))
}

/// Returns the value a finished job exported under `name`, if any.
pub(crate) fn output_value<'a>(record: &'a JobRecord, name: &str) -> Option<&'a str> {
    record
        .outputs
        .iter()
        .find(|output| output.name == name)
        .map(|output| output.value.as_str())
}

/// Human label for a status in rendered comments.
pub(crate) const fn status_label(status: Status) -> &'static str {
    match status {
        Status::Undone => "in progress",
        Status::Success => "succeeded",
        Status::Failure => "failed",
    }
}
