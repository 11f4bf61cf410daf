//! The `/build` command: build a pull request container image.

use super::poll;
use crate::reply::contract::{CommandContext, CommandError, CommandOutput, ReplyCommand};
use crate::reply::domain::{
    HintSection, ImageDigest, ImageTag, JobHandle, JobId, ProjectRef, RenderedComment, SharedEntry,
    Status, Values,
};
use crate::reply::ports::EnvOverride;
use crate::reply::registry::CommandKind;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Name of the exported digest output on a finished build job.
const DIGEST_OUTPUT: &str = "IMAGE_DIGEST";

/// Persisted entry for one `/build` invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildImageEntry {
    /// Identifier of the build job.
    pub job_id: JobId,
    /// Full reference locating the job on the service.
    pub job_handle: JobHandle,
    /// Project the job ran on.
    pub project: ProjectRef,
    /// Tag the image will be pushed under.
    pub image_tag: ImageTag,
    /// Digest learned from the job's output once the build succeeded.
    /// Appended at most once.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_digest: Option<ImageDigest>,
}

/// Arguments for `/build`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildImageArgs {
    /// Tag to build and push, e.g. `web:pr-41`.
    pub tag: String,
}

/// The `/build` command definition.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildImageCommand;

#[async_trait]
impl ReplyCommand for BuildImageCommand {
    type Entry = BuildImageEntry;
    type Args = BuildImageArgs;

    fn kind(&self) -> CommandKind {
        CommandKind::BuildImage
    }

    async fn launch(
        &self,
        ctx: &CommandContext,
        args: Self::Args,
        _shared: &SharedEntry,
    ) -> Result<CommandOutput<Self::Entry>, CommandError> {
        let image_tag = ImageTag::new(args.tag)?;
        let env = vec![
            EnvOverride::new("PR_NUMBER", ctx.thread.pull_request().to_string()),
            EnvOverride::new("IMAGE_TAG", image_tag.as_str()),
            EnvOverride::new("ENTRY_ID", ctx.entry_id.to_string()),
        ];
        let started = ctx.jobs.start(&ctx.projects.build, &env).await?;

        let entry = BuildImageEntry {
            job_id: started.job_id,
            job_handle: started.job_handle,
            project: ctx.projects.build.clone(),
            image_tag,
            image_digest: None,
        };
        let values = Values::in_flight(started.started_at, None);
        Ok(CommandOutput {
            status: Status::Undone,
            entry,
            values,
        })
    }

    async fn reconcile(
        &self,
        entry: &Self::Entry,
        ctx: &CommandContext,
    ) -> Result<CommandOutput<Self::Entry>, CommandError> {
        let records = ctx.jobs.query(std::slice::from_ref(&entry.job_id)).await?;
        let record = poll::find_record(records, &entry.job_id)?;
        let (status, values) = poll::reconcile_record(&record)?;

        let mut next = entry.clone();
        if status == Status::Success && next.image_digest.is_none() {
            next.image_digest = poll::output_value(&record, DIGEST_OUTPUT)
                .map(|raw| {
                    ImageDigest::new(raw).map_err(|err| CommandError::MalformedJobOutput {
                        job_id: next.job_id.clone(),
                        name: DIGEST_OUTPUT,
                        reason: err.to_string(),
                    })
                })
                .transpose()?;
        }

        Ok(CommandOutput {
            status,
            entry: next,
            values,
        })
    }

    fn render(&self, entry: &Self::Entry, values: &Values) -> RenderedComment {
        RenderedComment::new()
            .with_line(format!(
                "**/build** — {}",
                poll::status_label(values.status())
            ))
            .with_line(format!(
                "_Status changed: {}_",
                values.changed_at().to_rfc3339()
            ))
            .with_optional_line(
                values
                    .built_info()
                    .map(|info| format!("Built in {}", info.elapsed())),
            )
            .with_hint(
                HintSection::new("Job")
                    .with_line(format!("Id: `{}`", entry.job_id))
                    .with_line(format!("Handle: `{}`", entry.job_handle))
                    .with_optional_line(values.logs_link().map(|link| format!("[Logs]({link})"))),
            )
            .with_hint(
                HintSection::new("Images").with_optional_line(
                    entry
                        .image_digest
                        .as_ref()
                        .map(|digest| format!("`{}` → `{digest}`", entry.image_tag)),
                ),
            )
    }
}
