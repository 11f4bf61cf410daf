//! The `/preview` command: stand up a preview environment for the pull request.

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

/// Name of the exported environment URL output on a finished deploy job.
const PREVIEW_URL_OUTPUT: &str = "PREVIEW_URL";

/// Persisted entry for one `/preview` invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewEnvEntry {
    /// Identifier of the deploy job.
    pub job_id: JobId,
    /// Full reference locating the job on the service.
    pub job_handle: JobHandle,
    /// Project the job ran on.
    pub project: ProjectRef,
    /// Application image tag as requested.
    pub app_tag: ImageTag,
    /// Digest the application tag resolved to at launch.
    pub app_digest: ImageDigest,
    /// Worker image tag as requested.
    pub worker_tag: ImageTag,
    /// Digest the worker tag resolved to at launch.
    pub worker_digest: ImageDigest,
    /// Environment URL learned from the job's output once the deploy
    /// succeeded. Appended at most once.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
}

/// Arguments for `/preview`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PreviewEnvArgs {
    /// Application image tag, e.g. `web:pr-41`.
    pub app: String,
    /// Worker image tag, e.g. `worker:pr-41`.
    pub worker: String,
}

/// The `/preview` command definition.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreviewEnvCommand;

impl PreviewEnvCommand {
    /// Resolves a tag to a digest: sibling-command facts first, registry
    /// second. An unresolvable tag is a precondition failure for the whole
    /// launch.
    async fn resolve_digest(
        ctx: &CommandContext,
        shared: &SharedEntry,
        tag: &ImageTag,
    ) -> Result<ImageDigest, CommandError> {
        if let Some(digest) = shared.image_digest(tag) {
            return Ok(digest.clone());
        }
        ctx.images
            .resolve(tag)
            .await?
            .ok_or_else(|| CommandError::UnresolvedImage(tag.clone()))
    }
}

#[async_trait]
impl ReplyCommand for PreviewEnvCommand {
    type Entry = PreviewEnvEntry;
    type Args = PreviewEnvArgs;

    fn kind(&self) -> CommandKind {
        CommandKind::PreviewEnv
    }

    async fn launch(
        &self,
        ctx: &CommandContext,
        args: Self::Args,
        shared: &SharedEntry,
    ) -> Result<CommandOutput<Self::Entry>, CommandError> {
        let app_tag = ImageTag::new(args.app)?;
        let worker_tag = ImageTag::new(args.worker)?;
        let app_digest = Self::resolve_digest(ctx, shared, &app_tag).await?;
        let worker_digest = Self::resolve_digest(ctx, shared, &worker_tag).await?;

        let env = vec![
            EnvOverride::new("PR_NUMBER", ctx.thread.pull_request().to_string()),
            EnvOverride::new("APP_IMAGE_DIGEST", app_digest.as_str()),
            EnvOverride::new("WORKER_IMAGE_DIGEST", worker_digest.as_str()),
            EnvOverride::new("ENTRY_ID", ctx.entry_id.to_string()),
        ];
        let started = ctx.jobs.start(&ctx.projects.preview, &env).await?;

        let entry = PreviewEnvEntry {
            job_id: started.job_id,
            job_handle: started.job_handle,
            project: ctx.projects.preview.clone(),
            app_tag,
            app_digest,
            worker_tag,
            worker_digest,
            preview_url: None,
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
        if status == Status::Success && next.preview_url.is_none() {
            next.preview_url = poll::output_value(&record, PREVIEW_URL_OUTPUT).map(str::to_owned);
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
                "**/preview** — {}",
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
            .with_optional_line(
                entry
                    .preview_url
                    .as_ref()
                    .map(|url| format!("Preview: {url}")),
            )
            .with_hint(
                HintSection::new("Job")
                    .with_line(format!("Id: `{}`", entry.job_id))
                    .with_line(format!("Handle: `{}`", entry.job_handle))
                    .with_optional_line(values.logs_link().map(|link| format!("[Logs]({link})"))),
            )
            .with_hint(
                HintSection::new("Images")
                    .with_line(format!("`{}` → `{}`", entry.app_tag, entry.app_digest))
                    .with_line(format!("`{}` → `{}`", entry.worker_tag, entry.worker_digest)),
            )
    }
}
