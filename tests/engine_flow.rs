//! End-to-end flow over the in-memory adapters: build an image, reconcile it
//! to success, then stand up a preview pinned to the built digest.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use std::sync::Arc;

use chrono::Utc;
use mockable::DefaultClock;

use replybot::config::BotConfig;
use replybot::reply::adapters::memory::{
    InMemoryBuildJobClient, InMemoryEntryStore, InMemoryImageRegistry, RecordingCommentSurface,
};
use replybot::reply::domain::{ImageDigest, ImageTag, JobId, SharedEntry, Status, ThreadRef};
use replybot::reply::ports::{EnvOverride, EntryStore};
use replybot::reply::services::{Dispatcher, ReconcileOutcome, Reconciler};

const CONFIG: &str = r#"
    reconcile_timeout_secs = 5

    [jobs]
    region = "eu-west-1"
    account_id = "123456789012"

    [projects]
    build = "pr-image-build"
    preview = "pr-preview-deploy"
"#;

struct Engine {
    store: Arc<InMemoryEntryStore>,
    comments: Arc<RecordingCommentSurface>,
    jobs: Arc<InMemoryBuildJobClient>,
    dispatcher: Dispatcher<
        InMemoryEntryStore,
        RecordingCommentSurface,
        InMemoryBuildJobClient,
        InMemoryImageRegistry,
        DefaultClock,
    >,
    reconciler: Reconciler<
        InMemoryEntryStore,
        RecordingCommentSurface,
        InMemoryBuildJobClient,
        InMemoryImageRegistry,
    >,
}

fn engine() -> Engine {
    let config = BotConfig::from_toml_str(CONFIG).expect("config parses");
    let store = Arc::new(InMemoryEntryStore::new());
    let comments = Arc::new(RecordingCommentSurface::new());
    let jobs = Arc::new(InMemoryBuildJobClient::new(config.jobs.clone()));
    let images = Arc::new(InMemoryImageRegistry::new());

    let dispatcher = Dispatcher::new(
        Arc::clone(&store),
        Arc::clone(&comments),
        Arc::clone(&jobs),
        Arc::clone(&images),
        Arc::new(DefaultClock),
        config.clone(),
    );
    let reconciler = Reconciler::new(
        Arc::clone(&store),
        Arc::clone(&comments),
        Arc::clone(&jobs),
        Arc::clone(&images),
        config,
    );

    Engine {
        store,
        comments,
        jobs,
        dispatcher,
        reconciler,
    }
}

fn thread() -> ThreadRef {
    ThreadRef::from_parts("acme/storefront", 41).expect("valid thread ref")
}

async fn job_id_of(store: &InMemoryEntryStore, id: replybot::reply::domain::EntryId) -> JobId {
    let record = store
        .get(id)
        .await
        .expect("store readable")
        .expect("entry persisted");
    serde_json::from_value(
        record
            .payload()
            .get("job_id")
            .cloned()
            .expect("payload carries job id"),
    )
    .expect("job id deserializes")
}

#[tokio::test(flavor = "multi_thread")]
async fn build_then_preview_pins_the_built_digest() {
    let engine = engine();

    // A PR author asks for an image build.
    let build = engine
        .dispatcher
        .dispatch(&thread(), "/build tag=web:pr-41", &SharedEntry::new())
        .await
        .expect("build dispatch succeeds");
    assert_eq!(build.status, Status::Undone);

    // Still running: the first pass re-renders with whatever the poll
    // learned, later passes with no movement leave the comment alone.
    let polled = engine
        .reconciler
        .reconcile(build.entry_id)
        .await
        .expect("reconcile succeeds");
    assert_eq!(polled, ReconcileOutcome::Edited(Status::Undone));
    let repolled = engine
        .reconciler
        .reconcile(build.entry_id)
        .await
        .expect("reconcile succeeds");
    assert_eq!(repolled, ReconcileOutcome::Unchanged(Status::Undone));

    // The build finishes and exports the pushed digest.
    let build_job = job_id_of(&engine.store, build.entry_id).await;
    let digest = ImageDigest::from_content(b"web:pr-41");
    engine
        .jobs
        .finish(
            &build_job,
            "SUCCEEDED",
            Utc::now(),
            vec![EnvOverride::new("IMAGE_DIGEST", digest.as_str())],
        )
        .expect("finish succeeds");

    let built = engine
        .reconciler
        .reconcile(build.entry_id)
        .await
        .expect("reconcile succeeds");
    assert_eq!(built, ReconcileOutcome::Edited(Status::Success));
    assert!(built.finished());

    let build_body = engine
        .comments
        .body_of(&build.comment_ref)
        .expect("surface readable")
        .expect("comment exists");
    assert!(build_body.contains("**/build** — succeeded"));
    assert!(build_body.contains(digest.as_str()));

    // The caller assembles sibling facts for the next command on the thread.
    let tag = ImageTag::new("web:pr-41").expect("valid tag");
    let shared = SharedEntry::new().with_image_digest(tag, digest.clone());
    engine
        .jobs
        .fail_next_start(replybot::reply::ports::JobClientError::remote(
            std::io::Error::other("deploy capacity exhausted"),
        ))
        .expect("script accepted");

    // A preview whose job cannot start posts a failure comment instead.
    let failed = engine
        .dispatcher
        .dispatch(&thread(), "/preview app=web:pr-41 worker=web:pr-41", &shared)
        .await;
    assert!(failed.is_err());
    let posted = engine.comments.posted().expect("surface readable");
    assert!(
        posted
            .last()
            .is_some_and(|comment| comment.body.contains("**/preview** — failed to start"))
    );

    // With the digest pinned from the build, the preview launches without
    // touching the registry.
    let preview = engine
        .dispatcher
        .dispatch(&thread(), "/preview app=web:pr-41 worker=web:pr-41", &shared)
        .await
        .expect("preview dispatch succeeds");

    let preview_job = job_id_of(&engine.store, preview.entry_id).await;
    engine
        .jobs
        .finish(
            &preview_job,
            "SUCCEEDED",
            Utc::now(),
            vec![EnvOverride::new(
                "PREVIEW_URL",
                "https://pr-41.preview.example",
            )],
        )
        .expect("finish succeeds");

    let deployed = engine
        .reconciler
        .reconcile(preview.entry_id)
        .await
        .expect("reconcile succeeds");
    assert_eq!(deployed, ReconcileOutcome::Edited(Status::Success));

    let preview_body = engine
        .comments
        .body_of(&preview.comment_ref)
        .expect("surface readable")
        .expect("comment exists");
    assert!(preview_body.contains("**/preview** — succeeded"));
    assert!(preview_body.contains("Preview: https://pr-41.preview.example"));
    assert!(preview_body.contains(digest.as_str()));

    // Terminal entries settle without another poll.
    let settled = engine
        .reconciler
        .reconcile(preview.entry_id)
        .await
        .expect("reconcile succeeds");
    assert_eq!(settled, ReconcileOutcome::Settled(Status::Success));
}
