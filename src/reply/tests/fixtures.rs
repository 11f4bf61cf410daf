//! Shared fixtures for engine tests.

#![expect(
    clippy::expect_used,
    reason = "Test fixtures use expect for assertion clarity"
)]

use std::sync::Arc;

use mockable::DefaultClock;

use crate::config::{BotConfig, JobProjects, JobSettings};
use crate::reply::adapters::memory::{
    InMemoryBuildJobClient, InMemoryEntryStore, InMemoryImageRegistry, RecordingCommentSurface,
};
use crate::reply::contract::CommandContext;
use crate::reply::domain::{EntryId, ProjectRef, ThreadRef};
use crate::reply::services::{Dispatcher, Reconciler};

pub(crate) type TestDispatcher = Dispatcher<
    InMemoryEntryStore,
    RecordingCommentSurface,
    InMemoryBuildJobClient,
    InMemoryImageRegistry,
    DefaultClock,
>;

pub(crate) type TestReconciler = Reconciler<
    InMemoryEntryStore,
    RecordingCommentSurface,
    InMemoryBuildJobClient,
    InMemoryImageRegistry,
>;

/// A fully wired engine over the in-memory adapters.
pub(crate) struct Engine {
    pub store: Arc<InMemoryEntryStore>,
    pub comments: Arc<RecordingCommentSurface>,
    pub jobs: Arc<InMemoryBuildJobClient>,
    pub images: Arc<InMemoryImageRegistry>,
    pub dispatcher: TestDispatcher,
    pub reconciler: TestReconciler,
}

pub(crate) fn bot_config() -> BotConfig {
    BotConfig {
        jobs: JobSettings {
            region: "eu-west-1".to_owned(),
            account_id: "123456789012".to_owned(),
        },
        projects: JobProjects {
            build: ProjectRef::new("pr-image-build").expect("valid project ref"),
            preview: ProjectRef::new("pr-preview-deploy").expect("valid project ref"),
        },
        reconcile_timeout_secs: 5,
    }
}

pub(crate) fn thread() -> ThreadRef {
    ThreadRef::from_parts("acme/storefront", 41).expect("valid thread ref")
}

pub(crate) fn engine() -> Engine {
    let config = bot_config();
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
        images,
        dispatcher,
        reconciler,
    }
}

pub(crate) fn command_context(
    jobs: &Arc<InMemoryBuildJobClient>,
    images: &Arc<InMemoryImageRegistry>,
) -> CommandContext {
    CommandContext {
        entry_id: EntryId::new(),
        thread: thread(),
        jobs: Arc::clone(jobs) as _,
        images: Arc::clone(images) as _,
        projects: bot_config().projects,
    }
}
