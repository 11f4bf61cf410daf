//! Unit tests for comment rendering.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use chrono::{TimeZone, Utc};
use rstest::rstest;

use crate::reply::commands::{BuildImageCommand, BuildImageEntry, PreviewEnvCommand};
use crate::reply::contract::ReplyCommand;
use crate::reply::domain::{
    BuiltInfo, HintSection, ImageDigest, ImageTag, JobHandle, JobId, ProjectRef, RenderedComment,
    Status, Values,
};

#[rstest]
#[case(0, "0s")]
#[case(59, "59s")]
#[case(252, "4m 12s")]
#[case(3723, "1h 2m 3s")]
fn built_info_formats_elapsed_time(#[case] seconds: i64, #[case] expected: &str) {
    let start = Utc.timestamp_opt(1_700_000_000, 0).single().expect("valid");
    let end = start + chrono::Duration::seconds(seconds);
    assert_eq!(BuiltInfo::from_bounds(start, end).elapsed(), expected);
}

#[test]
fn built_info_clamps_negative_elapsed_to_zero() {
    let start = Utc.timestamp_opt(1_700_000_000, 0).single().expect("valid");
    let end = start - chrono::Duration::seconds(30);
    assert_eq!(BuiltInfo::from_bounds(start, end).elapsed(), "0s");
}

#[test]
fn absent_optional_lines_leave_no_trace() {
    let comment = RenderedComment::new()
        .with_line("status line")
        .with_optional_line(None::<String>)
        .with_hint(HintSection::new("Empty").with_optional_line(None::<String>));

    assert_eq!(comment.main(), ["status line"]);
    assert!(comment.hints().is_empty());
    assert!(!comment.to_markdown().contains("Empty"));
    assert!(!comment.to_markdown().contains("\n\n\n"));
}

#[test]
fn markdown_assembles_details_blocks_in_order() {
    let comment = RenderedComment::new()
        .with_line("first")
        .with_line("second")
        .with_hint(HintSection::new("Job").with_line("Id: `j-1`"))
        .with_hint(HintSection::new("Images").with_line("`a` → `sha256:ab`"));

    let markdown = comment.to_markdown();
    assert!(markdown.starts_with("first\nsecond"));
    let job = markdown
        .find("<details><summary>Job</summary>")
        .expect("job hint present");
    let images = markdown
        .find("<details><summary>Images</summary>")
        .expect("images hint present");
    assert!(job < images);
}

#[test]
fn failure_comment_names_the_command_and_reason() {
    let markdown = RenderedComment::failure("preview", "image tag 'web' could not be resolved")
        .to_markdown();
    assert!(markdown.contains("**/preview** — failed to start"));
    assert!(markdown.contains("could not be resolved"));
}

fn build_entry() -> BuildImageEntry {
    BuildImageEntry {
        job_id: JobId::new("pr-image-build:1").expect("valid id"),
        job_handle: JobHandle::new("arn:aws:codebuild:eu-west-1:123456789012:build/x")
            .expect("valid handle"),
        project: ProjectRef::new("pr-image-build").expect("valid project"),
        image_tag: ImageTag::new("web:pr-41").expect("valid tag"),
        image_digest: None,
    }
}

#[test]
fn build_render_tolerates_all_absent_optionals() {
    let changed_at = Utc.timestamp_opt(1_700_000_000, 0).single().expect("valid");
    let values = Values::in_flight(changed_at, None);
    let comment = BuildImageCommand.render(&build_entry(), &values);

    let markdown = comment.to_markdown();
    assert!(markdown.contains("**/build** — in progress"));
    assert!(!markdown.contains("Built in"));
    assert!(!markdown.contains("Logs"));
    // The images hint collapses entirely while no digest is known.
    assert!(!markdown.contains("<details><summary>Images</summary>"));
}

#[test]
fn build_render_places_terminal_details_in_fixed_positions() {
    let start = Utc.timestamp_opt(1_700_000_000, 0).single().expect("valid");
    let end = start + chrono::Duration::seconds(252);
    let values = Values::terminal(
        Status::Success,
        end,
        Some("https://logs.example/job/1".to_owned()),
        Some(BuiltInfo::from_bounds(start, end)),
    );
    let mut entry = build_entry();
    entry.image_digest = Some(ImageDigest::from_content(b"web:pr-41"));

    let comment = BuildImageCommand.render(&entry, &values);
    let main = comment.main();
    assert!(main.first().is_some_and(|line| line.contains("succeeded")));
    assert!(
        main.get(1)
            .is_some_and(|line| line.contains("Status changed"))
    );
    assert!(main.get(2).is_some_and(|line| line.contains("4m 12s")));

    let markdown = comment.to_markdown();
    assert!(markdown.contains("[Logs](https://logs.example/job/1)"));
    assert!(markdown.contains("`web:pr-41` → `sha256:"));
}

#[test]
fn preview_render_shows_url_only_once_known() {
    let changed_at = Utc.timestamp_opt(1_700_000_000, 0).single().expect("valid");
    let values = Values::in_flight(changed_at, None);
    let entry = crate::reply::commands::PreviewEnvEntry {
        job_id: JobId::new("pr-preview-deploy:1").expect("valid id"),
        job_handle: JobHandle::new("arn:aws:codebuild:eu-west-1:123456789012:build/y")
            .expect("valid handle"),
        project: ProjectRef::new("pr-preview-deploy").expect("valid project"),
        app_tag: ImageTag::new("web:pr-41").expect("valid tag"),
        app_digest: ImageDigest::from_content(b"web:pr-41"),
        worker_tag: ImageTag::new("worker:pr-41").expect("valid tag"),
        worker_digest: ImageDigest::from_content(b"worker:pr-41"),
        preview_url: None,
    };

    let in_flight = PreviewEnvCommand.render(&entry, &values).to_markdown();
    assert!(!in_flight.contains("Preview: "));

    let with_url = PreviewEnvCommand
        .render(
            &crate::reply::commands::PreviewEnvEntry {
                preview_url: Some("https://pr-41.preview.example".to_owned()),
                ..entry
            },
            &values,
        )
        .to_markdown();
    assert!(with_url.contains("Preview: https://pr-41.preview.example"));
    assert!(with_url.contains("<details><summary>Images</summary>"));
}
