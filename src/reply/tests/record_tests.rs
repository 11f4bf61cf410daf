//! Unit tests for the entry record envelope.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use chrono::Utc;
use serde_json::json;

use crate::reply::domain::{
    CommentRef, EntryId, EntryRecord, EntryRecordError, ImageDigest, ImageTag, SharedEntry, Status,
};
use crate::reply::registry::CommandKind;
use crate::reply::tests::fixtures;

fn record() -> EntryRecord {
    EntryRecord::new(
        EntryId::new(),
        CommandKind::BuildImage,
        fixtures::thread(),
        json!({"job_id": "pr-image-build:1"}),
        Utc::now(),
    )
}

#[test]
fn new_record_has_no_comment_and_no_rendered_status() {
    let record = record();
    assert!(record.comment_ref().is_none());
    assert!(record.last_rendered().is_none());
    assert!(!record.reconciled());
}

#[test]
fn mark_reconciled_is_sticky_and_survives_persistence() {
    let mut record = record();
    record.mark_reconciled();
    assert!(record.reconciled());

    let json = serde_json::to_string(&record).expect("serialize");
    let restored: EntryRecord = serde_json::from_str(&json).expect("deserialize");
    assert!(restored.reconciled());
}

#[test]
fn records_persisted_before_the_flag_existed_read_as_unreconciled() {
    let json = serde_json::to_string(&record()).expect("serialize");
    let stripped = json.replace("\"reconciled\":false,", "");
    let restored: EntryRecord = serde_json::from_str(&stripped).expect("deserialize");
    assert!(!restored.reconciled());
}

#[test]
fn serde_round_trip_preserves_the_record() {
    let mut original = record();
    original
        .attach_comment(CommentRef::new("comment-9").expect("valid ref"))
        .expect("first attach succeeds");
    original
        .mark_rendered(Status::Undone)
        .expect("initial render mark succeeds");

    let json = serde_json::to_string(&original).expect("serialize");
    let restored: EntryRecord = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(restored, original);
}

#[test]
fn attach_comment_is_append_once() {
    let mut record = record();
    let comment = CommentRef::new("comment-1").expect("valid ref");
    record
        .attach_comment(comment.clone())
        .expect("first attach succeeds");

    let second = record.attach_comment(comment);
    assert_eq!(
        second,
        Err(EntryRecordError::CommentAlreadyAttached(record.id()))
    );
}

#[test]
fn mark_rendered_follows_the_state_machine() {
    let mut record = record();
    record
        .mark_rendered(Status::Undone)
        .expect("undone is always accepted first");
    record
        .mark_rendered(Status::Undone)
        .expect("re-poll keeps undone");
    record
        .mark_rendered(Status::Success)
        .expect("undone to success is permitted");
    record
        .mark_rendered(Status::Success)
        .expect("terminal self-transition is a no-op");

    let regression = record.mark_rendered(Status::Failure);
    assert_eq!(
        regression,
        Err(EntryRecordError::TerminalStatusChange {
            id: record.id(),
            from: Status::Success,
            to: Status::Failure,
        })
    );
}

#[test]
fn shared_entry_returns_sibling_digests() {
    let tag = ImageTag::new("web:pr-41").expect("valid tag");
    let digest = ImageDigest::from_content(b"web:pr-41");
    let shared = SharedEntry::new().with_image_digest(tag.clone(), digest.clone());

    assert_eq!(shared.image_digest(&tag), Some(&digest));
    let other = ImageTag::new("worker:pr-41").expect("valid tag");
    assert!(shared.image_digest(&other).is_none());
}
