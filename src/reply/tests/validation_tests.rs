//! Unit tests for the generic validation layer.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use std::collections::BTreeMap;

use serde_json::json;

use crate::reply::commands::{BuildImageArgs, BuildImageEntry, PreviewEnvArgs};
use crate::reply::validation;

#[test]
fn payloads_round_trip_through_the_store_representation() {
    let raw = json!({
        "job_id": "pr-image-build:1",
        "job_handle": "arn:aws:codebuild:eu-west-1:123456789012:build/pr-image-build:1",
        "project": "pr-image-build",
        "image_tag": "web:pr-41",
    });

    let entry: BuildImageEntry =
        validation::validate_payload("build", &raw).expect("payload validates");
    assert_eq!(entry.image_tag.as_str(), "web:pr-41");
    assert!(entry.image_digest.is_none());

    let serialized = validation::serialize_payload("build", &entry).expect("payload serializes");
    let restored: BuildImageEntry =
        validation::validate_payload("build", &serialized).expect("payload re-validates");
    assert_eq!(restored, entry);
}

#[test]
fn corrupt_payloads_are_schema_drift_not_defaults() {
    let raw = json!({"job_id": "pr-image-build:1"});
    let result = validation::validate_payload::<BuildImageEntry>("build", &raw);

    let error = result.expect_err("missing fields must fail");
    assert_eq!(error.subject, "build");
    assert!(error.reason.contains("job_handle"));
}

#[test]
fn args_deserialize_from_raw_string_pairs() {
    let mut raw = BTreeMap::new();
    raw.insert("app".to_owned(), "web:pr-41".to_owned());
    raw.insert("worker".to_owned(), "worker:pr-41".to_owned());

    let args: PreviewEnvArgs =
        validation::validate_args("preview", &raw).expect("arguments validate");
    assert_eq!(args.app, "web:pr-41");
    assert_eq!(args.worker, "worker:pr-41");
}

#[test]
fn missing_required_argument_is_rejected() {
    let raw = BTreeMap::new();
    let result = validation::validate_args::<BuildImageArgs>("build", &raw);

    let error = result.expect_err("missing tag must fail");
    assert_eq!(error.subject, "build");
    assert!(error.reason.contains("tag"));
}

#[test]
fn unknown_argument_keys_are_rejected() {
    let mut raw = BTreeMap::new();
    raw.insert("tag".to_owned(), "web:pr-41".to_owned());
    raw.insert("color".to_owned(), "blue".to_owned());

    let result = validation::validate_args::<BuildImageArgs>("build", &raw);
    let error = result.expect_err("stray key must fail");
    assert!(error.reason.contains("color"));
}
