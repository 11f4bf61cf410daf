//! Unit tests for the comment command-line parser.

use crate::reply::domain::{CommandInvocation, InvocationError};
use rstest::rstest;

#[test]
fn parses_command_and_arguments() {
    let parsed =
        CommandInvocation::parse("/preview app=web:pr-41 worker=worker:pr-41").unwrap_or_else(
            |err| panic!("parse should succeed: {err}"),
        );
    assert_eq!(parsed.command(), "preview");
    assert_eq!(
        parsed.arguments().get("app").map(String::as_str),
        Some("web:pr-41")
    );
    assert_eq!(
        parsed.arguments().get("worker").map(String::as_str),
        Some("worker:pr-41")
    );
}

#[test]
fn parses_quoted_values_with_spaces() {
    let parsed = CommandInvocation::parse("/build tag=\"web latest\"")
        .unwrap_or_else(|err| panic!("parse should succeed: {err}"));
    assert_eq!(
        parsed.arguments().get("tag").map(String::as_str),
        Some("web latest")
    );
}

#[test]
fn normalizes_command_and_key_case() {
    let parsed = CommandInvocation::parse("/Build TAG=web:pr-41")
        .unwrap_or_else(|err| panic!("parse should succeed: {err}"));
    assert_eq!(parsed.command(), "build");
    assert!(parsed.arguments().contains_key("tag"));
}

#[rstest]
#[case("", InvocationError::EmptyInput)]
#[case("   ", InvocationError::EmptyInput)]
#[case("build tag=x", InvocationError::MissingLeadingSlash)]
#[case("/build tag=\"open", InvocationError::UnterminatedQuotedValue)]
#[case("/build tag=a tag=b", InvocationError::DuplicateArgument("tag".to_owned()))]
fn rejects_malformed_input(#[case] raw: &str, #[case] expected: InvocationError) {
    assert_eq!(CommandInvocation::parse(raw), Err(expected));
}

#[test]
fn rejects_argument_without_value() {
    let result = CommandInvocation::parse("/build tag");
    assert!(matches!(
        result,
        Err(InvocationError::InvalidArgumentToken { token }) if token == "tag"
    ));
}

#[test]
fn rejects_invalid_command_name() {
    let result = CommandInvocation::parse("/bu!ld");
    assert!(matches!(
        result,
        Err(InvocationError::InvalidCommandName(name)) if name == "bu!ld"
    ));
}
