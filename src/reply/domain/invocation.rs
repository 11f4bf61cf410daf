//! Comment command-line parser.
//!
//! Commands arrive as the first line of a PR comment, e.g.
//! `/preview app=web:pr-41 worker=worker:pr-41`. Parsing happens before any
//! command definition is consulted; malformed input never reaches `launch`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors for command-line parsing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvocationError {
    /// Input was empty.
    #[error("command input cannot be empty")]
    EmptyInput,

    /// Input does not start with `/`.
    #[error("commands must start with '/'")]
    MissingLeadingSlash,

    /// Command name is invalid.
    #[error("invalid command name '{0}'")]
    InvalidCommandName(String),

    /// An argument token does not match `key=value`.
    #[error("invalid argument token '{token}': expected key=value")]
    InvalidArgumentToken {
        /// The malformed token text.
        token: String,
    },

    /// A quoted value was not terminated.
    #[error("unterminated quoted value in command")]
    UnterminatedQuotedValue,

    /// Duplicate argument key.
    #[error("duplicate argument '{0}'")]
    DuplicateArgument(String),
}

/// A parsed command invocation: name plus raw string arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandInvocation {
    command: String,
    arguments: BTreeMap<String, String>,
}

impl CommandInvocation {
    /// Parses `/<command> key=value key2="quoted value"` input.
    ///
    /// # Errors
    ///
    /// Returns [`InvocationError`] when the input is empty or malformed.
    pub fn parse(raw_input: &str) -> Result<Self, InvocationError> {
        let trimmed = raw_input.trim();
        if trimmed.is_empty() {
            return Err(InvocationError::EmptyInput);
        }

        let tokens = tokenize(trimmed)?;
        let command_token = tokens.first().ok_or(InvocationError::EmptyInput)?;
        let command = parse_command_token(command_token)?;

        let mut arguments = BTreeMap::new();
        for token in tokens.iter().skip(1) {
            let (key, value) =
                token
                    .split_once('=')
                    .ok_or_else(|| InvocationError::InvalidArgumentToken {
                        token: token.clone(),
                    })?;

            if key.is_empty() || !is_valid_identifier(key) {
                return Err(InvocationError::InvalidArgumentToken {
                    token: token.clone(),
                });
            }

            let normalized_key = key.to_ascii_lowercase();
            if arguments
                .insert(normalized_key.clone(), value.to_owned())
                .is_some()
            {
                return Err(InvocationError::DuplicateArgument(normalized_key));
            }
        }

        Ok(Self { command, arguments })
    }

    /// Returns the command name without the leading slash.
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Returns parsed argument values as raw strings.
    #[must_use]
    pub const fn arguments(&self) -> &BTreeMap<String, String> {
        &self.arguments
    }
}

fn parse_command_token(token: &str) -> Result<String, InvocationError> {
    let command = token
        .strip_prefix('/')
        .ok_or(InvocationError::MissingLeadingSlash)?;
    if command.is_empty() || !is_valid_identifier(command) {
        return Err(InvocationError::InvalidCommandName(command.to_owned()));
    }
    Ok(command.to_ascii_lowercase())
}

fn tokenize(input: &str) -> Result<Vec<String>, InvocationError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes: Option<char> = None;
    let mut escaped = false;

    for character in input.chars() {
        if let Some(quote_char) = in_quotes {
            if escaped {
                current.push(character);
                escaped = false;
                continue;
            }

            match character {
                '\\' => escaped = true,
                _ if character == quote_char => in_quotes = None,
                _ => current.push(character),
            }
            continue;
        }

        match character {
            '"' | '\'' => in_quotes = Some(character),
            _ if character.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            '\\' => {
                current.push(character);
                return Err(InvocationError::InvalidArgumentToken {
                    token: current.clone(),
                });
            }
            _ => current.push(character),
        }
    }

    if in_quotes.is_some() || escaped {
        return Err(InvocationError::UnterminatedQuotedValue);
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    Ok(tokens)
}

fn is_valid_identifier(value: &str) -> bool {
    value
        .chars()
        .all(|character| character.is_ascii_alphanumeric() || matches!(character, '-' | '_'))
}
