//! Replybot: a reconciliation engine for PR-comment-driven build commands.
//!
//! PR comments issue commands (`/build`, `/preview`); each command starts an
//! asynchronous external build job. The engine persists one entry per
//! command invocation, reconciles it against the job service on follow-up
//! triggers, and re-renders a structured status comment whenever the state
//! changes.
//!
//! # Modules
//!
//! - [`reply`]: the command/entry reconciliation engine
//! - [`config`]: region, account, and project configuration

pub mod config;
pub mod reply;
