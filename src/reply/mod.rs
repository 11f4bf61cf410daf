//! The reply-command engine.
//!
//! A PR comment names a command; the command launches an asynchronous build
//! job and the engine keeps one persisted source of truth for that job's
//! state, reconciles it against the external service, and deterministically
//! re-renders the command's comment. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Command definitions in [`commands`] behind the [`contract`] trait
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod commands;
pub mod contract;
pub mod domain;
pub mod ports;
pub mod registry;
pub mod services;
pub mod validation;

#[cfg(test)]
mod tests;
