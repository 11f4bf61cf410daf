//! Unit tests for the reply-command engine.
//!
//! Tests are organised by concern: domain state machine and envelope,
//! comment rendering, invocation parsing, command definitions, and the two
//! orchestration services over the in-memory adapters.

mod fixtures;
mod invocation_tests;
mod record_tests;
mod render_tests;
mod validation_tests;
