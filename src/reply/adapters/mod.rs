//! Adapter implementations of the engine's ports.

pub mod fs;
pub mod memory;
