//! Shared utilities

pub mod context;
pub mod process;

pub use context::RunContext;
pub use process::{OutputDeduper, ProcessBuilder};
