//! sdk-updater - keeps liblab-generated SDKs in step with the generator
//!
//! This crate decides which SDK languages in a `liblab.config.json` are stale
//! relative to the latest liblab engine releases, bumps their versions, and
//! drives the external liblab CLI to rebuild them and open pull requests.

pub mod core;
pub mod ops;
pub mod sources;
pub mod util;

/// Test utilities and mocks for unit tests.
///
/// This module is only available when compiling with `--cfg test`. It
/// provides an in-memory repository source and config fixtures.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{EngineVersions, Language, LiblabConfig, LiblabVersion, Manifest, SdkEngine};
pub use crate::ops::{determine_languages_to_update, run, RunStatus};
pub use crate::util::RunContext;
