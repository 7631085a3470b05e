//! High-level operations.
//!
//! The version decision engine (staleness and bump rules, the per-language
//! pass) and the end-to-end run built on it.

pub mod bump;
pub mod run;
pub mod staleness;
pub mod update_languages;

pub use bump::{bump_sdk_version, BumpKind, SdkVersionBump, DEFAULT_SDK_VERSION};
pub use run::{run, write_status_output, RunStatus};
pub use staleness::is_stale;
pub use update_languages::{determine_languages_to_update, set_languages_for_update, UpdateOptions};
