//! Remote SDK repositories.
//!
//! Sources are responsible for reading files (the generation manifest and
//! the per-language build files) from SDK repositories.

pub mod github;
pub mod manifest;
pub mod sdk_version;
pub mod source;

pub use github::{GitHubSource, DEFAULT_GITHUB_API_URL};
pub use manifest::{fetch_manifest, try_fetch_manifest};
pub use sdk_version::fetch_current_sdk_version;
pub use source::{FetchError, RepoFileSource};
