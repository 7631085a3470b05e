//! Fetching the remote generation manifest.

use crate::core::manifest::{Manifest, MANIFEST_PATH};
use crate::sources::source::{FetchError, RepoFileSource};

/// Fetch and parse `.manifest.json` from `org/repo`.
pub fn try_fetch_manifest(
    source: &dyn RepoFileSource,
    org: &str,
    repo: &str,
) -> Result<Manifest, FetchError> {
    let text = source.fetch_file(org, repo, MANIFEST_PATH)?;
    serde_json::from_str(&text).map_err(|e| FetchError::Json {
        path: MANIFEST_PATH.to_string(),
        source: e,
    })
}

/// Fetch the manifest, treating every failure as "no manifest".
///
/// A repository that was never generated has no manifest, and a broken one
/// must not block the other languages, so errors are logged and dropped.
pub fn fetch_manifest(source: &dyn RepoFileSource, org: &str, repo: &str) -> Option<Manifest> {
    match try_fetch_manifest(source, org, repo) {
        Ok(manifest) => Some(manifest),
        Err(e) => {
            tracing::warn!(
                "Unable to fetch {} file from {}/{}: {}",
                MANIFEST_PATH,
                org,
                repo,
                e
            );
            None
        }
    }
}
