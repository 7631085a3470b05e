//! Test utilities and mocks for unit tests.
//!
//! Provides an in-memory [`RepoFileSource`] so the decision engine can be
//! exercised without network access, plus config fixtures.
//!
//! # Example
//!
//! ```rust,ignore
//! use sdk_updater::test_support::MockRepoSource;
//!
//! let mut source = MockRepoSource::new();
//! source.add_manifest("acme", "sdk-java", "1.1.40");
//! ```

pub mod fixtures;

use std::cell::RefCell;
use std::collections::HashMap;

use crate::core::manifest::MANIFEST_PATH;
use crate::sources::{FetchError, RepoFileSource};

// Re-export fixtures for convenience
pub use fixtures::*;

/// In-memory repository file source.
///
/// Files are keyed by `(owner, repo, path)`. Every fetch is recorded as
/// `owner/repo/path` so tests can assert on what was requested.
#[derive(Debug, Default)]
pub struct MockRepoSource {
    files: HashMap<(String, String, String), String>,
    fail_all: bool,
    requests: RefCell<Vec<String>>,
}

impl MockRepoSource {
    /// Create an empty source: every fetch is "not found".
    pub fn new() -> Self {
        MockRepoSource::default()
    }

    /// Create a source where every fetch fails with a server error.
    pub fn failing() -> Self {
        MockRepoSource {
            fail_all: true,
            ..Default::default()
        }
    }

    /// Add a file with the given content.
    pub fn add_file(&mut self, owner: &str, repo: &str, path: &str, content: impl Into<String>) {
        self.files.insert(
            (owner.to_string(), repo.to_string(), path.to_string()),
            content.into(),
        );
    }

    /// Add a `.manifest.json` recording `liblab_version`.
    pub fn add_manifest(&mut self, owner: &str, repo: &str, liblab_version: &str) {
        let manifest = serde_json::json!({ "liblabVersion": liblab_version }).to_string();
        self.add_file(owner, repo, MANIFEST_PATH, manifest);
    }

    /// Get all recorded requests.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl RepoFileSource for MockRepoSource {
    fn name(&self) -> &str {
        "mock"
    }

    fn fetch_file(&self, owner: &str, repo: &str, path: &str) -> Result<String, FetchError> {
        self.requests
            .borrow_mut()
            .push(format!("{}/{}/{}", owner, repo, path));

        if self.fail_all {
            return Err(FetchError::Status {
                url: format!("mock://{}/{}/{}", owner, repo, path),
                status: 500,
            });
        }

        self.files
            .get(&(owner.to_string(), repo.to_string(), path.to_string()))
            .cloned()
            .ok_or_else(|| FetchError::NotFound {
                path: path.to_string(),
                repo: repo.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_repo_source() {
        let mut source = MockRepoSource::new();
        source.add_file("acme", "sdk", "go.mod", "module x");

        assert_eq!(source.fetch_file("acme", "sdk", "go.mod").unwrap(), "module x");
        assert!(matches!(
            source.fetch_file("acme", "sdk", "pom.xml"),
            Err(FetchError::NotFound { .. })
        ));
        assert_eq!(source.requests(), vec!["acme/sdk/go.mod", "acme/sdk/pom.xml"]);
    }

    #[test]
    fn test_failing_source() {
        let source = MockRepoSource::failing();
        assert!(matches!(
            source.fetch_file("acme", "sdk", "go.mod"),
            Err(FetchError::Status { status: 500, .. })
        ));
    }
}
