//! RepoFileSource trait - read access to files in remote SDK repositories.

use thiserror::Error;

/// Errors fetching a file from a repository.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid API URL `{0}`")]
    InvalidUrl(String),

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{path} not found in repository {repo}")]
    NotFound { path: String, repo: String },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Could not read content of file {path} from repository {repo}")]
    NotAFile { path: String, repo: String },

    #[error("file {path} in repository {repo} is empty")]
    Empty { path: String, repo: String },

    #[error("unexpected contents payload for {path}: {source}")]
    Payload {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base64 content in {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: base64::DecodeError,
    },

    #[error("{path} is not valid UTF-8")]
    Utf8 { path: String },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A place SDK repository files can be read from.
///
/// Implementations read from the repository's default branch and return the
/// file's decoded text.
pub trait RepoFileSource {
    /// Get the source name for display.
    fn name(&self) -> &str;

    /// Fetch `path` from `owner/repo`.
    fn fetch_file(&self, owner: &str, repo: &str, path: &str) -> Result<String, FetchError>;
}
