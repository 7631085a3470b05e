//! GitHub contents API source.
//!
//! Reads files from the default branch of a repository via
//! `GET /repos/{owner}/{repo}/contents/{path}`. The API answers with a JSON
//! object whose `content` is base64 (wrapped with newlines); directories come
//! back as arrays.

use anyhow::{bail, Context, Result};
use base64::Engine as _;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

use crate::sources::source::{FetchError, RepoFileSource};

/// Public GitHub API endpoint.
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

const GITHUB_JSON: &str = "application/vnd.github+json";

/// A file entry as returned by the contents API.
#[derive(Debug, Deserialize)]
struct ContentEntry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    size: u64,
    #[serde(default)]
    content: Option<String>,
}

/// Repository file source backed by the GitHub REST API.
pub struct GitHubSource {
    client: Client,
    api_base: Url,
    token: Option<String>,
}

impl GitHubSource {
    /// Create a source for the API at `api_base`, authenticating with `token`.
    pub fn new(api_base: &str, token: Option<String>) -> Result<Self> {
        let api_base =
            Url::parse(api_base).with_context(|| format!("invalid GitHub API URL: {}", api_base))?;
        if api_base.cannot_be_a_base() {
            bail!("invalid GitHub API URL: {}", api_base);
        }

        let client = Client::builder()
            .user_agent(concat!("sdk-updater/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;

        Ok(GitHubSource {
            client,
            api_base,
            token: token.filter(|t| !t.is_empty()),
        })
    }

    /// URL of the contents endpoint for `path` in `owner/repo`.
    pub fn contents_url(&self, owner: &str, repo: &str, path: &str) -> Result<Url, FetchError> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.api_base.to_string()))?
            .pop_if_empty()
            .extend(["repos", owner, repo, "contents"])
            .extend(path.split('/').filter(|s| !s.is_empty()));
        Ok(url)
    }
}

impl RepoFileSource for GitHubSource {
    fn name(&self) -> &str {
        "github"
    }

    fn fetch_file(&self, owner: &str, repo: &str, path: &str) -> Result<String, FetchError> {
        let url = self.contents_url(owner, repo, path)?;
        tracing::debug!("GET {}", url);

        let mut request = self.client.get(url.clone()).header(ACCEPT, GITHUB_JSON);
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().map_err(|source| FetchError::Http {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound {
                path: path.to_string(),
                repo: repo.to_string(),
            });
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(|source| FetchError::Http {
            url: url.to_string(),
            source,
        })?;

        decode_contents(repo, path, &body)
    }
}

/// Decode a contents API response body into the file's text.
///
/// Directory listings, non-file entries (symlinks, submodules) and zero-byte
/// files are rejected.
pub fn decode_contents(repo: &str, path: &str, body: &str) -> Result<String, FetchError> {
    let payload: serde_json::Value =
        serde_json::from_str(body).map_err(|source| FetchError::Payload {
            path: path.to_string(),
            source,
        })?;

    if payload.is_array() {
        return Err(FetchError::NotAFile {
            path: path.to_string(),
            repo: repo.to_string(),
        });
    }

    let entry: ContentEntry =
        serde_json::from_value(payload).map_err(|source| FetchError::Payload {
            path: path.to_string(),
            source,
        })?;

    if entry.kind != "file" {
        return Err(FetchError::NotAFile {
            path: path.to_string(),
            repo: repo.to_string(),
        });
    }
    if entry.size == 0 {
        return Err(FetchError::Empty {
            path: path.to_string(),
            repo: repo.to_string(),
        });
    }

    let encoded: String = entry
        .content
        .unwrap_or_default()
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|source| FetchError::Decode {
            path: path.to_string(),
            source,
        })?;

    String::from_utf8(bytes).map_err(|_| FetchError::Utf8 {
        path: path.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_payload(content_b64: &str, size: u64) -> String {
        serde_json::json!({
            "type": "file",
            "name": ".manifest.json",
            "path": ".manifest.json",
            "size": size,
            "encoding": "base64",
            "content": content_b64,
        })
        .to_string()
    }

    #[test]
    fn test_decode_file_with_wrapped_base64() {
        // base64 of {"liblabVersion":"1.1.40"} split across lines
        let body = file_payload("eyJsaWJsYWJWZXJzaW9u\nIjoiMS4xLjQwIn0=\n", 26);
        let text = decode_contents("sdk", ".manifest.json", &body).unwrap();
        assert_eq!(text, r#"{"liblabVersion":"1.1.40"}"#);
    }

    #[test]
    fn test_decode_rejects_directory() {
        let body = r#"[{"type":"file","name":"a"}]"#;
        let err = decode_contents("sdk", "src", body).unwrap_err();
        assert!(matches!(err, FetchError::NotAFile { .. }));
    }

    #[test]
    fn test_decode_rejects_non_file() {
        let body = r#"{"type":"symlink","size":10,"target":"x"}"#;
        let err = decode_contents("sdk", "link", body).unwrap_err();
        assert!(matches!(err, FetchError::NotAFile { .. }));
    }

    #[test]
    fn test_decode_rejects_empty_file() {
        let body = file_payload("", 0);
        let err = decode_contents("sdk", ".manifest.json", &body).unwrap_err();
        assert!(matches!(err, FetchError::Empty { .. }));
    }

    #[test]
    fn test_decode_rejects_bad_base64() {
        let body = file_payload("!!!not base64!!!", 12);
        let err = decode_contents("sdk", ".manifest.json", &body).unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
    }

    #[test]
    fn test_contents_url() {
        let source = GitHubSource::new("https://api.github.com", None).unwrap();
        let url = source
            .contents_url("acme", "petstore-java", ".manifest.json")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/acme/petstore-java/contents/.manifest.json"
        );
    }

    #[test]
    fn test_contents_url_with_base_path() {
        let source = GitHubSource::new("https://ghe.example.com/api/v3/", None).unwrap();
        let url = source.contents_url("acme", "sdk", "src/version.go").unwrap();
        assert_eq!(
            url.as_str(),
            "https://ghe.example.com/api/v3/repos/acme/sdk/contents/src/version.go"
        );
    }

    #[test]
    fn test_invalid_api_url() {
        assert!(GitHubSource::new("not a url", None).is_err());
        assert!(GitHubSource::new("mailto:someone@example.com", None).is_err());
    }
}
