//! Run context for updater operations.
//!
//! Holds the credentials, paths and endpoints a run needs, and knows how to
//! hand them to the external liblab CLI.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::config::DEFAULT_LIBLAB_CONFIG_PATH;
use crate::core::engine::EngineVersions;
use crate::sources::{GitHubSource, DEFAULT_GITHUB_API_URL};

/// Environment variable the liblab CLI reads its API token from.
pub const LIBLAB_TOKEN_ENV: &str = "LIBLAB_TOKEN";

/// Environment variable the liblab CLI reads the GitHub token from.
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Environment variable carrying the config path to the liblab CLI.
pub const LIBLAB_CONFIG_PATH_ENV: &str = "LIBLAB_CONFIG_PATH";

/// Program used to launch the liblab CLI.
pub const DEFAULT_LAUNCHER: &str = "npx";

/// Everything a single updater run needs.
#[derive(Clone)]
pub struct RunContext {
    liblab_token: String,
    github_token: Option<String>,
    config_path: PathBuf,
    github_api_url: String,
    launcher: String,
    engines: EngineVersions,
}

impl RunContext {
    /// Create a context with default paths and endpoints.
    pub fn new(liblab_token: impl Into<String>, github_token: Option<String>) -> Self {
        RunContext {
            liblab_token: liblab_token.into(),
            github_token: github_token.filter(|t| !t.is_empty()),
            config_path: PathBuf::from(DEFAULT_LIBLAB_CONFIG_PATH),
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
            launcher: DEFAULT_LAUNCHER.to_string(),
            engines: EngineVersions::default(),
        }
    }

    /// Use the config file at `path`.
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = path.into();
        self
    }

    /// Use a different GitHub API endpoint.
    pub fn with_github_api_url(mut self, url: impl Into<String>) -> Self {
        self.github_api_url = url.into();
        self
    }

    /// Launch the liblab CLI through `launcher` instead of `npx`.
    pub fn with_launcher(mut self, launcher: impl Into<String>) -> Self {
        self.launcher = launcher.into();
        self
    }

    /// Compare against these engine releases.
    pub fn with_engines(mut self, engines: EngineVersions) -> Self {
        self.engines = engines;
        self
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn launcher(&self) -> &str {
        &self.launcher
    }

    pub fn engines(&self) -> &EngineVersions {
        &self.engines
    }

    pub fn github_api_url(&self) -> &str {
        &self.github_api_url
    }

    /// Variables exported to the liblab CLI.
    pub fn tool_env(&self) -> Vec<(&'static str, String)> {
        let mut env = vec![
            (LIBLAB_TOKEN_ENV, self.liblab_token.clone()),
            (
                LIBLAB_CONFIG_PATH_ENV,
                self.config_path.display().to_string(),
            ),
        ];
        if let Some(ref token) = self.github_token {
            env.push((GITHUB_TOKEN_ENV, token.clone()));
        }
        env
    }

    /// GitHub source authenticated with this context's token.
    pub fn github_source(&self) -> Result<GitHubSource> {
        GitHubSource::new(&self.github_api_url, self.github_token.clone())
    }
}

impl fmt::Debug for RunContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunContext")
            .field("liblab_token", &"<redacted>")
            .field(
                "github_token",
                &self.github_token.as_ref().map(|_| "<redacted>"),
            )
            .field("config_path", &self.config_path)
            .field("github_api_url", &self.github_api_url)
            .field("launcher", &self.launcher)
            .field("engines", &self.engines)
            .finish()
    }
}
