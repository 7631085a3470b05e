//! The `liblab.config.json` model.
//!
//! Only the fields the updater reads or rewrites are typed. Everything else
//! in the file is carried through `extra` so a rewrite leaves it intact.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::core::engine::{LiblabVersion, UnsupportedLiblabVersion};

/// Default config file name, resolved against the working directory.
pub const DEFAULT_LIBLAB_CONFIG_PATH: &str = "liblab.config.json";

/// How a missing `liblabVersion` is reported.
const UNSET_LIBLAB_VERSION: &str = "undefined";

/// Errors reading, validating or writing the liblab config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("liblab.config.json not found at {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Error reading liblab.config.json at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error reading liblab.config.json at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize liblab.config.json: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write liblab.config.json at {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    UnsupportedLiblabVersion(#[from] UnsupportedLiblabVersion),
}

/// Parsed `liblab.config.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiblabConfig {
    /// Top-level liblab version line, used when a language doesn't pin one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liblab_version: Option<String>,

    /// Languages to process, in order.
    #[serde(default)]
    pub languages: Vec<String>,

    pub publishing: Publishing,

    /// Per-language options. A `null` entry is kept as `None`.
    #[serde(default)]
    pub language_options: BTreeMap<String, Option<LanguageOptions>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `publishing` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publishing {
    /// GitHub organization owning the SDK repositories.
    pub github_org: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `languageOptions.<language>` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageOptions {
    /// Repository (under `publishing.githubOrg`) holding this SDK.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_repo_name: Option<String>,

    /// Per-language liblab version line override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liblab_version: Option<String>,

    /// SDK version to publish next.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdk_version: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LanguageOptions {
    /// The repository name, if set and non-empty.
    pub fn repo_name(&self) -> Option<&str> {
        self.github_repo_name.as_deref().filter(|s| !s.is_empty())
    }

    /// The recorded SDK version, if set and non-empty.
    pub fn recorded_sdk_version(&self) -> Option<&str> {
        self.sdk_version.as_deref().filter(|s| !s.is_empty())
    }
}

impl LiblabConfig {
    /// Load the config from `path`. A missing file is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse a config from a JSON string.
    pub fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(contents)
    }

    /// Render as pretty JSON with two-space indentation and a trailing newline.
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        let mut out = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        out.push('\n');
        Ok(out)
    }

    /// Overwrite the config file at `path`.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_json_pretty()?;
        std::fs::write(path, contents).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// GitHub organization owning the SDK repositories.
    pub fn github_org(&self) -> &str {
        &self.publishing.github_org
    }

    /// Options for `language`, if present and not `null`.
    pub fn options_for(&self, language: &str) -> Option<&LanguageOptions> {
        self.language_options.get(language).and_then(Option::as_ref)
    }

    pub fn options_for_mut(&mut self, language: &str) -> Option<&mut LanguageOptions> {
        self.language_options
            .get_mut(language)
            .and_then(Option::as_mut)
    }

    /// Liblab version line set for `language`.
    ///
    /// The language's own `liblabVersion` wins, then the top-level one.
    /// `None` when neither is set; a set value other than `"1"` or `"2"` is
    /// rejected.
    pub fn liblab_version_for(
        &self,
        language: &str,
    ) -> Result<Option<LiblabVersion>, ConfigError> {
        let raw = self
            .options_for(language)
            .and_then(|opts| opts.liblab_version.as_deref())
            .filter(|s| !s.is_empty())
            .or_else(|| self.liblab_version.as_deref().filter(|s| !s.is_empty()));

        match raw {
            Some(raw) => Ok(Some(raw.parse()?)),
            None => Ok(None),
        }
    }

    /// Like [`LiblabConfig::liblab_version_for`], but a missing line is an
    /// error too. Staleness can't be judged without one.
    pub fn required_liblab_version_for(
        &self,
        language: &str,
    ) -> Result<LiblabVersion, ConfigError> {
        self.liblab_version_for(language)?
            .ok_or_else(|| UnsupportedLiblabVersion(UNSET_LIBLAB_VERSION.to_string()).into())
    }
}
