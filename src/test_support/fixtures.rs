//! Config fixtures for common test scenarios.

use std::path::{Path, PathBuf};

use serde_json::{json, Map, Value};

use crate::core::config::LiblabConfig;

/// Builder for a `liblab.config.json` document.
#[derive(Debug, Clone)]
pub struct ConfigFixture {
    org: String,
    liblab_version: Option<String>,
    languages: Vec<String>,
    options: Map<String, Value>,
}

impl ConfigFixture {
    /// A config publishing to `org` with no languages.
    pub fn new(org: impl Into<String>) -> Self {
        ConfigFixture {
            org: org.into(),
            liblab_version: None,
            languages: Vec::new(),
            options: Map::new(),
        }
    }

    /// Set the top-level liblab version line.
    pub fn liblab_version(mut self, line: &str) -> Self {
        self.liblab_version = Some(line.to_string());
        self
    }

    /// Add a language with a repository.
    pub fn language(mut self, language: &str, repo: &str) -> Self {
        self.languages.push(language.to_string());
        self.options
            .insert(language.to_string(), json!({ "githubRepoName": repo }));
        self
    }

    /// Add a language with arbitrary options.
    pub fn language_with(mut self, language: &str, options: Value) -> Self {
        self.languages.push(language.to_string());
        self.options.insert(language.to_string(), options);
        self
    }

    /// Add a language with no `languageOptions` entry.
    pub fn bare_language(mut self, language: &str) -> Self {
        self.languages.push(language.to_string());
        self
    }

    /// Render the config as JSON.
    pub fn to_json(&self) -> Value {
        let mut doc = json!({
            "sdkName": "petstore",
            "specFilePath": "spec.json",
            "languages": self.languages,
            "publishing": { "githubOrg": self.org },
            "languageOptions": self.options,
        });
        if let Some(ref line) = self.liblab_version {
            doc["liblabVersion"] = json!(line);
        }
        doc
    }

    /// Parse into a [`LiblabConfig`].
    pub fn build(&self) -> LiblabConfig {
        serde_json::from_value(self.to_json()).expect("fixture config must parse")
    }

    /// Write the config as `liblab.config.json` inside `dir`.
    pub fn write_to(&self, dir: &Path) -> PathBuf {
        let path = dir.join("liblab.config.json");
        let contents =
            serde_json::to_string_pretty(&self.to_json()).expect("fixture config must serialize");
        std::fs::write(&path, contents).expect("failed to write fixture config");
        path
    }
}
