//! SDK target languages.
//!
//! Config files carry languages as plain strings so unknown values survive a
//! rewrite untouched. Code that needs per-language behaviour parses them into
//! [`Language`] and treats a parse failure as "unsupported".

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A language liblab can generate an SDK for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Java,
    Python,
    TypeScript,
    CSharp,
    Php,
    Swift,
    Go,
    Terraform,
}

impl Language {
    /// All supported languages.
    pub const ALL: [Language; 8] = [
        Language::Java,
        Language::Python,
        Language::TypeScript,
        Language::CSharp,
        Language::Php,
        Language::Swift,
        Language::Go,
        Language::Terraform,
    ];

    /// Get the language name as it appears in `liblab.config.json`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Java => "java",
            Language::Python => "python",
            Language::TypeScript => "typescript",
            Language::CSharp => "csharp",
            Language::Php => "php",
            Language::Swift => "swift",
            Language::Go => "go",
            Language::Terraform => "terraform",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a config names a language we don't know.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported language: {0}")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "java" => Ok(Language::Java),
            "python" => Ok(Language::Python),
            "typescript" => Ok(Language::TypeScript),
            "csharp" => Ok(Language::CSharp),
            "php" => Ok(Language::Php),
            "swift" => Ok(Language::Swift),
            "go" => Ok(Language::Go),
            "terraform" => Ok(Language::Terraform),
            other => Err(UnknownLanguage(other.to_string())),
        }
    }
}
