//! Generator engines and the liblab version lines that select them.
//!
//! liblab ships two generators on independent version lines: the legacy
//! `code-gen` engine and the newer `sdk-gen` engine. Under version line `1`
//! each language is pinned to exactly one of them by a fixed table; under
//! line `2` every language is generated by `sdk-gen`.

use std::fmt;
use std::str::FromStr;

use semver::Version;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::language::{Language, UnknownLanguage};

/// Latest released `code-gen` engine version.
pub const LATEST_CODE_GEN_VERSION: &str = "1.1.41";

/// Latest released `sdk-gen` engine version.
pub const LATEST_SDK_GEN_VERSION: &str = "2.0.20";

/// A generator engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SdkEngine {
    #[serde(rename = "code-gen")]
    CodeGen,
    #[serde(rename = "sdk-gen")]
    SdkGen,
}

impl SdkEngine {
    pub fn as_str(&self) -> &'static str {
        match self {
            SdkEngine::CodeGen => "code-gen",
            SdkEngine::SdkGen => "sdk-gen",
        }
    }
}

impl fmt::Display for SdkEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pinned liblab compatibility line (`liblabVersion` in the config).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LiblabVersion {
    /// Legacy dual-engine line.
    #[default]
    V1,
    /// `sdk-gen` only.
    V2,
}

impl LiblabVersion {
    /// Major engine version this line corresponds to.
    pub fn major(&self) -> u64 {
        match self {
            LiblabVersion::V1 => 1,
            LiblabVersion::V2 => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LiblabVersion::V1 => "1",
            LiblabVersion::V2 => "2",
        }
    }
}

impl fmt::Display for LiblabVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a `liblabVersion` other than `"1"` or `"2"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported liblabVersion: {0} in liblab.config.json.")]
pub struct UnsupportedLiblabVersion(pub String);

impl FromStr for LiblabVersion {
    type Err = UnsupportedLiblabVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(LiblabVersion::V1),
            "2" => Ok(LiblabVersion::V2),
            other => Err(UnsupportedLiblabVersion(other.to_string())),
        }
    }
}

/// Latest known release of each engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineVersions {
    pub code_gen: Version,
    pub sdk_gen: Version,
}

impl EngineVersions {
    pub fn new(code_gen: Version, sdk_gen: Version) -> Self {
        EngineVersions { code_gen, sdk_gen }
    }

    /// Latest version of the given engine.
    pub fn latest(&self, engine: SdkEngine) -> &Version {
        match engine {
            SdkEngine::CodeGen => &self.code_gen,
            SdkEngine::SdkGen => &self.sdk_gen,
        }
    }
}

impl Default for EngineVersions {
    fn default() -> Self {
        EngineVersions {
            code_gen: Version::new(1, 1, 41),
            sdk_gen: Version::new(2, 0, 20),
        }
    }
}

/// Resolve which engine generates `language` under `line`.
///
/// Line `1` uses the fixed language table and fails for languages it does
/// not list. Line `2` is always `sdk-gen`.
pub fn engine_for(language: &str, line: LiblabVersion) -> Result<SdkEngine, UnknownLanguage> {
    match line {
        LiblabVersion::V1 => {
            let language: Language = language.parse()?;
            Ok(match language {
                Language::Java | Language::Python | Language::TypeScript => SdkEngine::CodeGen,
                Language::Go
                | Language::CSharp
                | Language::Terraform
                | Language::Swift
                | Language::Php => SdkEngine::SdkGen,
            })
        }
        LiblabVersion::V2 => Ok(SdkEngine::SdkGen),
    }
}

/// Whether `language` is generated by `engine` under `line`.
///
/// An unsupported language is never generated by any engine.
pub fn is_generated_by(engine: SdkEngine, language: &str, line: LiblabVersion) -> bool {
    match engine_for(language, line) {
        Ok(resolved) => resolved == engine,
        Err(e) => {
            tracing::debug!("{}; not treating it as {}", e, engine);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_engine_versions_match_constants() {
        let versions = EngineVersions::default();
        assert_eq!(versions.code_gen.to_string(), LATEST_CODE_GEN_VERSION);
        assert_eq!(versions.sdk_gen.to_string(), LATEST_SDK_GEN_VERSION);
    }

    #[test]
    fn test_engine_table_line_one() {
        for lang in ["java", "python", "typescript"] {
            assert_eq!(engine_for(lang, LiblabVersion::V1).unwrap(), SdkEngine::CodeGen);
        }
        for lang in ["go", "csharp", "terraform", "swift", "php"] {
            assert_eq!(engine_for(lang, LiblabVersion::V1).unwrap(), SdkEngine::SdkGen);
        }
    }

    #[test]
    fn test_line_two_is_always_sdk_gen() {
        for lang in ["java", "go", "whatever"] {
            assert_eq!(engine_for(lang, LiblabVersion::V2).unwrap(), SdkEngine::SdkGen);
        }
    }

    #[test]
    fn test_unsupported_language_is_not_any_engine() {
        assert!(engine_for("cobol", LiblabVersion::V1).is_err());
        assert!(!is_generated_by(SdkEngine::CodeGen, "cobol", LiblabVersion::V1));
        assert!(!is_generated_by(SdkEngine::SdkGen, "cobol", LiblabVersion::V1));
    }

    #[test]
    fn test_language_spellings_are_not_aliased() {
        assert!(engine_for("ts", LiblabVersion::V1).is_err());
        assert!(!is_generated_by(SdkEngine::CodeGen, "ts", LiblabVersion::V1));
        assert!(!is_generated_by(SdkEngine::SdkGen, "c#", LiblabVersion::V1));
    }

    #[test]
    fn test_parse_liblab_version() {
        assert_eq!("1".parse::<LiblabVersion>().unwrap(), LiblabVersion::V1);
        assert_eq!("2".parse::<LiblabVersion>().unwrap(), LiblabVersion::V2);

        let err = "3".parse::<LiblabVersion>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unsupported liblabVersion: 3 in liblab.config.json."
        );
    }

    #[test]
    fn test_latest_by_engine() {
        let versions = EngineVersions::new(Version::new(1, 0, 0), Version::new(2, 1, 0));
        assert_eq!(versions.latest(SdkEngine::CodeGen), &Version::new(1, 0, 0));
        assert_eq!(versions.latest(SdkEngine::SdkGen), &Version::new(2, 1, 0));
    }
}
