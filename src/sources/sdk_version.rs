//! Probing an SDK repository for its currently published version.
//!
//! Each language keeps its version in a well-known build file. The probe
//! reads that file and extracts the version token; anything that goes wrong
//! yields `None` so the caller falls back to the default version.

use regex::Regex;

use crate::core::language::Language;
use crate::sources::source::RepoFileSource;

/// How to pull a version out of a build file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionExtractor {
    /// First capture group of a regex.
    Pattern(&'static str),
    /// Top-level `version` string of a JSON document.
    JsonVersion,
}

impl VersionExtractor {
    /// Extract the version token from `contents`.
    pub fn extract(&self, contents: &str) -> Option<String> {
        match self {
            VersionExtractor::Pattern(pattern) => {
                let re = Regex::new(pattern).ok()?;
                re.captures(contents)
                    .and_then(|caps| caps.get(1))
                    .map(|m| m.as_str().to_string())
            }
            VersionExtractor::JsonVersion => {
                let doc: serde_json::Value = serde_json::from_str(contents).ok()?;
                doc.get("version")
                    .and_then(|v| v.as_str())
                    .filter(|v| !v.is_empty())
                    .map(str::to_string)
            }
        }
    }
}

/// Build file and extractor holding the SDK version for `language`.
pub fn version_file(language: Language) -> (&'static str, VersionExtractor) {
    match language {
        Language::Java => (
            "pom.xml",
            VersionExtractor::Pattern(r"<version>([\d.]+)</version>"),
        ),
        Language::TypeScript => ("package.json", VersionExtractor::JsonVersion),
        Language::Python => ("setup.py", VersionExtractor::Pattern(r"version='([\d.]+)'")),
        Language::CSharp => (
            "Project.csproj",
            VersionExtractor::Pattern(r"<Version>([\d.]+)</Version>"),
        ),
        Language::Php => ("composer.json", VersionExtractor::JsonVersion),
        Language::Swift => (
            "Package.swift",
            VersionExtractor::Pattern(r"version: '([\d.]+)'"),
        ),
        Language::Go => ("go.mod", VersionExtractor::Pattern(r"v([\d.]+)")),
        Language::Terraform => (
            "versions.tf",
            VersionExtractor::Pattern(r#"required_version = "([\d.]+)""#),
        ),
    }
}

/// Read the currently published SDK version from `org/repo`.
pub fn fetch_current_sdk_version(
    source: &dyn RepoFileSource,
    language: &str,
    org: &str,
    repo: &str,
) -> Option<String> {
    let Ok(lang) = language.parse::<Language>() else {
        tracing::debug!("No SDK version probe for {}", language);
        return None;
    };

    let (path, extractor) = version_file(lang);
    match source.fetch_file(org, repo, path) {
        Ok(contents) => extractor.extract(&contents),
        Err(e) => {
            tracing::info!(
                "Unable to fetch current {} SDK version from SDK repository {}/{}: {}",
                language,
                org,
                repo,
                e
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockRepoSource;

    #[test]
    fn test_extract_pom_version() {
        let (path, extractor) = version_file(Language::Java);
        assert_eq!(path, "pom.xml");

        let pom = "<project>\n  <artifactId>sdk</artifactId>\n  <version>2.3.1</version>\n</project>";
        assert_eq!(extractor.extract(pom), Some("2.3.1".to_string()));
    }

    #[test]
    fn test_extract_package_json_version() {
        let (_, extractor) = version_file(Language::TypeScript);
        assert_eq!(
            extractor.extract(r#"{ "name": "sdk", "version": "0.9.0" }"#),
            Some("0.9.0".to_string())
        );
        assert_eq!(extractor.extract(r#"{ "name": "sdk" }"#), None);
        assert_eq!(extractor.extract("not json"), None);
    }

    #[test]
    fn test_extract_other_build_files() {
        let cases = [
            (
                Language::Python,
                "setup.py",
                "setup(name='sdk', version='1.0.2')",
                "1.0.2",
            ),
            (
                Language::CSharp,
                "Project.csproj",
                "<PropertyGroup><Version>3.1.0</Version>",
                "3.1.0",
            ),
            (
                Language::Swift,
                "Package.swift",
                "let package = Package(version: '1.2.0')",
                "1.2.0",
            ),
            (
                Language::Go,
                "go.mod",
                "module github.com/acme/sdk/v2.1.0\n\ngo 1.21",
                "2.1.0",
            ),
            (
                Language::Terraform,
                "versions.tf",
                "terraform {\n  required_version = \"1.5.7\"\n}",
                "1.5.7",
            ),
        ];

        for (lang, file, contents, expected) in cases {
            let (path, extractor) = version_file(lang);
            assert_eq!(path, file, "language {}", lang);
            assert_eq!(
                extractor.extract(contents).as_deref(),
                Some(expected),
                "language {}",
                lang
            );
        }
    }

    #[test]
    fn test_fetch_current_sdk_version() {
        let mut source = MockRepoSource::new();
        source.add_file("acme", "sdk-php", "composer.json", r#"{"version":"4.0.1"}"#);

        assert_eq!(
            fetch_current_sdk_version(&source, "php", "acme", "sdk-php"),
            Some("4.0.1".to_string())
        );
    }

    #[test]
    fn test_fetch_current_sdk_version_missing_file() {
        let source = MockRepoSource::new();
        assert_eq!(fetch_current_sdk_version(&source, "go", "acme", "sdk-go"), None);
    }

    #[test]
    fn test_fetch_current_sdk_version_unknown_language() {
        let source = MockRepoSource::new();
        assert_eq!(fetch_current_sdk_version(&source, "cobol", "acme", "sdk"), None);
        assert!(source.requests().is_empty());
    }
}
