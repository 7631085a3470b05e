//! Version bump rule: the next SDK version to publish.

use std::fmt;

use semver::{BuildMetadata, Prerelease, Version};

use crate::core::engine::LiblabVersion;

/// Version assigned when an SDK has no usable current version.
pub const DEFAULT_SDK_VERSION: &str = "1.0.0";

/// [`DEFAULT_SDK_VERSION`] as a [`Version`].
pub fn default_sdk_version() -> Version {
    Version::new(1, 0, 0)
}

/// Which rule produced the next version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpKind {
    /// No current version was known.
    Default,
    /// The current version was not valid semver.
    InvalidCurrent,
    /// The engine line changed major version.
    Major,
    Patch,
}

impl fmt::Display for BumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BumpKind::Default => write!(f, "default"),
            BumpKind::InvalidCurrent => write!(f, "default (invalid current)"),
            BumpKind::Major => write!(f, "major"),
            BumpKind::Patch => write!(f, "patch"),
        }
    }
}

/// Result of applying the bump rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkVersionBump {
    pub from: Option<String>,
    pub to: Version,
    pub kind: BumpKind,
}

/// Parse an SDK version leniently: surrounding whitespace and a leading
/// `v` or `=` are accepted.
pub fn parse_sdk_version(s: &str) -> Option<Version> {
    let s = s.trim();
    let s = s.strip_prefix(['v', '=']).unwrap_or(s);
    Version::parse(s).ok()
}

/// Next major release: `x.0.0`. A pre-release of `x.0.0` releases as `x.0.0`.
fn increment_major(v: &Version) -> Version {
    if !v.pre.is_empty() && v.minor == 0 && v.patch == 0 {
        Version::new(v.major, 0, 0)
    } else {
        Version::new(v.major + 1, 0, 0)
    }
}

/// Next patch release. A pre-release releases as its own version.
fn increment_patch(v: &Version) -> Version {
    let mut next = v.clone();
    if v.pre.is_empty() {
        next.patch += 1;
    }
    next.pre = Prerelease::EMPTY;
    next.build = BuildMetadata::EMPTY;
    next
}

/// Compute the next version of `language`'s SDK.
///
/// `manifest_version` is the engine version the published SDK was generated
/// with, when known. If its major differs from the pinned `line` the engine
/// line had a breaking change and the SDK gets a major bump; otherwise a
/// patch bump.
pub fn bump_sdk_version(
    language: &str,
    current: Option<&str>,
    manifest_version: Option<&Version>,
    line: LiblabVersion,
) -> SdkVersionBump {
    let Some(current) = current.filter(|c| !c.trim().is_empty()) else {
        tracing::info!(
            "No SDK version set for {}, setting default version {}",
            language,
            DEFAULT_SDK_VERSION
        );
        return SdkVersionBump {
            from: None,
            to: default_sdk_version(),
            kind: BumpKind::Default,
        };
    };

    let Some(parsed) = parse_sdk_version(current) else {
        tracing::warn!(
            "The {} SDK version {} is not a valid semver format. Defaulting to {}.",
            language,
            current,
            DEFAULT_SDK_VERSION
        );
        return SdkVersionBump {
            from: Some(current.to_string()),
            to: default_sdk_version(),
            kind: BumpKind::InvalidCurrent,
        };
    };

    let major = manifest_version.is_some_and(|m| m.major != line.major());
    let (to, kind) = if major {
        (increment_major(&parsed), BumpKind::Major)
    } else {
        (increment_patch(&parsed), BumpKind::Patch)
    };

    tracing::info!(
        "Bumping {} SDK version for {} from {} to {}",
        kind,
        language,
        current,
        to
    );

    SdkVersionBump {
        from: Some(current.to_string()),
        to,
        kind,
    }
}
