//! Staleness rule: has a newer engine release made a published SDK stale?

use std::cmp::Ordering;

use semver::Version;

use crate::core::engine::{is_generated_by, EngineVersions, LiblabVersion, SdkEngine};

/// Whether `candidate` is strictly newer than `published` by semver precedence.
fn is_newer(candidate: &Version, published: &Version) -> bool {
    candidate.cmp_precedence(published) == Ordering::Greater
}

/// Decide whether `language`, last generated with engine `manifest_version`,
/// needs to be regenerated.
///
/// Under line `1` only the release line of the engine the language is pinned
/// to counts. Under line `2` everything is `sdk-gen`.
pub fn is_stale(
    manifest_version: &Version,
    line: LiblabVersion,
    language: &str,
    engines: &EngineVersions,
) -> bool {
    let code_gen_newer = is_newer(engines.latest(SdkEngine::CodeGen), manifest_version);
    let sdk_gen_newer = is_newer(engines.latest(SdkEngine::SdkGen), manifest_version);

    tracing::debug!(
        "{}: manifest {} (code-gen {} newer: {}, sdk-gen {} newer: {})",
        language,
        manifest_version,
        engines.code_gen,
        code_gen_newer,
        engines.sdk_gen,
        sdk_gen_newer
    );

    match line {
        LiblabVersion::V1 => {
            (code_gen_newer && is_generated_by(SdkEngine::CodeGen, language, line))
                || (sdk_gen_newer && is_generated_by(SdkEngine::SdkGen, language, line))
        }
        LiblabVersion::V2 => sdk_gen_newer,
    }
}
