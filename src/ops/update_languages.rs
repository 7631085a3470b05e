//! Decide which languages need regenerating and record their next versions.

use std::path::Path;

use crate::core::config::{ConfigError, LiblabConfig};
use crate::core::engine::EngineVersions;
use crate::ops::bump::bump_sdk_version;
use crate::ops::staleness::is_stale;
use crate::sources::{fetch_current_sdk_version, fetch_manifest, RepoFileSource};

/// Options for [`set_languages_for_update`].
#[derive(Debug, Clone, Default)]
pub struct UpdateOptions {
    /// Latest engine releases to compare manifests against.
    pub engines: EngineVersions,

    /// Decide only; leave the config file untouched.
    pub dry_run: bool,
}

/// Walk the configured languages in order and collect the stale ones.
///
/// For every stale language the next SDK version is written into its
/// `languageOptions.<lang>.sdkVersion`. If any language is stale,
/// `config.languages` is narrowed to exactly the stale languages so the
/// build step only touches those.
///
/// Fetch problems never fail the pass: a missing or unreadable manifest
/// means the SDK is regenerated. An unsupported `liblabVersion` does fail it,
/// and so does a missing one once there is a manifest to compare against.
pub fn determine_languages_to_update(
    config: &mut LiblabConfig,
    source: &dyn RepoFileSource,
    engines: &EngineVersions,
) -> Result<Vec<String>, ConfigError> {
    let org = config.github_org().to_string();
    let languages = config.languages.clone();
    let mut to_update = Vec::new();

    for language in &languages {
        let repo = match config.options_for(language) {
            None => {
                tracing::info!(
                    "{} does not have languageOptions.{} defined. Skipping {} SDK updates.",
                    language,
                    language,
                    language
                );
                continue;
            }
            Some(opts) => match opts.repo_name() {
                Some(repo) => repo.to_string(),
                None => {
                    tracing::info!(
                        "{} does not have languageOptions.{}.githubRepoName defined. Skipping {} SDK updates.",
                        language,
                        language,
                        language
                    );
                    continue;
                }
            },
        };

        let line = config.liblab_version_for(language)?;
        tracing::debug!(
            "{}: liblab version {}, reading manifest of {}/{} via {}",
            language,
            line.map_or("unset", |l| l.as_str()),
            org,
            repo,
            source.name()
        );

        let manifest = fetch_manifest(source, &org, &repo);
        let manifest_version = manifest.as_ref().and_then(|m| {
            let version = m.engine_version();
            if version.is_none() {
                tracing::warn!(
                    "{}/{} manifest has invalid liblabVersion `{}`, regenerating",
                    org,
                    repo,
                    m.liblab_version
                );
            }
            version
        });

        // No manifest means the SDK was never generated
        let needs_update = match manifest_version {
            None => true,
            Some(ref version) => {
                let line = config.required_liblab_version_for(language)?;
                is_stale(version, line, language, engines)
            }
        };

        if !needs_update {
            tracing::info!("SDK in {} is already generated with latest liblab.", language);
            continue;
        }

        let current = fetch_current_sdk_version(source, language, &org, &repo).or_else(|| {
            config
                .options_for(language)
                .and_then(|opts| opts.recorded_sdk_version())
                .map(str::to_string)
        });

        let bump = bump_sdk_version(
            language,
            current.as_deref(),
            manifest_version.as_ref(),
            line.unwrap_or_default(),
        );

        if let Some(opts) = config.options_for_mut(language) {
            opts.sdk_version = Some(bump.to.to_string());
        }
        to_update.push(language.clone());
    }

    if !to_update.is_empty() {
        config.languages = to_update.clone();
    }

    Ok(to_update)
}

/// Load the config at `config_path`, decide the stale languages and persist
/// the narrowed config when there is anything to update.
///
/// Returns the stale languages in config order; empty means nothing to do
/// and the file was not touched.
pub fn set_languages_for_update(
    config_path: &Path,
    source: &dyn RepoFileSource,
    opts: &UpdateOptions,
) -> Result<Vec<String>, ConfigError> {
    let mut config = LiblabConfig::load(config_path)?;
    let languages = determine_languages_to_update(&mut config, source, &opts.engines)?;

    if languages.is_empty() {
        return Ok(languages);
    }

    if opts.dry_run {
        tracing::info!("Dry run - {} will not be modified", config_path.display());
    } else {
        config.save(config_path)?;
        tracing::debug!("Wrote {}", config_path.display());
    }

    Ok(languages)
}
