//! `sdk-updater check` command

use anyhow::Result;

use crate::cli::CheckArgs;
use sdk_updater::ops::{set_languages_for_update, UpdateOptions};
use sdk_updater::sources::GitHubSource;

pub fn execute(args: CheckArgs) -> Result<()> {
    let source = GitHubSource::new(&args.source.github_api_url, args.source.github_token.clone())?;

    let opts = UpdateOptions {
        engines: args.source.engines(),
        dry_run: args.dry_run,
    };

    let languages = set_languages_for_update(&args.source.config, &source, &opts)?;

    if languages.is_empty() {
        tracing::info!("No languages need an update.");
    }
    for language in &languages {
        println!("{}", language);
    }

    Ok(())
}
