//! The full updater run: decide, build, publish.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::ops::update_languages::{set_languages_for_update, UpdateOptions};
use crate::sources::RepoFileSource;
use crate::util::process::find_executable;
use crate::util::{ProcessBuilder, RunContext};

/// Arguments to the launcher for building the SDKs.
pub const BUILD_ARGS: [&str; 4] = ["--yes", "liblab", "build", "--yes"];

/// Arguments to the launcher for opening the pull requests.
pub const PUBLISH_ARGS: [&str; 3] = ["--yes", "liblab", "pr"];

/// Outcome reported to the CI system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// No language needed an update.
    Skipped,
    /// SDKs were built and PRs opened.
    Success,
    Failed,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Skipped => "skipped",
            RunStatus::Success => "success",
            RunStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run the updater end to end.
///
/// Returns [`RunStatus::Skipped`] without building anything when every SDK is
/// current. Configuration errors and a failing build or publish step are
/// returned as errors.
pub fn run(ctx: &RunContext, source: &dyn RepoFileSource) -> Result<RunStatus> {
    let opts = UpdateOptions {
        engines: ctx.engines().clone(),
        dry_run: false,
    };

    let languages = set_languages_for_update(ctx.config_path(), source, &opts)?;
    if languages.is_empty() {
        tracing::info!(
            "************ No languages need an update. Skipping the builds. ************"
        );
        return Ok(RunStatus::Skipped);
    }

    tracing::info!(
        "************ Languages that need update: {} ************",
        languages.join(", ")
    );

    let launcher = find_executable(ctx.launcher())
        .with_context(|| format!("`{}` not found in PATH", ctx.launcher()))?;

    tracing::info!("************ Building SDKs ************");
    ProcessBuilder::new(&launcher)
        .args(BUILD_ARGS)
        .envs(ctx.tool_env())
        .stream_and_check()?;
    tracing::info!("************ Finished building SDKs ************");

    tracing::info!("************ Publishing PRs ************");
    ProcessBuilder::new(&launcher)
        .args(PUBLISH_ARGS)
        .envs(ctx.tool_env())
        .stream_and_check()?;
    tracing::info!("************ Finished publishing PRs ************");

    Ok(RunStatus::Success)
}

/// Append `status=<status>` to a GitHub Actions output file.
pub fn write_status_output(path: &Path, status: RunStatus) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open output file: {}", path.display()))?;

    writeln!(file, "status={}", status)
        .with_context(|| format!("failed to write output file: {}", path.display()))
}

/// Escape a message for a GitHub Actions `::error::` workflow command.
pub fn escape_workflow_message(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
