//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use semver::Version;

use sdk_updater::core::config::DEFAULT_LIBLAB_CONFIG_PATH;
use sdk_updater::core::engine::{LATEST_CODE_GEN_VERSION, LATEST_SDK_GEN_VERSION};
use sdk_updater::sources::DEFAULT_GITHUB_API_URL;
use sdk_updater::util::context::DEFAULT_LAUNCHER;
use sdk_updater::EngineVersions;

/// sdk-updater - rebuild liblab SDKs that are behind the latest generator
#[derive(Parser)]
#[command(name = "sdk-updater")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Update stale SDKs: bump versions, build, and open PRs
    Run(RunArgs),

    /// List the languages that need an update and narrow the config to them
    ///
    /// The config file is rewritten with the bumped SDK versions, exactly as
    /// `run` would before building. Pass --dry-run to leave it untouched.
    Check(CheckArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Where the config lives and how SDK repositories are read.
#[derive(Args)]
pub struct SourceArgs {
    /// Path to liblab.config.json
    #[arg(long, env = "LIBLAB_CONFIG_PATH", default_value = DEFAULT_LIBLAB_CONFIG_PATH)]
    pub config: PathBuf,

    /// GitHub token for reading SDK repositories
    #[arg(long, env = "LIBLAB_GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// GitHub REST API endpoint
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_GITHUB_API_URL)]
    pub github_api_url: String,

    /// Latest released code-gen engine version
    #[arg(long, env = "LIBLAB_CODE_GEN_VERSION", default_value = LATEST_CODE_GEN_VERSION)]
    pub code_gen_version: Version,

    /// Latest released sdk-gen engine version
    #[arg(long, env = "LIBLAB_SDK_GEN_VERSION", default_value = LATEST_SDK_GEN_VERSION)]
    pub sdk_gen_version: Version,
}

impl SourceArgs {
    /// Engine releases to compare manifests against.
    pub fn engines(&self) -> EngineVersions {
        EngineVersions::new(self.code_gen_version.clone(), self.sdk_gen_version.clone())
    }
}

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// liblab API token, exported to the liblab CLI
    #[arg(long, env = "LIBLAB_TOKEN", hide_env_values = true)]
    pub liblab_token: String,

    /// Program that launches the liblab CLI
    #[arg(long, env = "SDK_UPDATER_LAUNCHER", default_value = DEFAULT_LAUNCHER)]
    pub npx: String,

    /// File to append the `status` output to
    #[arg(long, env = "GITHUB_OUTPUT")]
    pub github_output: Option<PathBuf>,
}

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Don't rewrite the config file
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
