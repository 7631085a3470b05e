//! `sdk-updater run` command
//!
//! Always reports a `status` (skipped, success or failed), on stdout and in
//! the GitHub Actions output file when one is configured.

use anyhow::Result;

use crate::cli::RunArgs;
use sdk_updater::ops::run::{escape_workflow_message, write_status_output};
use sdk_updater::ops::{run, RunStatus};
use sdk_updater::RunContext;

pub fn execute(args: RunArgs) -> Result<()> {
    let outcome = run_updater(&args);

    let status = match outcome {
        Ok(status) => status,
        Err(_) => RunStatus::Failed,
    };

    println!("status={}", status);
    if let Some(ref path) = args.github_output {
        if let Err(e) = write_status_output(path, status) {
            tracing::warn!("{:#}", e);
        }
    }

    if let Err(ref e) = outcome {
        println!("::error::{}", escape_workflow_message(&format!("{:#}", e)));
    }

    outcome.map(|_| ())
}

fn run_updater(args: &RunArgs) -> Result<RunStatus> {
    let ctx = RunContext::new(args.liblab_token.clone(), args.source.github_token.clone())
        .with_config_path(&args.source.config)
        .with_github_api_url(&args.source.github_api_url)
        .with_launcher(&args.npx)
        .with_engines(args.source.engines());

    tracing::debug!("{:?}", ctx);

    let source = ctx.github_source()?;
    run(&ctx, &source)
}
