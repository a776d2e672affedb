//! dirmig CLI - apply migrations from a directory

use anyhow::{Context, Result};
use clap::Parser;

mod cli;
mod context;
mod run;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level.into())
        .format_target(false)
        .init();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let result = runtime.block_on(run::execute(&cli));
    // A timed-out driver call may still occupy a blocking thread.
    runtime.shutdown_background();
    result
}
