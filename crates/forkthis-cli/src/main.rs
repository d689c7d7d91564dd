// SPDX-License-Identifier: Apache-2.0

//! ForkThis - find approachable GitHub issues with AI summaries.
//!
//! Searches a repository's open issues, attaches AI summaries, and keeps
//! bookmarks, projects, history and the theme in a local store.

mod cli;
mod commands;
mod errors;
mod logging;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use crate::cli::{Cli, OutputContext};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose)?;

    let output_ctx = OutputContext::from_cli(cli.output, cli.quiet, cli.verbose);

    let config = forkthis_core::load_config().context("Failed to load configuration")?;
    debug!("Configuration loaded successfully");

    match commands::run(cli.command, output_ctx, config).await {
        Ok(()) => Ok(()),
        Err(e) => {
            let formatted = errors::format_error(&e);
            eprintln!("Error: {formatted}");
            std::process::exit(1);
        }
    }
}
