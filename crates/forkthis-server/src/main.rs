// SPDX-License-Identifier: Apache-2.0

//! Binary entry point for the ForkThis HTTP server.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// ForkThis HTTP API
#[derive(Debug, Parser)]
#[command(name = "forkthis-server", version, about)]
struct Args {
    /// Address to bind (overrides `server.host`)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides `server.port`)
    #[arg(long, short)]
    port: Option<u16>,
}

fn init_logging() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("forkthis=info,tower_http=warn,octocrab=error,reqwest=error"))
        .context("invalid log filter")?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging()?;

    let config = forkthis_core::load_config()?;
    let host = args.host.unwrap_or_else(|| config.server.host.clone());
    let port = args.port.unwrap_or(config.server.port);

    let state = forkthis_server::build_state(config)?;
    forkthis_server::run_http(state, &host, port).await
}
