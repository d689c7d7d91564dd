// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for the ForkThis CLI.
//!
//! Uses `tracing` with `tracing-subscriber`. Log output goes to stderr so
//! JSON on stdout stays machine-readable. `RUST_LOG` overrides the default
//! filter:
//!
//! ```bash
//! RUST_LOG=forkthis=debug forkthis search rust-lang/rust
//! ```

use anyhow::{Context, Result};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize the logging subsystem.
///
/// With `verbose`, ForkThis' own events are shown at info level; otherwise
/// only warnings are. Dependencies stay at error level unless `RUST_LOG`
/// says otherwise.
pub fn init_logging(verbose: bool) -> Result<()> {
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let default_filter = if verbose {
        "forkthis=info,forkthis_core=info,octocrab=error,reqwest=error"
    } else {
        "forkthis=warn,forkthis_core=warn,octocrab=error,reqwest=error"
    };
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .context("Invalid log filter directives")?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
    Ok(())
}
