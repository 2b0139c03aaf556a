// SPDX-License-Identifier: MIT
//
// Diagnostics go to stderr so stdout stays clean for exported artefacts.
// Filter comes from TONAL_LOG (EnvFilter syntax), else `warn`, else `debug`
// under --verbose.

use anyhow::{Result, anyhow};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

pub const LOG_ENV: &str = "TONAL_LOG";

fn filter(verbose: bool) -> EnvFilter {
    let default = if verbose { "debug" } else { "warn" };
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the global subscriber. Fails if one is already set.
pub fn init(verbose: bool) -> Result<()> {
    tracing_subscriber::registry()
        .with(filter(verbose))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {e}"))
}
