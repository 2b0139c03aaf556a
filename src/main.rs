// SPDX-License-Identifier: MIT
//
// tonal: derive tonal color systems from a seed color or an image.
//
// This is the binary that wires the crates together:
//
//   tonal-color   → sRGB, CAM16 and HCT conversion
//   tonal-extract → image sampling, k-means, primary selection
//   tonal-theme   → ramps, themes, contrast, color vision, exporters
//
// Flow:
//
//   argv → cli::Cli (clap) → config::Config::load → commands::run → stdout
//
// Diagnostics go through tracing to stderr (see logging.rs); errors are
// printed once, with their context chain, and exit with status 1.

mod cli;
mod commands;
mod config;
mod format;
mod logging;

use std::io::{self, Write};
use std::process;

use clap::Parser;
use cli::Cli;
use config::Config;

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;
    let config = Config::load(cli.config.as_deref())?;
    let output = commands::run(&cli, &config)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("tonal: {e:#}");
        process::exit(1);
    }
}
