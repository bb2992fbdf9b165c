// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! benchit - offline security baseline auditor.

use benchit::cli::{run, Cli};
use benchit::version::version_string;
use clap::Parser;
use console::style;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Set up logging
    setup_logging(cli.verbose, cli.debug);

    eprintln!(
        "{} {}",
        style("benchit").bold(),
        style(version_string()).dim()
    );

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Set up logging/tracing.
fn setup_logging(verbose: bool, debug: bool) {
    let filter = if debug {
        EnvFilter::try_new("benchit=debug,warn").unwrap_or_else(|_| EnvFilter::new("warn"))
    } else if verbose {
        EnvFilter::try_new("benchit=info,warn").unwrap_or_else(|_| EnvFilter::new("warn"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    if debug {
        tracing::debug!("Debug logging enabled");
    }
}
