// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI argument definitions using clap.

use clap::{ArgGroup, Parser};
use std::path::PathBuf;

use crate::platform::Platform;
use crate::resolver::ListingMode;

/// benchit - offline security baseline auditor
///
/// Checks configuration files collected from a host against a catalogue
/// of regular-expression rules and writes HTML and CSV reports.
#[derive(Parser, Debug)]
#[command(name = "benchit")]
#[command(author = "Eshan Roy")]
#[command(version)]
#[command(about = "Audit collected configuration files against a security baseline", long_about = None)]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .multiple(false)
        .args(["database", "linux", "windows"])
))]
pub struct Cli {
    /// Audit a database configuration
    #[arg(short, long)]
    pub database: bool,

    /// Audit a Linux system
    #[arg(short, long)]
    pub linux: bool,

    /// Audit a Windows system
    #[arg(short, long)]
    pub windows: bool,

    /// Report file prefix (a timestamp and extension are appended)
    #[arg(short, long, value_name = "PREFIX")]
    pub output: Option<String>,

    /// Directory holding the collected files
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub path: PathBuf,

    /// Log progress
    #[arg(short, long)]
    pub verbose: bool,

    /// Only look for files directly under the base path
    #[arg(short, long = "skipdirlist", visible_alias = "skip-dirlist")]
    pub skipdirlist: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Rule catalogue to use instead of the profile's
    #[arg(long, value_name = "FILE")]
    pub catalogue: Option<PathBuf>,

    /// Console output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Worker threads (0 picks a default)
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Do not write the HTML report
    #[arg(long)]
    pub no_html: bool,

    /// Do not write the CSV report
    #[arg(long)]
    pub no_csv: bool,
}

/// Output format for the console summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Coloured findings and counts (default)
    #[default]
    Text,
    /// The full audit record as JSON
    Json,
}

impl Cli {
    /// The platform selected by `-d`, `-l` or `-w`.
    pub fn platform(&self) -> Platform {
        if self.database {
            Platform::Database
        } else if self.windows {
            Platform::Windows
        } else {
            Platform::Linux
        }
    }

    /// Directory listing mode selected by `--skipdirlist`.
    pub fn listing_mode(&self) -> ListingMode {
        if self.skipdirlist {
            ListingMode::RootOnly
        } else {
            ListingMode::Recursive
        }
    }

    /// Whether anything above `warn` is logged.
    pub fn is_quiet(&self) -> bool {
        !self.verbose && !self.debug
    }
}
