// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Command execution.

use std::time::Duration;

use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};

use crate::audit::{AuditEngine, AuditRecord, EngineOptions};
use crate::catalogue::{load_catalogue, Catalogue};
use crate::config::BenchConfig;
use crate::error::{AuditError, Result};
use crate::platform::{select_profile, Profile};
use crate::render::{print_record, write_reports, ReportFormats, ReportMeta};

use super::args::{Cli, OutputFormat};

/// Run the CLI with the given arguments.
pub fn run(cli: Cli) -> Result<()> {
    if !cli.path.is_dir() {
        return Err(AuditError::TargetDirectoryMissing {
            path: cli.path.clone(),
        }
        .into());
    }

    // Load configuration
    let config = if let Some(config_path) = &cli.config {
        BenchConfig::load_from(config_path)?
    } else {
        BenchConfig::load()?
    };

    let profile = resolve_profile(&cli, &config)?;
    let catalogue = load_catalogue(&profile.catalogue)?;
    tracing::info!(
        "{} rules loaded from {}",
        catalogue.len(),
        profile.catalogue.display()
    );

    let engine = AuditEngine::new(engine_options(&cli, &config)?);
    let record = run_engine(&cli, &engine, &catalogue)?;

    let mut meta = ReportMeta::new(profile, &cli.path);
    meta.rejected = catalogue.rejected;
    print_record(&record, &meta, cli.format);

    let formats = ReportFormats {
        html: config.report.html && !cli.no_html,
        csv: config.report.csv && !cli.no_csv,
    };
    let prefix = cli.output.as_deref().unwrap_or(&config.report.output);
    let written = write_reports(&record, &meta, prefix, formats)?;

    if cli.format == OutputFormat::Text {
        for path in &written {
            println!("{} Created {}", style("✓").green().bold(), path.display());
        }
    }

    Ok(())
}

/// Pick the profile for the selected platform, or build one around `--catalogue`.
fn resolve_profile(cli: &Cli, config: &BenchConfig) -> Result<Profile> {
    let platform = cli.platform();

    match &cli.catalogue {
        Some(catalogue) => {
            // An explicit catalogue still borrows the profile's names when one matches.
            let (name, benchmark) = match select_profile(config, platform, &cli.path) {
                Ok(profile) => (profile.name, profile.benchmark),
                Err(_) => (platform.to_string(), "Custom rule catalogue".to_string()),
            };
            Ok(Profile {
                platform,
                name,
                benchmark,
                catalogue: catalogue.clone(),
            })
        }
        None => select_profile(config, platform, &cli.path),
    }
}

fn engine_options(cli: &Cli, config: &BenchConfig) -> Result<EngineOptions> {
    let mut options = EngineOptions::new(&cli.path, cli.platform());
    options.listing = cli.listing_mode();
    options.relational = config.engine.relational;
    options.open_expected = config.engine.open_expected;
    options.exclude = config.engine.exclude_patterns()?;
    options.jobs = cli.jobs.unwrap_or(config.engine.jobs);
    Ok(options)
}

fn run_engine(cli: &Cli, engine: &AuditEngine, catalogue: &Catalogue) -> Result<AuditRecord> {
    if !(cli.is_quiet() && Term::stderr().is_term()) {
        return engine.run(catalogue);
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Evaluating {} rules...", catalogue.len()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = engine.run(catalogue);
    spinner.finish_and_clear();
    result
}
