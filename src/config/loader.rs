// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration loading.
//!
//! The first `benchit.toml` (or `.benchit.toml`) found walking up from the
//! working directory wins, then the home directory, then
//! `$XDG_CONFIG_HOME/benchit/config.toml`. No file means built-in defaults.

use std::path::{Path, PathBuf};

use crate::error::{BenchError, ConfigError, Result, ResultExt};

use super::schema::BenchConfig;

const FILE_NAMES: &[&str] = &["benchit.toml", ".benchit.toml"];

/// Locate a configuration file for the current working directory.
pub fn find_config_file() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_file_from(&cwd)
}

/// Locate a configuration file for `start_dir`.
pub fn find_config_file_from(start_dir: &Path) -> Option<PathBuf> {
    let in_ancestors = start_dir.ancestors().flat_map(named_in);
    let in_home = dirs::home_dir().into_iter().flat_map(|home| named_in(&home));
    let in_xdg = dirs::config_dir().map(|dir| dir.join("benchit").join("config.toml"));

    in_ancestors
        .chain(in_home)
        .chain(in_xdg)
        .find(|candidate| candidate.is_file())
}

fn named_in(dir: &Path) -> Vec<PathBuf> {
    FILE_NAMES.iter().map(|name| dir.join(name)).collect()
}

/// Load the discovered configuration, or the defaults.
pub fn load_config() -> Result<BenchConfig> {
    let Some(path) = find_config_file() else {
        tracing::debug!("No benchit.toml found, using built-in profiles");
        return Ok(BenchConfig::default());
    };
    load_config_from(&path)
}

/// Load the configuration at `path`. Relative catalogue paths resolve against it.
pub fn load_config_from(path: &Path) -> Result<BenchConfig> {
    if !path.is_file() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        }
        .into());
    }

    tracing::debug!("Reading configuration {}", path.display());
    let raw = std::fs::read_to_string(path)
        .context(format!("Cannot read configuration {}", path.display()))?;

    let mut config = parse_config(&raw)?;
    config.source = Some(path.to_path_buf());
    Ok(config)
}

/// Parse a TOML document into a configuration.
pub fn parse_config(content: &str) -> Result<BenchConfig> {
    toml::from_str(content).map_err(|e| {
        BenchError::Config(ConfigError::ParseError {
            message: e.to_string(),
        })
    })
}
