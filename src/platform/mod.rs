// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Audited platforms and profile selection.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::config::{BenchConfig, ProfileConfig};
use crate::error::{BenchError, ConfigError, Result};

/// The kind of system the collected files came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Database,
    Linux,
    Windows,
}

impl Platform {
    /// Get platform string for display and filtering.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Database => "database",
            Platform::Linux => "linux",
            Platform::Windows => "windows",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The catalogue and benchmark chosen for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub platform: Platform,
    /// Profile name, e.g. `Debian` or `2012`.
    pub name: String,
    /// Benchmark title shown in reports.
    pub benchmark: String,
    /// Absolute or config-relative catalogue path, already resolved.
    pub catalogue: PathBuf,
}

/// Pick the profile for `platform` from configuration.
///
/// Linux profiles are tried in order; the first whose release file exists
/// under `base_path` wins.
pub fn select_profile(config: &BenchConfig, platform: Platform, base_path: &Path) -> Result<Profile> {
    let found = match platform {
        Platform::Database => config.database.as_ref(),
        Platform::Windows => config.windows.as_ref(),
        Platform::Linux => config
            .linux
            .iter()
            .find(|profile| {
                let release = base_path.join(&profile.release_file);
                debug!("Checking for {:?}", release);
                release.is_file()
            })
            .map(|linux| &linux.profile),
    };

    let profile = found.ok_or_else(|| {
        BenchError::Config(ConfigError::NoProfile {
            platform: platform.to_string(),
            path: base_path.to_path_buf(),
        })
    })?;

    info!("{} {} detected", profile.name, platform);
    Ok(build_profile(config, platform, profile))
}

fn build_profile(config: &BenchConfig, platform: Platform, profile: &ProfileConfig) -> Profile {
    Profile {
        platform,
        name: profile.name.clone(),
        benchmark: profile.benchmark.clone(),
        catalogue: config.resolve_path(&profile.catalogue),
    }
}
