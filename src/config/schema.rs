// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration schema definitions.
//!
//! Defines all configuration structures that can be loaded from benchit.toml.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{BenchError, ConfigError, Result};

/// The main configuration structure for benchit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Evaluation settings.
    pub engine: EngineConfig,

    /// Report output settings.
    pub report: ReportConfig,

    /// Database audit profile.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<ProfileConfig>,

    /// Windows audit profile.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub windows: Option<ProfileConfig>,

    /// Linux audit profiles, tried in order.
    pub linux: Vec<LinuxProfileConfig>,

    /// File this configuration was read from.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        super::default::default_config()
    }
}

impl BenchConfig {
    /// Load configuration from the default locations.
    pub fn load() -> Result<Self> {
        super::loader::load_config()
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        super::loader::load_config_from(path)
    }

    /// Resolve a path from the configuration relative to the config file.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            return path.to_path_buf();
        }
        match self.source.as_deref().and_then(Path::parent) {
            Some(dir) => dir.join(path),
            None => path.to_path_buf(),
        }
    }
}

/// Evaluation settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    /// Treat `>N` / `<N` expected values as integer bounds.
    pub relational: bool,

    /// Let an empty expected value accept any captured value.
    pub open_expected: bool,

    /// Worker threads (0 picks a default).
    pub jobs: usize,

    /// Glob patterns, relative to the base path, that are never scanned.
    pub exclude: Vec<String>,
}

impl EngineConfig {
    /// Compile the exclude globs.
    pub fn exclude_patterns(&self) -> Result<Vec<glob::Pattern>> {
        self.exclude
            .iter()
            .map(|raw| {
                glob::Pattern::new(raw).map_err(|e| {
                    BenchError::Config(ConfigError::InvalidValue {
                        key: "engine.exclude".to_string(),
                        message: format!("'{}': {}", raw, e),
                    })
                })
            })
            .collect()
    }
}

/// Report output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Output file prefix; a timestamp and extension are appended.
    pub output: String,

    /// Whether to write the HTML report.
    pub html: bool,

    /// Whether to write the CSV report.
    pub csv: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output: "results".to_string(),
            html: true,
            csv: true,
        }
    }
}

/// One audit profile: which catalogue to use and what it is called.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ProfileConfig {
    /// Short name, e.g. `Oracle` or `2012`.
    pub name: String,

    /// Benchmark title shown in reports.
    pub benchmark: String,

    /// Rule catalogue path.
    pub catalogue: PathBuf,
}

/// A Linux profile, selected by the presence of a release file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinuxProfileConfig {
    /// Release file relative to the base path, e.g. `etc/redhat-release`.
    pub release_file: PathBuf,

    #[serde(flatten)]
    pub profile: ProfileConfig,
}
