// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! benchit - offline security baseline auditor
//!
//! Audits configuration files collected from Linux, Windows or database
//! hosts against a catalogue of regular-expression rules.
//!
//! # Features
//!
//! - **Rule Catalogue**: Semicolon-separated rules, bad rows skipped with a warning
//! - **Target Resolution**: Finds every copy of a file under the collected tree
//! - **Value Checks**: Captured values compared to expected and legacy defaults
//! - **Reports**: HTML, CSV and JSON output grouped by benchmark chapter
//!
//! # Example
//!
//! ```no_run
//! use benchit::audit::{AuditEngine, EngineOptions};
//! use benchit::catalogue::load_catalogue;
//! use benchit::platform::Platform;
//! use std::path::Path;
//!
//! let catalogue = load_catalogue(Path::new("catalogues/debian.csv")).unwrap();
//! let engine = AuditEngine::new(EngineOptions::new("/srv/collected/web01", Platform::Linux));
//! let record = engine.run(&catalogue).unwrap();
//!
//! println!("{} compliant of {}", record.summary().compliant, record.summary().total);
//! ```

// Module declarations
pub mod audit;
pub mod catalogue;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod matcher;
pub mod platform;
pub mod render;
pub mod resolver;

// Re-exports for convenience
pub use config::BenchConfig;
pub use error::{BenchError, Result};

/// Version information embedded at compile time.
pub mod version {
    /// The current version of benchit.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// The git SHA at compile time (if available).
    pub const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");

    /// Get a formatted version string.
    pub fn version_string() -> String {
        match GIT_SHA {
            Some(sha) => format!("{} ({})", VERSION, &sha[..7.min(sha.len())]),
            None => VERSION.to_string(),
        }
    }

}
