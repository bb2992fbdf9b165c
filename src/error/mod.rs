// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Error types for benchit.
//!
//! Only a handful of these are fatal. Per-row, per-rule and per-file errors
//! are collected into the audit result instead of being propagated.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for benchit operations.
#[derive(Error, Debug)]
pub enum BenchError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Engine errors that stop the whole run
    #[error("Audit error: {0}")]
    Audit(#[from] AuditError),

    // Report rendering errors
    #[error("Report error: {0}")]
    Render(#[from] RenderError),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("Nothing to audit: no {platform} profile matches {path}")]
    NoProfile { platform: String, path: PathBuf },
}

/// Errors that abort an audit invocation.
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Target directory not found: {path}")]
    TargetDirectoryMissing { path: PathBuf },

    #[error("Failed to read rule catalogue {path}: {message}")]
    CatalogueUnreadable { path: PathBuf, message: String },

    #[error("Failed to start worker pool: {message}")]
    WorkerPool { message: String },
}

/// Report rendering errors.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Template error: {message}")]
    Template { message: String },

    #[error("CSV error: {message}")]
    Csv { message: String },

    #[error("Failed to write {path}: {message}")]
    WriteFailed { path: PathBuf, message: String },
}

/// Why a single catalogue row was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowProblem {
    #[error("expected 8 fields, found {found}")]
    FieldCount { found: usize },

    #[error("expected True or False, found '{token}'")]
    InvalidBoolean { token: String },

    #[error("file name is empty")]
    EmptyFileName,

    #[error("row is not readable: {message}")]
    Unreadable { message: String },
}

/// A malformed catalogue row. The row is dropped, the catalogue survives.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("catalogue line {line}: {problem}")]
pub struct CatalogueRowError {
    /// 1-based line number in the catalogue source.
    pub line: u64,
    /// What was wrong with the row.
    pub problem: RowProblem,
}

/// A rule pattern that is not a valid regular expression.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("invalid pattern for chapter {chapter_id}: {message}")]
pub struct PatternCompileError {
    pub chapter_id: String,
    pub message: String,
}

/// A resolved target file that could not be scanned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FileAccessError {
    #[error("cannot read {path}: {message}")]
    Unreadable { path: PathBuf, message: String },

    #[error("{path} is not a text file")]
    NotText { path: PathBuf },
}

/// Result type alias for benchit operations.
pub type Result<T> = std::result::Result<T, BenchError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: std::error::Error + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| BenchError::WithContext {
            context: context.into(),
            message: e.to_string(),
        })
    }
}
