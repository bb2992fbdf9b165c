// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI module for benchit.
//!
//! This module handles command-line argument parsing and runs the audit.

pub mod args;
mod dispatch;

pub use args::{Cli, OutputFormat};
pub use dispatch::run;
