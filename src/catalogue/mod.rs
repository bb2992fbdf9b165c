// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule catalogue loading.
//!
//! A catalogue is a semicolon-delimited text file with one rule per line.
//! Malformed rows are dropped and reported, never fatal.

mod loader;
mod rule;

pub use loader::{load_catalogue, parse_catalogue, Catalogue};
pub use rule::Rule;
