// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration module for benchit.
//!
//! Configuration comes from benchit.toml (searched upwards from the current
//! directory, then the home and XDG config directories) or built-in defaults.

pub mod default;
mod loader;
mod schema;

pub use default::default_config;
pub use loader::{find_config_file, find_config_file_from, load_config, parse_config};
pub use schema::*;
