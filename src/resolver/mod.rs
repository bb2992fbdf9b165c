// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Target file resolution.
//!
//! Maps a rule's file name to the copies of that file found under the
//! audited base directory. Finding nothing is not an error.

mod walker;

pub use walker::{ListingMode, TargetResolver};

