// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Pattern matching against target file content.
//!
//! Patterns are compiled once per rule. A pattern that does not compile
//! turns its rule into a [`SkippedRule`]; the rest of the batch is unaffected.

mod content;
mod pattern;
mod registry;

pub use content::{decode_text, read_target};
pub use pattern::{compile_rule, CompiledRule, MatchOccurrence, RuleProgram, SkippedRule};
pub use registry::decode_registry_value;
