// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Verdicts.

use serde::Serialize;
use std::fmt;

/// Outcome of evaluating one rule against one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Compliant,
    NonCompliant,
    Warning,
    NotApplicable,
    Error,
}

impl Verdict {
    /// All verdicts, in report order.
    pub const ALL: [Verdict; 5] = [
        Verdict::Compliant,
        Verdict::NonCompliant,
        Verdict::Warning,
        Verdict::NotApplicable,
        Verdict::Error,
    ];

    /// Short label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Compliant => "Pass",
            Verdict::NonCompliant => "Fail",
            Verdict::Warning => "Warning",
            Verdict::NotApplicable => "N/A",
            Verdict::Error => "Error",
        }
    }

    /// CSS-friendly identifier.
    pub fn slug(&self) -> &'static str {
        match self {
            Verdict::Compliant => "compliant",
            Verdict::NonCompliant => "non-compliant",
            Verdict::Warning => "warning",
            Verdict::NotApplicable => "not-applicable",
            Verdict::Error => "error",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
