// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Outcome classification.
//!
//! Turns what the matcher saw in one file into exactly one [`Verdict`].
//! Rules with `expect_match = false` describe forbidden settings, so any
//! match is a violation. Rules with `expect_match = true` describe required
//! settings; a capturing group separates the hardened value (compliant), a
//! legacy default (warning) and anything else (non-compliant).

mod verdict;

pub use verdict::Verdict;

use crate::catalogue::Rule;
use crate::matcher::MatchOccurrence;

/// What was found for one resolved target.
#[derive(Debug, Clone, Copy)]
pub enum Observation<'a> {
    /// No file with the rule's name exists.
    Absent,
    /// The file exists but could not be read as text.
    Unreadable,
    /// The file was scanned; occurrences in line order.
    Scanned(&'a [MatchOccurrence]),
}

/// Knobs that change value comparison.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassifierOptions {
    /// Treat expected values like `>14` or `<90` as integer bounds.
    pub relational: bool,
    /// An empty expected value accepts any captured value.
    pub open_expected: bool,
}

/// A verdict and the value it was based on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub verdict: Verdict,
    pub matched_value: Option<String>,
}

impl Classification {
    fn new(verdict: Verdict, matched_value: Option<String>) -> Self {
        Self {
            verdict,
            matched_value,
        }
    }
}

/// Classify one (rule, file) observation.
pub fn classify(
    rule: &Rule,
    observation: Observation<'_>,
    options: ClassifierOptions,
) -> Classification {
    let occurrences = match observation {
        Observation::Absent => return Classification::new(Verdict::NotApplicable, None),
        Observation::Unreadable => return Classification::new(Verdict::Error, None),
        Observation::Scanned(occurrences) => occurrences,
    };

    // Only the first occurrence decides.
    let first = occurrences.first();
    let value = first.and_then(MatchOccurrence::value).map(|v| v.trim().to_string());

    if !rule.expect_match {
        return match first {
            Some(_) => Classification::new(Verdict::NonCompliant, value),
            None => Classification::new(Verdict::Compliant, None),
        };
    }

    match (first, value) {
        (None, _) => Classification::new(Verdict::NonCompliant, None),
        (Some(_), None) => Classification::new(Verdict::Compliant, None),
        (Some(_), Some(value)) => {
            let verdict = compare_value(rule, &value, options);
            Classification::new(verdict, Some(value))
        }
    }
}

fn compare_value(rule: &Rule, value: &str, options: ClassifierOptions) -> Verdict {
    let expected = rule.expected_value.trim();

    if value == expected || (options.open_expected && expected.is_empty()) {
        Verdict::Compliant
    } else if options.relational && within_bound(value, expected) {
        Verdict::Compliant
    } else if rule.is_default(value) {
        Verdict::Warning
    } else {
        Verdict::NonCompliant
    }
}

/// `>N` accepts values `>= N`, `<N` accepts values `<= N`.
fn within_bound(value: &str, expected: &str) -> bool {
    let Ok(actual) = value.parse::<i64>() else {
        return false;
    };

    if let Some(bound) = expected.strip_prefix('>') {
        bound.trim().parse::<i64>().map(|b| actual >= b).unwrap_or(false)
    } else if let Some(bound) = expected.strip_prefix('<') {
        bound.trim().parse::<i64>().map(|b| actual <= b).unwrap_or(false)
    } else {
        false
    }
}
