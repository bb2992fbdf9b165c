// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The rule record.

use crate::error::RowProblem;
use serde::Serialize;

/// Number of fields in a catalogue row.
pub const FIELD_COUNT: usize = 8;

/// One audit check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    /// Whether a match is the compliant condition.
    pub expect_match: bool,
    /// Name of the target file, e.g. `sshd_config`.
    pub file_name: String,
    /// Regular expression applied to each line of the target.
    pub pattern: String,
    /// Baseline chapter reference, e.g. `9.2.1`.
    pub chapter_id: String,
    /// Chapter title.
    pub title: String,
    /// Short description of the check.
    pub summary: String,
    /// Historically acceptable values.
    pub default_values: Vec<String>,
    /// The fully compliant value.
    pub expected_value: String,
}

impl Rule {
    /// Build a rule from the fields of one catalogue row.
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Result<Self, RowProblem> {
        if fields.len() != FIELD_COUNT {
            return Err(RowProblem::FieldCount {
                found: fields.len(),
            });
        }

        let field = |i: usize| fields[i].as_ref();

        let expect_match = parse_expectation(field(0))?;
        let file_name = field(1).trim().to_string();
        if file_name.is_empty() {
            return Err(RowProblem::EmptyFileName);
        }

        Ok(Self {
            expect_match,
            file_name,
            pattern: field(2).to_string(),
            chapter_id: field(3).trim().to_string(),
            title: field(4).trim().to_string(),
            summary: field(5).trim().to_string(),
            default_values: split_defaults(field(6)),
            expected_value: field(7).trim().to_string(),
        })
    }

    /// Whether `value` is one of the historically acceptable values.
    pub fn is_default(&self, value: &str) -> bool {
        self.default_values.iter().any(|d| d == value)
    }

    /// Default values in their source form.
    pub fn defaults_joined(&self) -> String {
        self.default_values.join(",")
    }
}

fn parse_expectation(token: &str) -> Result<bool, RowProblem> {
    let token = token.trim();
    if token.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if token.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(RowProblem::InvalidBoolean {
            token: token.to_string(),
        })
    }
}

fn split_defaults(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}
