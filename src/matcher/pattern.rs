// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule compilation and line scanning.

use std::sync::Arc;

use regex::Regex;
use serde::Serialize;
use tracing::warn;

use crate::catalogue::Rule;
use crate::error::PatternCompileError;

/// One place where a rule's pattern matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchOccurrence {
    /// Captured group values in group order. Empty when the pattern has no groups.
    pub captured_groups: Vec<String>,
    /// 1-based line number.
    pub line: usize,
}

impl MatchOccurrence {
    /// The value used for comparison: the first captured group.
    pub fn value(&self) -> Option<&str> {
        self.captured_groups.first().map(String::as_str)
    }
}

/// A rule whose pattern compiled.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    /// Position of the rule in its catalogue.
    pub index: usize,
    pub rule: Arc<Rule>,
    regex: Regex,
}

/// A rule that cannot be evaluated.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedRule {
    pub rule: Arc<Rule>,
    pub reason: PatternCompileError,
}

/// Result of compiling one rule.
#[derive(Debug, Clone)]
pub enum RuleProgram {
    Compiled(CompiledRule),
    Skipped(SkippedRule),
}

/// Compile a rule's pattern.
pub fn compile_rule(index: usize, rule: Arc<Rule>) -> RuleProgram {
    match Regex::new(&rule.pattern) {
        Ok(regex) => RuleProgram::Compiled(CompiledRule { index, rule, regex }),
        Err(e) => {
            let err = PatternCompileError {
                chapter_id: rule.chapter_id.clone(),
                message: e.to_string(),
            };
            warn!("Skipping rule: {}", err);
            RuleProgram::Skipped(SkippedRule { rule, reason: err })
        }
    }
}

impl CompiledRule {
    /// Whether the pattern has any capturing group.
    pub fn has_captures(&self) -> bool {
        self.regex.captures_len() > 1
    }

    /// Scan `content` line by line.
    pub fn scan(&self, content: &str) -> Vec<MatchOccurrence> {
        let groups = self.regex.captures_len() - 1;

        content
            .lines()
            .enumerate()
            .filter_map(|(i, line)| {
                let caps = self.regex.captures(line)?;
                let captured_groups = (1..=groups)
                    .map(|g| {
                        caps.get(g)
                            .map(|m| m.as_str().to_string())
                            .unwrap_or_default()
                    })
                    .collect();
                Some(MatchOccurrence {
                    captured_groups,
                    line: i + 1,
                })
            })
            .collect()
    }
}
