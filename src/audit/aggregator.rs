// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Result accumulation.

use crate::matcher::SkippedRule;

use super::chapter::compare_chapters;
use super::record::{AuditEntry, AuditRecord, Summary};

/// Collects entries for one invocation. Workers fill their own
/// aggregator and the results are merged afterwards.
#[derive(Debug, Default)]
pub struct Aggregator {
    entries: Vec<AuditEntry>,
    summary: Summary,
    skipped: Vec<SkippedRule>,
}

impl Aggregator {
    /// Create an empty aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one (rule, file) outcome.
    pub fn record(&mut self, entry: AuditEntry) {
        self.summary.add(entry.verdict);
        self.entries.push(entry);
    }

    /// Note a rule that produced no verdict.
    pub fn skip(&mut self, skipped: SkippedRule) {
        self.skipped.push(skipped);
    }

    /// Fold a partial result into this one.
    pub fn merge(&mut self, other: Aggregator) {
        self.summary.merge(&other.summary);
        self.entries.extend(other.entries);
        self.skipped.extend(other.skipped);
    }

    /// Number of entries so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Order the entries and seal the record.
    pub fn finish(mut self) -> AuditRecord {
        self.entries.sort_by(|a, b| {
            compare_chapters(&a.rule.chapter_id, &b.rule.chapter_id)
                .then(a.rule_index.cmp(&b.rule_index))
                .then_with(|| a.file_path.cmp(&b.file_path))
        });
        self.skipped
            .sort_by(|a, b| compare_chapters(&a.rule.chapter_id, &b.rule.chapter_id));

        AuditRecord::new(self.entries, self.summary, self.skipped)
    }
}
