// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The audit record handed to reporting.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;

use crate::catalogue::Rule;
use crate::classifier::Verdict;
use crate::matcher::{MatchOccurrence, SkippedRule};

use super::chapter::compare_chapters;

/// One (rule, file) outcome.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEntry {
    pub rule: Arc<Rule>,
    /// The scanned file; `None` when no file resolved.
    pub file_path: Option<PathBuf>,
    pub verdict: Verdict,
    /// The captured value the verdict was based on.
    pub matched_value: Option<String>,
    /// Every occurrence found, in line order.
    pub occurrences: Vec<MatchOccurrence>,
    /// Why the entry is an error, if it is one.
    pub detail: Option<String>,
    /// Position of the rule in its catalogue.
    #[serde(skip)]
    pub rule_index: usize,
}

/// Counts per verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub compliant: usize,
    pub non_compliant: usize,
    pub warning: usize,
    pub not_applicable: usize,
    pub error: usize,
}

impl Summary {
    /// Count one verdict.
    pub fn add(&mut self, verdict: Verdict) {
        self.total += 1;
        *self.slot(verdict) += 1;
    }

    /// Add another summary's counts.
    pub fn merge(&mut self, other: &Summary) {
        self.total += other.total;
        for verdict in Verdict::ALL {
            *self.slot(verdict) += other.count(verdict);
        }
    }

    /// Number of entries with `verdict`.
    pub fn count(&self, verdict: Verdict) -> usize {
        match verdict {
            Verdict::Compliant => self.compliant,
            Verdict::NonCompliant => self.non_compliant,
            Verdict::Warning => self.warning,
            Verdict::NotApplicable => self.not_applicable,
            Verdict::Error => self.error,
        }
    }

    /// Share of entries with `verdict`, 0..=100.
    pub fn percent(&self, verdict: Verdict) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.count(verdict) as f64 * 100.0 / self.total as f64
        }
    }

    fn slot(&mut self, verdict: Verdict) -> &mut usize {
        match verdict {
            Verdict::Compliant => &mut self.compliant,
            Verdict::NonCompliant => &mut self.non_compliant,
            Verdict::Warning => &mut self.warning,
            Verdict::NotApplicable => &mut self.not_applicable,
            Verdict::Error => &mut self.error,
        }
    }
}

/// Entries sharing one chapter id.
#[derive(Debug, Clone)]
pub struct ChapterGroup<'a> {
    pub chapter_id: &'a str,
    pub entries: Vec<&'a AuditEntry>,
}

impl ChapterGroup<'_> {
    /// The worst verdict in the group.
    pub fn worst(&self) -> Option<Verdict> {
        self.entries.iter().map(|e| e.verdict).max_by_key(|v| severity(*v))
    }
}

fn severity(verdict: Verdict) -> u8 {
    match verdict {
        Verdict::NotApplicable => 0,
        Verdict::Compliant => 1,
        Verdict::Warning => 2,
        Verdict::Error => 3,
        Verdict::NonCompliant => 4,
    }
}

/// Result of one audit run. Read-only once built.
#[derive(Debug, Clone, Serialize)]
pub struct AuditRecord {
    entries: Vec<AuditEntry>,
    summary: Summary,
    skipped: Vec<SkippedRule>,
}

impl AuditRecord {
    pub(super) fn new(
        entries: Vec<AuditEntry>,
        summary: Summary,
        skipped: Vec<SkippedRule>,
    ) -> Self {
        Self {
            entries,
            summary,
            skipped,
        }
    }

    /// All entries, ordered by chapter, catalogue position, then path.
    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    /// Counts per verdict.
    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    /// Rules that could not be evaluated.
    pub fn skipped(&self) -> &[SkippedRule] {
        &self.skipped
    }

    /// Entries grouped by chapter id, in chapter order.
    pub fn chapters(&self) -> Vec<ChapterGroup<'_>> {
        let mut groups: Vec<ChapterGroup<'_>> = Vec::new();

        for entry in &self.entries {
            match groups.iter_mut().find(|g| g.chapter_id == entry.rule.chapter_id) {
                Some(group) => group.entries.push(entry),
                None => groups.push(ChapterGroup {
                    chapter_id: &entry.rule.chapter_id,
                    entries: vec![entry],
                }),
            }
        }

        groups.sort_by(|a, b| compare_chapters(a.chapter_id, b.chapter_id));
        groups
    }
}
