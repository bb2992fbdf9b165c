// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The audit engine.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::catalogue::Catalogue;
use crate::classifier::{classify, Classification, ClassifierOptions, Observation};
use crate::error::{AuditError, Result};
use crate::matcher::{
    compile_rule, decode_registry_value, read_target, CompiledRule, MatchOccurrence, RuleProgram,
};
use crate::platform::Platform;
use crate::resolver::{ListingMode, TargetResolver};

use super::aggregator::Aggregator;
use super::record::{AuditEntry, AuditRecord};

/// Everything one run needs besides the catalogue.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Directory holding the collected configuration files.
    pub base_dir: PathBuf,
    pub platform: Platform,
    pub listing: ListingMode,
    /// Accept `>N` / `<N` expected values.
    pub relational: bool,
    /// Accept any captured value when a rule's expected value is empty.
    pub open_expected: bool,
    /// Paths under `base_dir` that are never scanned.
    pub exclude: Vec<glob::Pattern>,
    /// Worker threads; 0 uses the global rayon pool.
    pub jobs: usize,
}

impl EngineOptions {
    /// Recursive listing, exact comparison, default pool.
    pub fn new(base_dir: impl Into<PathBuf>, platform: Platform) -> Self {
        Self {
            base_dir: base_dir.into(),
            platform,
            listing: ListingMode::Recursive,
            relational: false,
            open_expected: false,
            exclude: Vec::new(),
            jobs: 0,
        }
    }
}

/// Evaluates a catalogue against one base directory.
#[derive(Debug, Clone)]
pub struct AuditEngine {
    options: EngineOptions,
}

impl AuditEngine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    /// Run every rule of `catalogue` and collect the verdicts.
    ///
    /// Only a missing base directory or a worker pool failure aborts the
    /// run. Bad patterns and unreadable files end up in the record.
    pub fn run(&self, catalogue: &Catalogue) -> Result<AuditRecord> {
        let base_dir = &self.options.base_dir;
        if !base_dir.is_dir() {
            return Err(AuditError::TargetDirectoryMissing {
                path: base_dir.clone(),
            }
            .into());
        }

        let mut aggregator = Aggregator::new();

        // Rules sharing a file name are evaluated against one read of the file.
        let mut groups: BTreeMap<String, Vec<CompiledRule>> = BTreeMap::new();
        for (index, rule) in catalogue.rules.iter().enumerate() {
            match compile_rule(index, Arc::new(rule.clone())) {
                RuleProgram::Compiled(compiled) => groups
                    .entry(rule.file_name.clone())
                    .or_default()
                    .push(compiled),
                RuleProgram::Skipped(skipped) => aggregator.skip(skipped),
            }
        }
        let groups: Vec<(String, Vec<CompiledRule>)> = groups.into_iter().collect();

        let resolver = TargetResolver::new(base_dir, self.options.listing, &self.options.exclude);
        info!(
            "Auditing {} ({} rules, {} target names, {} files indexed)",
            resolver.root().display(),
            catalogue.len(),
            groups.len(),
            resolver.indexed_files()
        );

        let evaluate = || {
            groups
                .par_iter()
                .map(|(file_name, rules)| self.evaluate_group(&resolver, file_name, rules))
                .collect::<Vec<Aggregator>>()
        };

        let partials = if self.options.jobs > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.options.jobs)
                .build()
                .map_err(|e| AuditError::WorkerPool {
                    message: e.to_string(),
                })?;
            pool.install(evaluate)
        } else {
            evaluate()
        };

        for partial in partials {
            aggregator.merge(partial);
        }

        let record = aggregator.finish();
        info!(
            "Audit finished: {} entries, {} skipped rules",
            record.entries().len(),
            record.skipped().len()
        );
        Ok(record)
    }

    fn classifier_options(&self) -> ClassifierOptions {
        ClassifierOptions {
            relational: self.options.relational,
            open_expected: self.options.open_expected,
        }
    }

    fn evaluate_group(
        &self,
        resolver: &TargetResolver,
        file_name: &str,
        rules: &[CompiledRule],
    ) -> Aggregator {
        let mut partial = Aggregator::new();
        let targets = resolver.resolve(file_name);

        if targets.is_empty() {
            debug!("{} not found, {} rules not applicable", file_name, rules.len());
            for compiled in rules {
                let classification =
                    classify(&compiled.rule, Observation::Absent, self.classifier_options());
                partial.record(entry(compiled, None, classification, Vec::new(), None));
            }
            return partial;
        }

        for path in targets {
            info!("Scanning {}", path.display());

            let content = match read_target(&path) {
                Ok(content) => content,
                Err(e) => {
                    warn!("{}", e);
                    for compiled in rules {
                        let classification = classify(
                            &compiled.rule,
                            Observation::Unreadable,
                            self.classifier_options(),
                        );
                        partial.record(entry(
                            compiled,
                            Some(path.clone()),
                            classification,
                            Vec::new(),
                            Some(e.to_string()),
                        ));
                    }
                    continue;
                }
            };

            for compiled in rules {
                let mut occurrences = compiled.scan(&content);
                if self.options.platform == Platform::Windows {
                    decode_registry_values(&mut occurrences);
                }

                let classification = classify(
                    &compiled.rule,
                    Observation::Scanned(&occurrences),
                    self.classifier_options(),
                );
                debug!(
                    "{} {}: {} ({:?})",
                    compiled.rule.chapter_id,
                    path.display(),
                    classification.verdict,
                    classification.matched_value
                );
                partial.record(entry(
                    compiled,
                    Some(path.clone()),
                    classification,
                    occurrences,
                    None,
                ));
            }
        }

        partial
    }
}

fn entry(
    compiled: &CompiledRule,
    file_path: Option<PathBuf>,
    classification: Classification,
    occurrences: Vec<MatchOccurrence>,
    detail: Option<String>,
) -> AuditEntry {
    AuditEntry {
        rule: Arc::clone(&compiled.rule),
        file_path,
        verdict: classification.verdict,
        matched_value: classification.matched_value,
        occurrences,
        detail,
        rule_index: compiled.index,
    }
}

fn decode_registry_values(occurrences: &mut [MatchOccurrence]) {
    for group in occurrences
        .iter_mut()
        .flat_map(|occurrence| occurrence.captured_groups.iter_mut())
    {
        if let Some(decoded) = decode_registry_value(group) {
            *group = decoded;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::parse_catalogue;
    use crate::classifier::Verdict;
    use crate::error::BenchError;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const PROTOCOL_RULE: &str = "True;sshd_config;^Protocol[ \\t]+(\\d)$;9.2.1;Set SSH Protocol to 2;SSH supports two protocols;2,1;2\n";

    fn write(dir: &Path, name: &str, content: &str) {
        let path = dir.join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn audit(dir: &Path, catalogue: &str) -> AuditRecord {
        let engine = AuditEngine::new(EngineOptions::new(dir, Platform::Linux));
        engine.run(&parse_catalogue(catalogue)).unwrap()
    }

    fn protocol_verdict(content: Option<&str>) -> Verdict {
        let dir = TempDir::new().unwrap();
        if let Some(content) = content {
            write(dir.path(), "etc/ssh/sshd_config", content);
        }
        let record = audit(dir.path(), PROTOCOL_RULE);
        assert_eq!(record.entries().len(), 1);
        record.entries()[0].verdict
    }

    #[test]
    fn test_protocol_scenario() {
        assert_eq!(protocol_verdict(Some("Protocol 2\n")), Verdict::Compliant);
        assert_eq!(protocol_verdict(Some("Protocol 1\n")), Verdict::Warning);
        assert_eq!(protocol_verdict(Some("Protocol 3\n")), Verdict::NonCompliant);
        assert_eq!(protocol_verdict(None), Verdict::NotApplicable);
        assert_eq!(
            protocol_verdict(Some("Port 22\nPermitRootLogin no\n")),
            Verdict::NonCompliant
        );
    }

    #[test]
    fn test_entry_carries_value_and_line() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "sshd_config", "# comment\nProtocol 1\nProtocol 2\n");

        let record = audit(dir.path(), PROTOCOL_RULE);
        let entry = &record.entries()[0];
        assert_eq!(entry.verdict, Verdict::Warning);
        assert_eq!(entry.matched_value.as_deref(), Some("1"));
        assert_eq!(entry.occurrences.len(), 2);
        assert_eq!(entry.occurrences[0].line, 2);
        assert!(entry.file_path.as_ref().unwrap().ends_with("sshd_config"));
    }

    #[test]
    fn test_absent_file_single_entry() {
        let dir = TempDir::new().unwrap();
        let record = audit(dir.path(), PROTOCOL_RULE);
        assert_eq!(record.entries().len(), 1);
        assert!(record.entries()[0].file_path.is_none());
        assert_eq!(record.summary().not_applicable, 1);
    }

    #[test]
    fn test_multiple_copies_evaluated_independently() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a/sshd_config", "Protocol 2\n");
        write(dir.path(), "b/sshd_config", "Protocol 1\n");

        let record = audit(dir.path(), PROTOCOL_RULE);
        let verdicts: Vec<_> = record.entries().iter().map(|e| e.verdict).collect();
        assert_eq!(verdicts, vec![Verdict::Compliant, Verdict::Warning]);
        assert!(record.entries()[0]
            .file_path
            .as_ref()
            .unwrap()
            .ends_with("a/sshd_config"));
        assert_eq!(record.summary().total, 2);
    }

    #[test]
    fn test_rules_share_one_file() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "sshd_config", "Protocol 2\nPermitRootLogin yes\n");
        let catalogue = format!(
            "{}{}",
            PROTOCOL_RULE, "False;sshd_config;^PermitRootLogin[ \\t]+yes;9.2.10;Disable root login;;;\n"
        );

        let record = audit(dir.path(), &catalogue);
        let chapters: Vec<_> = record
            .entries()
            .iter()
            .map(|e| (e.rule.chapter_id.as_str(), e.verdict))
            .collect();
        assert_eq!(
            chapters,
            vec![("9.2.1", Verdict::Compliant), ("9.2.10", Verdict::NonCompliant)]
        );
    }

    #[test]
    fn test_binary_file_is_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("sshd_config"), b"Protocol\x00 2\n").unwrap();

        let record = audit(dir.path(), PROTOCOL_RULE);
        let entry = &record.entries()[0];
        assert_eq!(entry.verdict, Verdict::Error);
        assert!(entry.detail.is_some());
        assert_eq!(record.summary().error, 1);
    }

    #[test]
    fn test_bad_pattern_is_skipped() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "sshd_config", "Protocol 2\n");
        let catalogue = format!("{}True;sshd_config;^(Port;9.1;Broken;;;\n", PROTOCOL_RULE);

        let record = audit(dir.path(), &catalogue);
        assert_eq!(record.entries().len(), 1);
        assert_eq!(record.skipped().len(), 1);
        assert_eq!(record.skipped()[0].rule.chapter_id, "9.1");
    }

    #[test]
    fn test_missing_base_dir() {
        let dir = TempDir::new().unwrap();
        let engine = AuditEngine::new(EngineOptions::new(
            dir.path().join("missing"),
            Platform::Linux,
        ));
        let err = engine.run(&parse_catalogue(PROTOCOL_RULE)).unwrap_err();
        assert!(matches!(
            err,
            BenchError::Audit(AuditError::TargetDirectoryMissing { .. })
        ));
    }

    #[test]
    fn test_root_only_listing() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "etc/ssh/sshd_config", "Protocol 2\n");

        let mut options = EngineOptions::new(dir.path(), Platform::Linux);
        options.listing = ListingMode::RootOnly;
        let engine = AuditEngine::new(options);

        let record = engine.run(&parse_catalogue(PROTOCOL_RULE)).unwrap();
        assert_eq!(record.entries()[0].verdict, Verdict::NotApplicable);

        write(dir.path(), "sshd_config", "Protocol 2\n");
        let record = engine.run(&parse_catalogue(PROTOCOL_RULE)).unwrap();
        assert_eq!(record.entries().len(), 1);
        assert_eq!(record.entries()[0].verdict, Verdict::Compliant);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_target_same_in_both_listings() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "real_sshd", "Protocol 2\n");
        std::os::unix::fs::symlink(dir.path().join("real_sshd"), dir.path().join("sshd_config"))
            .unwrap();

        let mut options = EngineOptions::new(dir.path(), Platform::Linux);
        let recursive = AuditEngine::new(options.clone())
            .run(&parse_catalogue(PROTOCOL_RULE))
            .unwrap();
        options.listing = ListingMode::RootOnly;
        let root_only = AuditEngine::new(options)
            .run(&parse_catalogue(PROTOCOL_RULE))
            .unwrap();

        assert_eq!(recursive.entries()[0].verdict, Verdict::Compliant);
        assert_eq!(root_only.entries()[0].verdict, Verdict::Compliant);
    }

    #[test]
    fn test_registry_values_on_windows() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "policy.reg",
            "LegalNoticeText=hex(2):41,00,42,00,00,00\n",
        );
        let catalogue = "True;policy.reg;^LegalNoticeText=(.*)$;2.3.7;Logon banner;;;AB\n";

        let mut options = EngineOptions::new(dir.path(), Platform::Windows);
        let record = AuditEngine::new(options.clone())
            .run(&parse_catalogue(catalogue))
            .unwrap();
        assert_eq!(record.entries()[0].verdict, Verdict::Compliant);
        assert_eq!(record.entries()[0].matched_value.as_deref(), Some("AB"));

        options.platform = Platform::Linux;
        let record = AuditEngine::new(options)
            .run(&parse_catalogue(catalogue))
            .unwrap();
        assert_eq!(record.entries()[0].verdict, Verdict::NonCompliant);
    }

    #[test]
    fn test_relational_option() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "login.defs", "PASS_MIN_LEN 16\n");
        let catalogue = "True;login.defs;^PASS_MIN_LEN\\s+(\\d+);7.1.4;Minimum length;;8;>14\n";

        let mut options = EngineOptions::new(dir.path(), Platform::Linux);
        let record = AuditEngine::new(options.clone())
            .run(&parse_catalogue(catalogue))
            .unwrap();
        assert_eq!(record.entries()[0].verdict, Verdict::NonCompliant);

        options.relational = true;
        let record = AuditEngine::new(options)
            .run(&parse_catalogue(catalogue))
            .unwrap();
        assert_eq!(record.entries()[0].verdict, Verdict::Compliant);
    }

    #[test]
    fn test_open_expected_option() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "sshd_config", "Protocol 3\n");
        let catalogue = "True;sshd_config;^Protocol[ \\t]+(\\d)$;9.2.1;t;s;2,1;\n";

        let mut options = EngineOptions::new(dir.path(), Platform::Linux);
        let record = AuditEngine::new(options.clone())
            .run(&parse_catalogue(catalogue))
            .unwrap();
        assert_eq!(record.entries()[0].verdict, Verdict::NonCompliant);

        options.open_expected = true;
        let record = AuditEngine::new(options)
            .run(&parse_catalogue(catalogue))
            .unwrap();
        assert_eq!(record.entries()[0].verdict, Verdict::Compliant);
    }

    #[test]
    fn test_dedicated_pool_matches_default() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a/sshd_config", "Protocol 2\n");
        write(dir.path(), "b/sshd_config", "Protocol 3\n");
        write(dir.path(), "login.defs", "PASS_MAX_DAYS 90\n");
        let catalogue = format!(
            "{}True;login.defs;^PASS_MAX_DAYS\\s+(\\d+);7.1.1;Max days;;99999;90\nTrue;issue;.;8.1;Banner;;;\n",
            PROTOCOL_RULE
        );
        let catalogue = parse_catalogue(&catalogue);

        let mut options = EngineOptions::new(dir.path(), Platform::Linux);
        let default_pool = AuditEngine::new(options.clone()).run(&catalogue).unwrap();
        options.jobs = 2;
        let dedicated = AuditEngine::new(options).run(&catalogue).unwrap();

        let key = |record: &AuditRecord| -> Vec<(String, Verdict)> {
            record
                .entries()
                .iter()
                .map(|e| (e.rule.chapter_id.clone(), e.verdict))
                .collect()
        };
        assert_eq!(key(&default_pool), key(&dedicated));
        assert_eq!(dedicated.summary(), default_pool.summary());
        assert_eq!(dedicated.summary().total, 4);
    }

    #[test]
    fn test_excluded_directories() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "backup/sshd_config", "Protocol 1\n");
        write(dir.path(), "etc/sshd_config", "Protocol 2\n");

        let mut options = EngineOptions::new(dir.path(), Platform::Linux);
        options.exclude = vec![glob::Pattern::new("backup").unwrap()];
        let record = AuditEngine::new(options)
            .run(&parse_catalogue(PROTOCOL_RULE))
            .unwrap();
        assert_eq!(record.entries().len(), 1);
        assert_eq!(record.entries()[0].verdict, Verdict::Compliant);
    }
}
