// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Catalogue parsing.

use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, warn};

use crate::error::{AuditError, CatalogueRowError, Result, RowProblem};

use super::rule::Rule;

/// The rules of a catalogue, plus the rows that had to be dropped.
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    /// Usable rules, in source order.
    pub rules: Vec<Rule>,
    /// Rows that were skipped.
    pub rejected: Vec<CatalogueRowError>,
}

impl Catalogue {
    /// Number of usable rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether there is nothing to evaluate.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Read and parse a catalogue file.
pub fn load_catalogue(path: &Path) -> Result<Catalogue> {
    debug!("Loading catalogue from: {:?}", path);

    let bytes = std::fs::read(path).map_err(|e| AuditError::CatalogueUnreadable {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let catalogue = parse_bytes(&bytes);
    debug!(
        "Loaded {} rules from {:?} ({} rejected)",
        catalogue.rules.len(),
        path,
        catalogue.rejected.len()
    );
    Ok(catalogue)
}

/// Parse catalogue source text.
pub fn parse_catalogue(source: &str) -> Catalogue {
    parse_bytes(source.as_bytes())
}

fn parse_bytes(bytes: &[u8]) -> Catalogue {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);

    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .from_reader(bytes);

    let mut catalogue = Catalogue::default();

    for result in reader.records() {
        let outcome = match result {
            Ok(record) => {
                if is_blank(&record) {
                    continue;
                }
                let line = record.position().map(|p| p.line()).unwrap_or(0);
                Rule::from_fields(&record.iter().collect::<Vec<_>>())
                    .map_err(|problem| CatalogueRowError { line, problem })
            }
            Err(e) => Err(CatalogueRowError {
                line: e.position().map(|p| p.line()).unwrap_or(0),
                problem: RowProblem::Unreadable {
                    message: e.to_string(),
                },
            }),
        };

        match outcome {
            Ok(rule) => catalogue.rules.push(rule),
            Err(err) => {
                warn!("Skipping {}", err);
                catalogue.rejected.push(err);
            }
        }
    }

    catalogue
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const CATALOGUE: &str = "\
True;sshd_config;^Protocol[ \\t]+(\\d)$;9.2.1;Set SSH Protocol to 2;SSH supports two protocols;2,1;2
False;sshd_config;^PermitEmptyPasswords[ \\t]+yes$;9.2.11;Disable empty passwords;Empty passwords are bad;;
True;login.defs;^PASS_MAX_DAYS[ \\t]+(\\d+)$;10.1.1;Set password expiration;Limit password age;99999;90
";

    #[test]
    fn test_parse_catalogue() {
        let catalogue = parse_catalogue(CATALOGUE);
        assert_eq!(catalogue.len(), 3);
        assert!(catalogue.rejected.is_empty());
        assert_eq!(catalogue.rules[0].chapter_id, "9.2.1");
        assert!(!catalogue.rules[1].expect_match);
        assert!(catalogue.rules[1].default_values.is_empty());
        assert_eq!(catalogue.rules[2].file_name, "login.defs");
    }

    #[test]
    fn test_malformed_row_is_dropped() {
        let source = format!(
            "{}Maybe;sshd_config;^X;1.1;t;s;;\nTrue;too;few;fields\n",
            CATALOGUE
        );
        let catalogue = parse_catalogue(&source);
        assert_eq!(catalogue.len(), 3);
        assert_eq!(catalogue.rejected.len(), 2);
        assert_eq!(catalogue.rejected[0].line, 4);
        assert_eq!(
            catalogue.rejected[1].problem,
            RowProblem::FieldCount { found: 4 }
        );
    }

    #[test]
    fn test_one_bad_row_among_many() {
        let source = "\
True;a;^a;1;t;s;;
True;b;^b;2;t;s;;
None;c;^c;3;t;s;;
True;d;^d;4;t;s;;
";
        let catalogue = parse_catalogue(source);
        assert_eq!(catalogue.len(), 3);
        assert_eq!(catalogue.rejected.len(), 1);
    }

    #[test]
    fn test_blank_and_comment_lines() {
        let source = "# chapter 9\n\nTrue;a;^a;1;t;s;;\n   \n";
        let catalogue = parse_catalogue(source);
        assert_eq!(catalogue.len(), 1);
        assert!(catalogue.rejected.is_empty());
    }

    #[test]
    fn test_quoted_pattern_with_delimiter() {
        let source = "True;my.cnf;\"^sql_mode=.*;.*$\";2.1;t;s;;\n";
        let catalogue = parse_catalogue(source);
        assert_eq!(catalogue.len(), 1);
        assert_eq!(catalogue.rules[0].pattern, "^sql_mode=.*;.*$");
    }

    #[test]
    fn test_invalid_utf8_row_is_dropped() {
        let mut bytes = b"True;a;^a;1;t;s;;\n".to_vec();
        bytes.extend_from_slice(b"True;b;^\xff;2;t;s;;\n");
        bytes.extend_from_slice(b"True;c;^c;3;t;s;;\n");
        let catalogue = parse_bytes(&bytes);
        assert_eq!(catalogue.len(), 2);
        assert_eq!(catalogue.rejected.len(), 1);
    }

    #[test]
    fn test_load_catalogue() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("linux.csv");
        fs::write(&path, CATALOGUE).unwrap();

        let catalogue = load_catalogue(&path).unwrap();
        assert_eq!(catalogue.len(), 3);
    }

    #[test]
    fn test_load_missing_catalogue() {
        let dir = TempDir::new().unwrap();
        let err = load_catalogue(&dir.path().join("missing.csv")).unwrap_err();
        assert!(err.to_string().contains("missing.csv"));
    }

    #[test]
    fn test_shipped_catalogues() {
        use crate::matcher::{compile_rule, RuleProgram};
        use std::sync::Arc;

        let shipped = [
            include_str!("../../catalogues/debian.csv"),
            include_str!("../../catalogues/lsb.csv"),
            include_str!("../../catalogues/redhat.csv"),
            include_str!("../../catalogues/suse.csv"),
            include_str!("../../catalogues/windows2012.csv"),
            include_str!("../../catalogues/oracle.csv"),
        ];

        for source in shipped {
            let catalogue = parse_catalogue(source);
            assert!(!catalogue.is_empty());
            assert!(catalogue.rejected.is_empty(), "{:?}", catalogue.rejected);
            for (index, rule) in catalogue.rules.into_iter().enumerate() {
                let chapter = rule.chapter_id.clone();
                assert!(
                    matches!(compile_rule(index, Arc::new(rule)), RuleProgram::Compiled(_)),
                    "pattern for {} does not compile",
                    chapter
                );
            }
        }
    }
}
