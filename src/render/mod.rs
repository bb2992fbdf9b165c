// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Report rendering.
//!
//! Everything here reads an [`AuditRecord`] and never feeds back into the
//! engine.

mod console;
mod csv;
mod html;

pub use self::console::{print_json, print_record, print_text};
pub use self::csv::{render_csv, CSV_HEADER};
pub use self::html::render_html;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::audit::AuditRecord;
use crate::error::{CatalogueRowError, RenderError, Result};
use crate::platform::Profile;

/// Run details shown next to the results.
#[derive(Debug, Clone)]
pub struct ReportMeta {
    pub profile: Profile,
    /// Directory the collected files were read from.
    pub base_dir: PathBuf,
    pub generated: DateTime<Local>,
    /// Catalogue rows that were dropped while loading.
    pub rejected: Vec<CatalogueRowError>,
}

impl ReportMeta {
    pub fn new(profile: Profile, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            profile,
            base_dir: base_dir.into(),
            generated: Local::now(),
            rejected: Vec::new(),
        }
    }
}

/// `{prefix}_{YYYYmmddTHHMMSS}`, the shared stem of the report files.
pub fn report_stem(prefix: &str, at: &DateTime<Local>) -> String {
    format!("{}_{}", prefix, at.format("%Y%m%dT%H%M%S"))
}

/// Which files [`write_reports`] produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportFormats {
    pub html: bool,
    pub csv: bool,
}

/// Write the HTML and CSV reports next to `prefix`. Returns the created paths.
pub fn write_reports(
    record: &AuditRecord,
    meta: &ReportMeta,
    prefix: &str,
    formats: ReportFormats,
) -> Result<Vec<PathBuf>> {
    let stem = report_stem(prefix, &meta.generated);
    let mut written = Vec::new();

    if formats.html {
        let path = PathBuf::from(format!("{}.html", stem));
        write_file(&path, &render_html(record, meta)?)?;
        written.push(path);
    }

    if formats.csv {
        let path = PathBuf::from(format!("{}.csv", stem));
        write_file(&path, &render_csv(record)?)?;
        written.push(path);
    }

    Ok(written)
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    tracing::debug!("Writing {:?}", path);
    std::fs::write(path, contents).map_err(|e| {
        RenderError::WriteFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditEngine, EngineOptions};
    use crate::catalogue::parse_catalogue;
    use crate::platform::Platform;
    use chrono::TimeZone;
    use std::fs;
    use tempfile::TempDir;

    pub(crate) fn sample() -> (TempDir, AuditRecord, ReportMeta) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("sshd_config"), "Protocol 1\nX11Forwarding yes\n").unwrap();
        let catalogue = parse_catalogue(
            "True;sshd_config;^Protocol[ \\t]+(\\d)$;9.2.1;Set SSH Protocol to 2;Use protocol 2;2,1;2\n\
             False;sshd_config;^X11Forwarding[ \\t]+yes;9.2.4;Disable X11 forwarding;<no X>;;\n\
             True;issue.net;.;8.1;Set warning banner;;;\n",
        );
        let record = AuditEngine::new(EngineOptions::new(dir.path(), Platform::Linux))
            .run(&catalogue)
            .unwrap();

        let profile = Profile {
            platform: Platform::Linux,
            name: "Debian".to_string(),
            benchmark: "CIS Debian Linux Benchmark".to_string(),
            catalogue: PathBuf::from("catalogues/debian.csv"),
        };
        let mut meta = ReportMeta::new(profile, dir.path());
        meta.generated = Local.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
        (dir, record, meta)
    }

    #[test]
    fn test_report_stem() {
        let at = Local.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
        assert_eq!(report_stem("results", &at), "results_20240305T140709");
    }

    #[test]
    fn test_write_reports() {
        let (dir, record, meta) = sample();
        let prefix = dir.path().join("audit");

        let written = write_reports(
            &record,
            &meta,
            &prefix.to_string_lossy(),
            ReportFormats {
                html: true,
                csv: true,
            },
        )
        .unwrap();

        assert_eq!(written.len(), 2);
        assert!(written[0].to_string_lossy().ends_with("audit_20240305T140709.html"));
        assert!(written[1].to_string_lossy().ends_with("audit_20240305T140709.csv"));
        for path in &written {
            assert!(path.is_file());
        }
    }

    #[test]
    fn test_write_reports_csv_only() {
        let (dir, record, meta) = sample();
        let prefix = dir.path().join("audit");

        let written = write_reports(
            &record,
            &meta,
            &prefix.to_string_lossy(),
            ReportFormats {
                html: false,
                csv: true,
            },
        )
        .unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].extension().unwrap(), "csv");
    }

    #[test]
    fn test_write_into_missing_directory() {
        let (dir, record, meta) = sample();
        let prefix = dir.path().join("missing/audit");

        let err = write_reports(
            &record,
            &meta,
            &prefix.to_string_lossy(),
            ReportFormats {
                html: true,
                csv: false,
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("Failed to write"));
    }
}
