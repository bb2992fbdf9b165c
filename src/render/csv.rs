// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Semicolon-separated result export.

use csv::WriterBuilder;

use crate::audit::AuditRecord;
use crate::error::{RenderError, Result};

pub const CSV_HEADER: [&str; 8] = [
    "Chapter", "Title", "Summary", "File", "Default", "Actual", "Expected", "Result",
];

/// Render one row per entry, chapter-ordered, with a header row.
pub fn render_csv(record: &AuditRecord) -> Result<String> {
    let mut writer = WriterBuilder::new().delimiter(b';').from_writer(Vec::new());

    writer.write_record(CSV_HEADER).map_err(csv_error)?;

    for entry in record.entries() {
        let file = entry
            .file_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();

        writer
            .write_record([
                entry.rule.chapter_id.as_str(),
                entry.rule.title.as_str(),
                entry.rule.summary.as_str(),
                file.as_str(),
                entry.rule.defaults_joined().as_str(),
                entry.matched_value.as_deref().unwrap_or(""),
                entry.rule.expected_value.as_str(),
                entry.verdict.label(),
            ])
            .map_err(csv_error)?;
    }

    let bytes = writer.into_inner().map_err(|e| RenderError::Csv {
        message: e.to_string(),
    })?;
    String::from_utf8(bytes).map_err(|e| {
        RenderError::Csv {
            message: e.to_string(),
        }
        .into()
    })
}

fn csv_error(e: csv::Error) -> RenderError {
    RenderError::Csv {
        message: e.to_string(),
    }
}
