// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! HTML report.

use handlebars::Handlebars;
use serde_json::{json, Value};

use crate::audit::AuditRecord;
use crate::classifier::Verdict;
use crate::error::{RenderError, Result};

use super::ReportMeta;

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{{title}}</title>
<style>
body { font-family: sans-serif; margin: 1em; }
h1, h4 { margin: 0; }
ul { margin-top: 0; }
table { border-collapse: collapse; width: 100%; }
th { background: black; color: white; text-align: left; }
td, th { border: 1px solid black; padding: 3px; vertical-align: top; }
td.result { text-align: center; }
.compliant { background: lime; }
.non-compliant { background: red; }
.warning { background: orange; }
.not-applicable { background: silver; }
.error { background: yellow; }
</style>
</head>
<body>
<h1>{{title}}</h1>
<h4>{{benchmark}} ({{profile}})</h4>
<p>Audited {{base_dir}}. Performed {{total}} tests in total:</p>
<ul>
{{#each counts}}
<li>{{label}} = {{count}} ({{percent}}%)</li>
{{/each}}
</ul>
<table>
<thead>
<tr><th width="5%">Chapter</th><th width="22%">Title</th><th width="25%">Summary</th><th width="15%">File</th><th>Default</th><th>Actual</th><th>Expected</th><th>Result</th></tr>
</thead>
<tbody>
{{#each rows}}
<tr>{{#if first}}<td rowspan="{{rowspan}}">{{chapter}}</td>{{/if}}<td>{{title}}</td><td>{{summary}}</td><td>{{file}}</td><td>{{defaults}}</td><td>{{actual}}</td><td>{{expected}}</td><td class="result {{slug}}">{{label}}</td></tr>
{{/each}}
</tbody>
</table>
{{#if skipped}}
<h4>Rules not evaluated</h4>
<ul>
{{#each skipped}}
<li>{{chapter}} {{title}}: {{reason}}</li>
{{/each}}
</ul>
{{/if}}
{{#if rejected}}
<h4>Catalogue rows ignored</h4>
<ul>
{{#each rejected}}
<li>{{this}}</li>
{{/each}}
</ul>
{{/if}}
</body>
</html>
"#;

/// Render the full HTML report.
pub fn render_html(record: &AuditRecord, meta: &ReportMeta) -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars
        .register_template_string("report", TEMPLATE)
        .map_err(|e| RenderError::Template {
            message: e.to_string(),
        })?;

    handlebars
        .render("report", &context(record, meta))
        .map_err(|e| {
            RenderError::Template {
                message: e.to_string(),
            }
            .into()
        })
}

fn context(record: &AuditRecord, meta: &ReportMeta) -> Value {
    let summary = record.summary();

    let counts: Vec<Value> = Verdict::ALL
        .iter()
        .map(|verdict| {
            json!({
                "label": verdict.label(),
                "count": summary.count(*verdict),
                "percent": format!("{:.0}", summary.percent(*verdict)),
            })
        })
        .collect();

    let mut rows = Vec::with_capacity(record.entries().len());
    for chapter in record.chapters() {
        for (i, entry) in chapter.entries.iter().enumerate() {
            rows.push(json!({
                "first": i == 0,
                "rowspan": chapter.entries.len(),
                "chapter": chapter.chapter_id,
                "title": entry.rule.title,
                "summary": entry.rule.summary,
                "file": entry.file_path.as_ref().map(|p| p.display().to_string()),
                "defaults": entry.rule.defaults_joined(),
                "actual": entry.matched_value,
                "expected": entry.rule.expected_value,
                "label": entry.verdict.label(),
                "slug": entry.verdict.slug(),
            }));
        }
    }

    let skipped: Vec<Value> = record
        .skipped()
        .iter()
        .map(|s| {
            json!({
                "chapter": s.rule.chapter_id,
                "title": s.rule.title,
                "reason": s.reason.message,
            })
        })
        .collect();

    let rejected: Vec<String> = meta.rejected.iter().map(ToString::to_string).collect();

    json!({
        "title": format!("Security Audit Report ({})", meta.generated.format("%m/%d/%Y")),
        "benchmark": meta.profile.benchmark,
        "profile": meta.profile.name,
        "base_dir": meta.base_dir.display().to_string(),
        "total": summary.total,
        "counts": counts,
        "rows": rows,
        "skipped": skipped,
        "rejected": rejected,
    })
}
