//! JSON and HTML rendering of profiling reports.

use crate::error::{Result, ResultExt};
use crate::types::{ColumnSummary, Report};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tracing::info;

/// Output format of a rendered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Json,
    Html,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Html => "html",
        }
    }
}

/// Render a report as pretty-printed JSON.
pub fn render_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Render a report as a self-contained HTML page stamped with the current time.
pub fn render_html(report: &Report) -> String {
    let generated_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    render_html_at(report, &generated_at)
}

/// Render a report as HTML with an explicit generation timestamp.
pub fn render_html_at(report: &Report, generated_at: &str) -> String {
    let mut html = String::with_capacity(4096 + report.columns.len() * 1024);

    html.push_str("<!doctype html>\n");
    html.push_str("<html><head><meta charset=\"utf-8\"><title>CSV Profile</title>\n");
    html.push_str(
        "<style>body{font-family:Arial,Helvetica,sans-serif;padding:20px}\
         table{border-collapse:collapse;width:100%}\
         th,td{border:1px solid #ddd;padding:8px}\
         th{background:#f4f4f4;text-align:left}</style>\n",
    );
    html.push_str("</head><body>\n");
    let _ = writeln!(
        html,
        "<h1>CSV Profile</h1><p>Rows: {} &nbsp; Duplicates: {}</p>",
        report.rows, report.duplicate_row_count
    );

    for (name, column) in &report.columns {
        let _ = writeln!(html, "<h2>{}</h2>", escape_html(name));
        html.push_str("<table>\n<tr><th>Metric</th><th>Value</th></tr>\n");
        for (metric, value) in column_rows(column) {
            let _ = writeln!(html, "<tr><td>{}</td><td>{}</td></tr>", metric, value);
        }
        html.push_str("</table>\n");
    }

    let _ = writeln!(
        html,
        "<footer><p>Generated at {}</p></footer>",
        escape_html(generated_at)
    );
    html.push_str("</body></html>\n");
    html
}

/// Metric name and already-escaped cell content for one column table.
fn column_rows(column: &ColumnSummary) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("null_count", column.null_count.to_string()),
        ("null_pct", column.null_pct.to_string()),
        (
            "distinct_count",
            column
                .distinct_count
                .map_or_else(|| "None".to_string(), |c| c.to_string()),
        ),
        (
            "distinct_count_is_approximate",
            column.distinct_count_is_approximate.to_string(),
        ),
        ("inferred_type", column.inferred_type.to_string()),
        (
            "numeric_parseable_count",
            column.numeric_parseable_count.to_string(),
        ),
    ];

    if let Some(numeric) = &column.numeric {
        rows.push(("min", numeric.min.to_string()));
        rows.push(("max", numeric.max.to_string()));
        rows.push(("mean", numeric.mean.to_string()));
        rows.push((
            "std",
            numeric
                .std
                .map_or_else(|| "None".to_string(), |s| s.to_string()),
        ));
    }

    let top = column
        .top_values
        .iter()
        .map(|t| format!("{} ({})", escape_html(&t.value), t.count))
        .collect::<Vec<_>>()
        .join("<br>");
    rows.push(("top_values", top));
    rows
}

/// Escape the characters that are significant in HTML text and attributes.
fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render `report` in `format` and write it to `path`.
pub fn write_report(report: &Report, format: ReportFormat, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let content = match format {
        ReportFormat::Json => render_json(report)?,
        ReportFormat::Html => render_html(report),
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)
        .map_err(crate::error::ProfilingError::from)
        .context(format!("Failed to write report to {}", path.display()))?;

    info!("Report saved: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{InferredType, NumericSummary, TopValue};

    fn sample_report() -> Report {
        let mut report = Report::empty();
        report.rows = 3;
        report.duplicate_row_count = 1;
        report.columns.insert(
            "price".to_string(),
            ColumnSummary {
                null_count: 0,
                null_pct: 0.0,
                distinct_count: Some(2),
                distinct_count_is_approximate: false,
                inferred_type: InferredType::Float,
                numeric_parseable_count: 3,
                numeric: Some(NumericSummary {
                    min: 1.0,
                    max: 2.0,
                    mean: 1.5,
                    std: None,
                }),
                top_values: vec![TopValue {
                    value: "1".to_string(),
                    count: 2,
                }],
            },
        );
        report.columns.insert(
            "<note>".to_string(),
            ColumnSummary {
                null_count: 1,
                null_pct: 0.333333,
                distinct_count: None,
                distinct_count_is_approximate: true,
                inferred_type: InferredType::String,
                numeric_parseable_count: 0,
                numeric: None,
                top_values: vec![TopValue {
                    value: "a&b".to_string(),
                    count: 2,
                }],
            },
        );
        report
    }

    #[test]
    fn test_render_json_shape() {
        let json = render_json(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["rows"], 3);
        assert_eq!(value["duplicate_row_count"], 1);
        assert_eq!(value["columns"]["price"]["mean"], 1.5);
        assert!(value["columns"]["price"]["std"].is_null());
        assert!(value["columns"]["<note>"]["distinct_count"].is_null());
        assert_eq!(value["columns"]["<note>"]["distinct_count_is_approximate"], true);
        assert!(value["columns"]["<note>"].get("min").is_none());
    }

    #[test]
    fn test_render_html_escapes_and_lists_metrics() {
        let html = render_html_at(&sample_report(), "2024-01-01 00:00:00");

        assert!(html.starts_with("<!doctype html>"));
        assert!(html.contains("Rows: 3 &nbsp; Duplicates: 1"));
        assert!(html.contains("<h2>&lt;note&gt;</h2>"));
        assert!(html.contains("a&amp;b (2)"));
        assert!(html.contains("<tr><td>mean</td><td>1.5</td></tr>"));
        assert!(html.contains("<tr><td>std</td><td>None</td></tr>"));
        assert!(html.contains("Generated at 2024-01-01 00:00:00"));
    }

    #[test]
    fn test_html_omits_numeric_rows_for_text_columns() {
        let mut report = sample_report();
        report.columns.shift_remove("price");
        let html = render_html_at(&report, "now");
        assert!(!html.contains("<td>min</td>"));
    }

    #[test]
    fn test_write_report_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/report.json");

        write_report(&sample_report(), ReportFormat::Json, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let parsed: Report = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed.rows, 3);
        assert_eq!(parsed.columns.len(), 2);
    }

    #[test]
    fn test_format_extension() {
        assert_eq!(ReportFormat::Json.extension(), "json");
        assert_eq!(ReportFormat::Html.extension(), "html");
    }
}
