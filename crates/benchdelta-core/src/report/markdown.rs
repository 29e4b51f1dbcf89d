//! Markdown artifacts: `summary.md` for a run and `delta-vs-<run>.md` for a
//! baseline comparison.

use std::fmt::Write as _;

use super::console::RATE_LIMIT_WARNING;
use super::{BenchmarkDelta, Overview};
use crate::errors::ReportError;
use crate::model::{MetricRecord, Report, SECTIONS};

pub const SUMMARY_FILE: &str = "summary.md";

/// File name of the delta artifact for a baseline run id.
///
/// Path separators in the run id are replaced so the file always lands next
/// to the summary.
pub fn delta_file_name(against_run_id: &str) -> String {
    let safe: String = against_run_id
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("delta-vs-{safe}.md")
}

fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

fn section_table(out: &mut String, title: &str, records: &[&MetricRecord]) {
    let _ = writeln!(out, "## {title}");
    if records.is_empty() {
        out.push_str("No metrics captured.\n\n");
        return;
    }
    out.push_str("| Endpoint | Tier | Method | p95 (ms) | Avg (ms) | RPS | Error % |\n");
    out.push_str("|---|---:|---|---:|---:|---:|---:|\n");
    for r in records {
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} | {} | {} | {} |",
            cell(&r.endpoint_name().unwrap_or_default()),
            cell(&r.tier().unwrap_or_default()),
            cell(&r.method().unwrap_or_default()),
            r.p95_ms(),
            r.avg_ms(),
            r.throughput_rps(),
            r.error_rate_pct()
        );
    }
    out.push('\n');
}

pub fn render_summary_markdown(report: &Report) -> Result<String, ReportError> {
    let overview = Overview::from_report(report)?;
    let records = report.metrics()?;
    let checks = report.edge_checks()?;

    let mut out = String::from("# Benchmark Summary\n\n");
    for (label, key) in [
        ("Run ID", "runId"),
        ("Timestamp", "timestampIso"),
        ("Runtime", "runtimeLabel"),
        ("Target", "targetBaseUrl"),
        ("Commit", "gitCommit"),
        ("Node", "nodeVersion"),
    ] {
        let value = report.metadata_str(key).unwrap_or_else(|| "-".to_string());
        let _ = writeln!(out, "- {label}: `{value}`");
    }
    let _ = writeln!(
        out,
        "- Aggregate statuses: `{}`",
        super::console::format_statuses(&overview.statuses)
    );
    if overview.rate_limited {
        let _ = writeln!(out, "\n> {RATE_LIMIT_WARNING}");
    }
    out.push('\n');

    for section in SECTIONS {
        let in_section: Vec<&MetricRecord> =
            records.iter().filter(|r| r.section == section).collect();
        section_table(&mut out, section.title(), &in_section);
    }

    out.push_str("## Edge Checks\n");
    if checks.is_empty() {
        out.push_str("No edge checks captured.\n");
    } else {
        out.push_str("| Check | Passed | Details |\n|---|---|---|\n");
        for check in &checks {
            let _ = writeln!(
                out,
                "| {} | {} | {} |",
                cell(&check.name),
                if check.passed { "yes" } else { "no" },
                cell(&check.details.to_string())
            );
        }
    }
    Ok(out)
}

#[must_use]
pub fn render_delta_markdown(delta: &BenchmarkDelta) -> String {
    let mut out = String::from("# Benchmark Delta\n\n");
    let _ = writeln!(out, "- Against Run: `{}`", delta.against_run_id);
    let _ = writeln!(out, "- Neutral Threshold: `{}%`", delta.neutral_threshold_pct);
    let _ = writeln!(
        out,
        "- Improved: {}, Regressed: {}, Neutral: {}",
        delta.summary.improved, delta.summary.regressed, delta.summary.neutral
    );
    out.push('\n');
    out.push_str("| Endpoint | Tier | p95 Δ% | Throughput Δ% | Error Δ% | Status |\n");
    out.push_str("|---|---:|---:|---:|---:|---|\n");
    for m in &delta.metrics {
        let _ = writeln!(
            out,
            "| {} | {} | {:.2} | {:.2} | {:.2} | {} |",
            cell(&m.endpoint_name),
            cell(&m.tier),
            m.p95_delta_pct,
            m.throughput_delta_pct,
            m.error_rate_delta_pct,
            m.status
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CompareConfig;
    use serde_json::json;

    fn sample() -> Report {
        Report::from_value(json!({
            "metadata": {"runId": "2026-01-10T10-00", "gitCommit": "abc123", "nodeVersion": "v22"},
            "modules": {
                "apiCore": {"endpointMetrics": [{
                    "endpointName": "clients-list", "tier": "smoke", "method": "GET",
                    "p95Ms": 12.5, "avgMs": 8, "throughputRps": 120, "errorRatePct": 0,
                    "statuses": {"200": 50}
                }]},
                "edgeChecks": {"checks": [{"name": "tenant isolation", "passed": true, "details": {"a|b": 1}}]}
            }
        }))
        .unwrap()
    }

    #[test]
    fn summary_lists_metadata_sections_and_checks() {
        let md = render_summary_markdown(&sample()).unwrap();
        assert!(md.starts_with("# Benchmark Summary\n\n- Run ID: `2026-01-10T10-00`\n"));
        assert!(md.contains("- Timestamp: `-`"));
        assert!(md.contains("- Commit: `abc123`"));
        assert!(md.contains("## API Core\n| Endpoint |"));
        assert!(md.contains("| clients-list | smoke | GET | 12.5 | 8 | 120 | 0 |"));
        assert!(md.contains("## API Write\nNo metrics captured."));
        assert!(md.contains("## UI Pages\nNo metrics captured."));
        assert!(md.contains(r#"| tenant isolation | yes | {"a\|b":1} |"#));
        assert!(!md.contains(RATE_LIMIT_WARNING));
    }

    #[test]
    fn delta_table_rounds_to_two_places() {
        let current = Report::from_value(json!({"modules": {"apiWrite": {"endpointMetrics": [
            {"endpointName": "clients-create", "tier": "load", "p95Ms": 110.0, "throughputRps": 30.0, "errorRatePct": 1.0}
        ]}}}))
        .unwrap();
        let baseline = Report::from_value(json!({"metadata": {"runId": "base"}, "modules": {"apiWrite": {"endpointMetrics": [
            {"endpointName": "clients-create", "tier": "load", "p95Ms": 100.0, "throughputRps": 30.0, "errorRatePct": 0.0}
        ]}}}))
        .unwrap();
        let delta = BenchmarkDelta::compute(&current, &baseline, &CompareConfig::default()).unwrap();
        let md = render_delta_markdown(&delta);
        assert!(md.contains("- Against Run: `base`"));
        assert!(md.contains("- Neutral Threshold: `5%`"));
        assert!(md.contains("| clients-create | load | 10.00 | 0.00 | 100.00 | regressed |"));
    }

    #[test]
    fn delta_file_name_stays_in_directory() {
        assert_eq!(delta_file_name("run-7"), "delta-vs-run-7.md");
        assert_eq!(delta_file_name("../x"), "delta-vs-.._x.md");
    }
}
