use std::fmt::Write as _;

use super::{BenchmarkDelta, Overview};
use crate::model::{EdgeCheck, MetricRecord};
use crate::status::StatusSummary;

pub const RATE_LIMIT_WARNING: &str =
    "Warning: 429 responses detected. Results are influenced by rate limiting.";

/// Format `values` as a left-aligned, space separated table.
#[must_use]
pub fn format_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let mut out = String::new();
    let header: Vec<String> = headers.iter().map(|h| (*h).to_string()).collect();
    push_row(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);
    for row in rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let mut line = String::new();
    for (i, width) in widths.iter().enumerate() {
        let cell = cells.get(i).map(String::as_str).unwrap_or("");
        let pad = width.saturating_sub(cell.chars().count());
        line.push_str(cell);
        line.push_str(&" ".repeat(pad + 2));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

pub fn format_statuses(statuses: &StatusSummary) -> String {
    if statuses.is_empty() {
        return "none".to_string();
    }
    statuses
        .iter()
        .map(|(code, count)| format!("{code}={count}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[must_use]
pub fn render_overview(overview: &Overview) -> String {
    let mut out = String::from("Run Metadata\n");
    let key_width = overview
        .metadata
        .iter()
        .map(|f| f.key.len() + 1)
        .max()
        .unwrap_or(0);
    for field in &overview.metadata {
        let label = format!("{}:", field.key);
        let _ = writeln!(
            out,
            "  {label:<key_width$} {}",
            field.value.as_deref().unwrap_or("-")
        );
    }
    out.push('\n');
    let _ = writeln!(out, "Endpoint metric rows: {}", overview.metric_rows);
    let _ = writeln!(out, "Aggregate statuses: {}", format_statuses(&overview.statuses));
    if overview.rate_limited {
        let _ = writeln!(out, "{RATE_LIMIT_WARNING}");
    }
    out
}

/// Metrics table sorted by section, endpoint and tier.
#[must_use]
pub fn render_metrics(records: &[MetricRecord]) -> String {
    if records.is_empty() {
        return "No metrics captured.\n".to_string();
    }
    let mut sorted: Vec<&MetricRecord> = records.iter().collect();
    sorted.sort_by_key(|r| (r.section.as_str(), r.endpoint_name(), r.tier()));

    let rows: Vec<Vec<String>> = sorted
        .iter()
        .map(|r| {
            vec![
                r.section.to_string(),
                r.endpoint_name().unwrap_or_default(),
                r.tier().unwrap_or_default(),
                format!("{:.2}", r.p95_ms()),
                format!("{:.2}", r.avg_ms()),
                format!("{:.2}", r.throughput_rps()),
                format!("{:.2}", r.error_rate_pct()),
                r.statuses().into_keys().collect::<Vec<_>>().join(","),
            ]
        })
        .collect();

    format_table(
        &[
            "Module",
            "Endpoint",
            "Tier",
            "P95 ms",
            "Avg ms",
            "RPS",
            "Error %",
            "Status Codes",
        ],
        &rows,
    )
}

#[must_use]
pub fn render_edge_checks(checks: &[EdgeCheck]) -> String {
    if checks.is_empty() {
        return "No edge checks captured.\n".to_string();
    }
    let rows: Vec<Vec<String>> = checks
        .iter()
        .map(|c| {
            vec![
                c.name.clone(),
                if c.passed { "PASS" } else { "FAIL" }.to_string(),
                c.details.to_string(),
            ]
        })
        .collect();
    format_table(&["Check", "Result", "Details"], &rows)
}

#[must_use]
pub fn render_comparison(delta: &BenchmarkDelta) -> String {
    let mut out = format!(
        "Baseline: {} (neutral threshold {}%)\n\n",
        delta.against_run_id, delta.neutral_threshold_pct
    );
    if delta.metrics.is_empty() {
        out.push_str("No comparable endpoints.\n");
        return out;
    }

    let rows: Vec<Vec<String>> = delta
        .metrics
        .iter()
        .map(|m| {
            vec![
                m.endpoint_name.clone(),
                m.tier.clone(),
                format!("{:.2}", m.p95_before_ms),
                format!("{:.2}", m.p95_after_ms),
                format!("{:.2}%", m.p95_delta_pct),
                format!("{:.2}%", m.throughput_delta_pct),
                format!("{:.2}%", m.error_rate_delta_pct),
                m.status.to_string(),
            ]
        })
        .collect();
    out.push_str(&format_table(
        &[
            "Endpoint",
            "Tier",
            "P95 Before",
            "P95 Now",
            "P95 Δ%",
            "RPS Δ%",
            "Err Δ%",
            "Status",
        ],
        &rows,
    ));
    let _ = writeln!(
        out,
        "\nimproved: {}, regressed: {}, neutral: {}",
        delta.summary.improved, delta.summary.regressed, delta.summary.neutral
    );
    out
}
