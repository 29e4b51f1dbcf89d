pub mod console;
pub mod json;
pub mod markdown;

use serde::Serialize;
use tracing::warn;

use crate::compare::compare_records_with_policy;
use crate::config::CompareConfig;
use crate::errors::ReportError;
use crate::model::{Classification, ComparisonRow, Report};
use crate::status::{rate_limited, summarize_statuses, StatusSummary, RATE_LIMIT_STATUS};

/// Metadata keys shown in run overviews, in display order.
pub const OVERVIEW_METADATA_KEYS: [&str; 6] = [
    "runId",
    "timestampIso",
    "runtimeLabel",
    "targetBaseUrl",
    "gitCommit",
    "nodeVersion",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataField {
    pub key: &'static str,
    pub value: Option<String>,
}

/// Headline facts about a single run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub metadata: Vec<MetadataField>,
    pub metric_rows: usize,
    pub statuses: StatusSummary,
    pub rate_limited: bool,
}

impl Overview {
    pub fn from_report(report: &Report) -> Result<Self, ReportError> {
        let records = report.metrics()?;
        let statuses = summarize_statuses(&records);
        let limited = rate_limited(&statuses);
        if limited {
            warn!(
                run_id = %report.run_id(),
                count = statuses.get(RATE_LIMIT_STATUS).copied().unwrap_or(0),
                "429 responses detected, results are influenced by rate limiting"
            );
        }
        Ok(Self {
            metadata: OVERVIEW_METADATA_KEYS
                .iter()
                .map(|&key| MetadataField {
                    key,
                    value: report.metadata_str(key),
                })
                .collect(),
            metric_rows: records.len(),
            statuses,
            rate_limited: limited,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ComparisonSummary {
    pub improved: usize,
    pub regressed: usize,
    pub neutral: usize,
}

impl ComparisonSummary {
    pub fn from_rows(rows: &[ComparisonRow]) -> Self {
        let mut summary = Self::default();
        for row in rows {
            match row.status {
                Classification::Improved => summary.improved += 1,
                Classification::Regressed => summary.regressed += 1,
                Classification::Neutral => summary.neutral += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.improved + self.regressed + self.neutral
    }
}

/// Result of comparing a run against a baseline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkDelta {
    pub against_run_id: String,
    pub neutral_threshold_pct: f64,
    pub summary: ComparisonSummary,
    pub metrics: Vec<ComparisonRow>,
}

impl BenchmarkDelta {
    pub fn compute(
        current: &Report,
        baseline: &Report,
        cfg: &CompareConfig,
    ) -> Result<Self, ReportError> {
        let current_records = current.metrics()?;
        let baseline_records = baseline.metrics()?;
        let metrics = compare_records_with_policy(
            &current_records,
            &baseline_records,
            cfg.neutral_threshold_pct,
            cfg.duplicate_keys,
        )?;
        Ok(Self {
            against_run_id: baseline.run_id(),
            neutral_threshold_pct: cfg.neutral_threshold_pct,
            summary: ComparisonSummary::from_rows(&metrics),
            metrics,
        })
    }

    pub fn has_regressions(&self) -> bool {
        self.summary.regressed > 0
    }
}
