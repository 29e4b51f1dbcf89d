use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::delta::pct_delta;
use crate::errors::ReportError;
use crate::model::{Classification, ComparisonRow, IdentityKey, MetricRecord, Side};

/// What to do when an identity key appears twice on one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateKeyPolicy {
    /// The later record replaces the earlier one.
    #[default]
    LastWins,
    /// Fail with [`ReportError::DuplicateKey`].
    Reject,
}

/// Classify one endpoint's deltas against `threshold` (percent).
///
/// Rules are checked in order and the first match wins; all comparisons are
/// inclusive:
/// - improved: p95 fell by at least `threshold`, throughput did not fall by
///   more than `threshold`, error rate did not rise by more than `threshold`
/// - regressed: p95 rose by at least `threshold`, or throughput fell by at
///   least `threshold`, or error rate rose by at least `threshold`
/// - neutral otherwise
pub fn classify(p95_delta: f64, rps_delta: f64, err_delta: f64, threshold: f64) -> Classification {
    if p95_delta <= -threshold && rps_delta >= -threshold && err_delta <= threshold {
        Classification::Improved
    } else if p95_delta >= threshold || rps_delta <= -threshold || err_delta >= threshold {
        Classification::Regressed
    } else {
        Classification::Neutral
    }
}

/// Join current records against the baseline and classify every shared key.
///
/// Duplicate keys on either side resolve last-write-wins. Keys only present
/// in `current` produce no row. Rows come out in identity key order.
pub fn compare_records(
    current: &[MetricRecord],
    baseline: &[MetricRecord],
    threshold: f64,
) -> Vec<ComparisonRow> {
    let current = index_last_wins(current, Side::Current);
    let baseline = index_last_wins(baseline, Side::Baseline);
    join(&current, &baseline, threshold)
}

/// [`compare_records`] with an explicit duplicate key policy.
pub fn compare_records_with_policy(
    current: &[MetricRecord],
    baseline: &[MetricRecord],
    threshold: f64,
    policy: DuplicateKeyPolicy,
) -> Result<Vec<ComparisonRow>, ReportError> {
    let current = index_records(current, Side::Current, policy)?;
    let baseline = index_records(baseline, Side::Baseline, policy)?;
    Ok(join(&current, &baseline, threshold))
}

/// Build the identity key index for one side of a comparison.
pub fn index_records(
    records: &[MetricRecord],
    side: Side,
    policy: DuplicateKeyPolicy,
) -> Result<BTreeMap<IdentityKey, &MetricRecord>, ReportError> {
    match policy {
        DuplicateKeyPolicy::LastWins => Ok(index_last_wins(records, side)),
        DuplicateKeyPolicy::Reject => {
            let mut index = BTreeMap::new();
            for record in records {
                let key = record.identity_key();
                if index.contains_key(&key) {
                    return Err(ReportError::DuplicateKey {
                        key: key.to_string(),
                        side,
                    });
                }
                index.insert(key, record);
            }
            Ok(index)
        }
    }
}

fn index_last_wins(records: &[MetricRecord], side: Side) -> BTreeMap<IdentityKey, &MetricRecord> {
    let mut index = BTreeMap::new();
    for record in records {
        let key = record.identity_key();
        if index.contains_key(&key) {
            debug!(%key, %side, "duplicate metric key, keeping the later record");
        }
        index.insert(key, record);
    }
    index
}

fn join(
    current: &BTreeMap<IdentityKey, &MetricRecord>,
    baseline: &BTreeMap<IdentityKey, &MetricRecord>,
    threshold: f64,
) -> Vec<ComparisonRow> {
    let mut rows = Vec::new();
    for (key, now) in current {
        let Some(before) = baseline.get(key) else {
            debug!(%key, "no baseline metric, skipping");
            continue;
        };
        rows.push(compare_pair(key, before, now, threshold));
    }
    rows
}

fn compare_pair(
    key: &IdentityKey,
    before: &MetricRecord,
    now: &MetricRecord,
    threshold: f64,
) -> ComparisonRow {
    let p95_delta_pct = pct_delta(before.p95_ms(), now.p95_ms());
    let throughput_delta_pct = pct_delta(before.throughput_rps(), now.throughput_rps());
    let error_rate_delta_pct = pct_delta(before.error_rate_pct(), now.error_rate_pct());

    ComparisonRow {
        endpoint_name: key.endpoint_name.clone().unwrap_or_default(),
        tier: key.tier.clone().unwrap_or_default(),
        path: key.path.clone(),
        p95_before_ms: before.p95_ms(),
        p95_after_ms: now.p95_ms(),
        p95_delta_pct,
        throughput_before_rps: before.throughput_rps(),
        throughput_after_rps: now.throughput_rps(),
        throughput_delta_pct,
        error_rate_before_pct: before.error_rate_pct(),
        error_rate_after_pct: now.error_rate_pct(),
        error_rate_delta_pct,
        status: classify(
            p95_delta_pct,
            throughput_delta_pct,
            error_rate_delta_pct,
            threshold,
        ),
    }
}
