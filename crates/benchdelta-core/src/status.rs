use std::collections::BTreeMap;

use crate::model::MetricRecord;

/// Status code → total count, ordered by the code as a string.
///
/// String order matches numeric order only for codes of equal length
/// (`"200" < "404" < "429"`); a code such as `"1000"` sorts before `"200"`.
pub type StatusSummary = BTreeMap<String, u64>;

/// Status code that signals the benchmark hit rate limiting.
pub const RATE_LIMIT_STATUS: &str = "429";

/// Sum status counts across records. Records without `statuses` add nothing.
pub fn summarize_statuses(records: &[MetricRecord]) -> StatusSummary {
    let mut summary = StatusSummary::new();
    for record in records {
        for (code, count) in record.statuses() {
            let total = summary.entry(code).or_insert(0);
            *total = total.saturating_add(count);
        }
    }
    summary
}

/// True when any 429 response was recorded.
pub fn rate_limited(summary: &StatusSummary) -> bool {
    summary.get(RATE_LIMIT_STATUS).copied().unwrap_or(0) > 0
}
