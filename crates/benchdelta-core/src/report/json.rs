use super::BenchmarkDelta;
use crate::model::MetricRecord;

pub fn delta_to_json(delta: &BenchmarkDelta) -> serde_json::Result<String> {
    serde_json::to_string_pretty(delta)
}

pub fn metrics_to_json(records: &[MetricRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}
