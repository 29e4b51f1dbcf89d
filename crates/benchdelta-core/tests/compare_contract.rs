//! Baseline comparison contract: join, delta and classification over whole
//! report documents.

use benchdelta_core::{
    compare_records, compare_records_with_policy, flatten_metrics, summarize_statuses,
    BenchmarkDelta, Classification, CompareConfig, DuplicateKeyPolicy, Report, ReportError,
};
use serde_json::{json, Value};

fn endpoint(name: &str, tier: &str, p95: f64) -> Value {
    json!({
        "endpointName": name,
        "path": format!("/api/{name}"),
        "tier": tier,
        "p95Ms": p95,
        "avgMs": p95 / 2.0,
        "throughputRps": 50.0,
        "errorRatePct": 0.0,
        "statuses": {"200": 100}
    })
}

fn report(run_id: &str, api_core: Vec<Value>) -> Value {
    json!({
        "metadata": {"runId": run_id},
        "modules": {"apiCore": {"endpointMetrics": api_core}}
    })
}

fn classify_p95(before: f64, after: f64) -> Classification {
    let current = flatten_metrics(&report("now", vec![endpoint("E", "t", after)])).unwrap();
    let baseline = flatten_metrics(&report("base", vec![endpoint("E", "t", before)])).unwrap();
    let rows = compare_records(&current, &baseline, 5.0);
    assert_eq!(rows.len(), 1);
    rows[0].status
}

#[test]
fn latency_drop_beyond_threshold_is_improved() {
    assert_eq!(classify_p95(100.0, 90.0), Classification::Improved);
}

#[test]
fn latency_rise_beyond_threshold_is_regressed() {
    assert_eq!(classify_p95(100.0, 110.0), Classification::Regressed);
}

#[test]
fn latency_change_within_threshold_is_neutral() {
    assert_eq!(classify_p95(100.0, 102.0), Classification::Neutral);
}

#[test]
fn endpoints_new_since_baseline_are_not_compared() {
    let current = flatten_metrics(&report(
        "now",
        vec![endpoint("clients", "smoke", 10.0), endpoint("invoices", "smoke", 10.0)],
    ))
    .unwrap();
    let baseline = flatten_metrics(&report("base", vec![endpoint("clients", "smoke", 10.0)])).unwrap();

    let rows = compare_records(&current, &baseline, 5.0);
    let names: Vec<&str> = rows.iter().map(|r| r.endpoint_name.as_str()).collect();
    assert_eq!(names, ["clients"]);
}

#[test]
fn row_order_follows_current_keys_not_baseline_order() {
    let current = flatten_metrics(&report(
        "now",
        vec![
            endpoint("services", "smoke", 10.0),
            endpoint("clients", "load", 10.0),
            endpoint("clients", "smoke", 10.0),
        ],
    ))
    .unwrap();
    let forward = flatten_metrics(&report(
        "base",
        vec![
            endpoint("clients", "load", 10.0),
            endpoint("clients", "smoke", 10.0),
            endpoint("services", "smoke", 10.0),
        ],
    ))
    .unwrap();
    let mut reversed = forward.clone();
    reversed.reverse();

    let a = compare_records(&current, &forward, 5.0);
    let b = compare_records(&current, &reversed, 5.0);
    assert_eq!(a, b);
    let keys: Vec<(&str, &str)> = a
        .iter()
        .map(|r| (r.endpoint_name.as_str(), r.tier.as_str()))
        .collect();
    assert_eq!(
        keys,
        [("clients", "load"), ("clients", "smoke"), ("services", "smoke")]
    );
}

#[test]
fn path_is_part_of_the_identity_key() {
    let mut moved = endpoint("clients", "smoke", 10.0);
    moved["path"] = json!("/api/v2/clients");
    let current = flatten_metrics(&report("now", vec![moved])).unwrap();
    let baseline = flatten_metrics(&report("base", vec![endpoint("clients", "smoke", 10.0)])).unwrap();
    assert!(compare_records(&current, &baseline, 5.0).is_empty());
}

#[test]
fn same_key_across_sections_joins_last_section() {
    let doc = json!({
        "modules": {
            "apiCore": {"endpointMetrics": [endpoint("clients", "smoke", 500.0)]},
            "uiPages": {"endpointMetrics": [endpoint("clients", "smoke", 100.0)]}
        }
    });
    let current = flatten_metrics(&doc).unwrap();
    let baseline = flatten_metrics(&report("base", vec![endpoint("clients", "smoke", 100.0)])).unwrap();

    let rows = compare_records(&current, &baseline, 5.0);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].p95_after_ms, 100.0);

    let err = compare_records_with_policy(&current, &baseline, 5.0, DuplicateKeyPolicy::Reject)
        .unwrap_err();
    assert!(matches!(err, ReportError::DuplicateKey { .. }));
}

#[test]
fn zero_baseline_error_rate_saturates_to_regression() {
    let mut failing = endpoint("clients", "smoke", 100.0);
    failing["errorRatePct"] = json!(0.5);
    let current = flatten_metrics(&report("now", vec![failing])).unwrap();
    let baseline = flatten_metrics(&report("base", vec![endpoint("clients", "smoke", 100.0)])).unwrap();

    let rows = compare_records(&current, &baseline, 5.0);
    assert_eq!(rows[0].error_rate_delta_pct, 100.0);
    assert_eq!(rows[0].status, Classification::Regressed);
}

#[test]
fn missing_metrics_compare_as_zero() {
    let current = flatten_metrics(&report("now", vec![json!({"endpointName": "bare", "tier": "t"})])).unwrap();
    let baseline = flatten_metrics(&report("base", vec![json!({"endpointName": "bare", "tier": "t"})])).unwrap();

    let rows = compare_records(&current, &baseline, 5.0);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].p95_delta_pct, 0.0);
    assert_eq!(rows[0].throughput_delta_pct, 0.0);
    assert_eq!(rows[0].error_rate_delta_pct, 0.0);
    // all-zero deltas satisfy the improved rule only when the threshold is not positive
    assert_eq!(rows[0].status, Classification::Neutral);
    assert_eq!(
        compare_records(&current, &baseline, 0.0)[0].status,
        Classification::Improved
    );
}

#[test]
fn status_summary_matches_per_record_counts() {
    let doc = json!({
        "modules": {
            "apiCore": {"endpointMetrics": [{"statuses": {"200": 3}}]},
            "apiWrite": {"endpointMetrics": [{"statuses": {"200": 2, "429": 1}}]},
            "uiPages": {"endpointMetrics": [{"endpointName": "no-statuses"}]}
        }
    });
    let records = flatten_metrics(&doc).unwrap();
    let summary = summarize_statuses(&records);
    assert_eq!(serde_json::to_value(&summary).unwrap(), json!({"200": 5, "429": 1}));
}

#[test]
fn benchmark_delta_honours_configured_policy() {
    let doubled = report(
        "now",
        vec![endpoint("clients", "smoke", 10.0), endpoint("clients", "smoke", 11.0)],
    );
    let current = Report::from_value(doubled).unwrap();
    let baseline = Report::from_value(report("base", vec![endpoint("clients", "smoke", 10.0)])).unwrap();

    let lenient = BenchmarkDelta::compute(&current, &baseline, &CompareConfig::default()).unwrap();
    assert_eq!(lenient.metrics.len(), 1);
    assert_eq!(lenient.against_run_id, "base");

    let strict = CompareConfig::default().with_strict_keys(true);
    assert!(BenchmarkDelta::compute(&current, &baseline, &strict).is_err());
}
