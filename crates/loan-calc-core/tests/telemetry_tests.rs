#![cfg(feature = "telemetry")]

use loan_calc_core::telemetry::{
    aggregate, ingest, JsonLinesMetricsSink, MemoryMetricsSink, Metric, MetricsSink, VitalsRegistry,
    WebVital,
};
use pretty_assertions::assert_eq;

fn assert_close(actual: f64, expected: f64, tol: f64, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tol,
        "{}: expected ~{}, got {} (diff = {})",
        msg,
        expected,
        actual,
        diff
    );
}

fn page_load_session(sink: &mut dyn MetricsSink) {
    for (name, value) in [
        ("LCP", 1200.0),
        ("LCP", 1800.0),
        ("LCP", 900.0),
        ("CLS", 0.05),
        ("CLS", 0.15),
        ("LOAD_TIME", 2300.0),
        ("js_error", 1.0),
    ] {
        ingest(sink, Metric::new(name, value).with_url("/credits")).unwrap();
    }
}

// ===========================================================================
// Aggregation
// ===========================================================================

#[test]
fn test_aggregate_groups_by_name() {
    let mut sink = MemoryMetricsSink::new();
    page_load_session(&mut sink);
    let stats = aggregate(&sink.all().unwrap());

    let names: Vec<&str> = stats.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["CLS", "LCP", "LOAD_TIME", "js_error"]);

    let lcp = &stats[1];
    assert_eq!(lcp.count, 3);
    assert_close(lcp.avg_value, 1300.0, 1e-9, "LCP avg");
    assert_eq!(lcp.min_value, 900.0);
    assert_eq!(lcp.max_value, 1800.0);

    let cls = &stats[0];
    assert_eq!(cls.count, 2);
    assert_close(cls.avg_value, 0.1, 1e-12, "CLS avg");
}

#[test]
fn test_stats_wire_format() {
    let stats = aggregate(&[Metric::new("FCP", 400.0)]);
    let json = serde_json::to_value(&stats[0]).unwrap();
    assert_eq!(json["avgValue"], 400.0);
    assert_eq!(json["minValue"], 400.0);
    assert_eq!(json["count"], 1);
}

// ===========================================================================
// File sink + counters
// ===========================================================================

#[test]
fn test_file_sink_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("telemetry").join("metrics.jsonl");

    let mut sink = JsonLinesMetricsSink::new(&path);
    page_load_session(&mut sink);

    let reopened = JsonLinesMetricsSink::new(&path);
    let all = reopened.all().unwrap();
    assert_eq!(all.len(), 7);
    assert!(all.iter().all(|m| m.timestamp.is_some()));
    assert_eq!(aggregate(&all), aggregate(&sink.all().unwrap()));
}

#[test]
fn test_vitals_registry_totals() {
    let mut sink = MemoryMetricsSink::new();
    page_load_session(&mut sink);
    let reg = VitalsRegistry::from_metrics(&sink.all().unwrap());

    assert_eq!(reg.total(WebVital::Lcp), 3900.0);
    assert_eq!(reg.total(WebVital::LoadTime), 2300.0);
    assert_eq!(reg.total(WebVital::Ttfb), 0.0);
    assert!(reg.render().contains("web_vitals_lcp 3900\n"));
}
