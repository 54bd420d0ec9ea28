use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::metric::Metric;

/// Per-name summary of recorded observations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricStats {
    pub name: String,
    pub count: u64,
    pub avg_value: f64,
    pub min_value: f64,
    pub max_value: f64,
}

/// Group by name and compute count/avg/min/max. Output is sorted by name.
pub fn aggregate(metrics: &[Metric]) -> Vec<MetricStats> {
    let mut groups: BTreeMap<&str, (u64, f64, f64, f64)> = BTreeMap::new();
    for m in metrics {
        let entry = groups
            .entry(m.name.as_str())
            .or_insert((0, 0.0, f64::INFINITY, f64::NEG_INFINITY));
        entry.0 += 1;
        entry.1 += m.value;
        entry.2 = entry.2.min(m.value);
        entry.3 = entry.3.max(m.value);
    }

    groups
        .into_iter()
        .map(|(name, (count, sum, min, max))| MetricStats {
            name: name.to_string(),
            count,
            avg_value: sum / count as f64,
            min_value: min,
            max_value: max,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_empty() {
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn test_single_observation() {
        let stats = aggregate(&[Metric::new("FID", 16.0)]);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].avg_value, 16.0);
        assert_eq!(stats[0].min_value, 16.0);
        assert_eq!(stats[0].max_value, 16.0);
    }
}
