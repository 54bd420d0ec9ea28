//! Web-vitals counters in Prometheus text exposition format.

use std::collections::BTreeMap;
use std::fmt::Write;

use super::metric::Metric;

/// Frontend metric names that feed a counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WebVital {
    Cls,
    Fid,
    Lcp,
    Fcp,
    Ttfb,
    LoadTime,
}

impl WebVital {
    pub const ALL: [WebVital; 6] = [
        WebVital::Cls,
        WebVital::Fid,
        WebVital::Lcp,
        WebVital::Fcp,
        WebVital::Ttfb,
        WebVital::LoadTime,
    ];

    /// Match the name a frontend reports (`CLS`, `LOAD_TIME`, ...).
    pub fn from_metric_name(name: &str) -> Option<Self> {
        match name {
            "CLS" => Some(WebVital::Cls),
            "FID" => Some(WebVital::Fid),
            "LCP" => Some(WebVital::Lcp),
            "FCP" => Some(WebVital::Fcp),
            "TTFB" => Some(WebVital::Ttfb),
            "LOAD_TIME" => Some(WebVital::LoadTime),
            _ => None,
        }
    }

    pub fn counter_name(self) -> &'static str {
        match self {
            WebVital::Cls => "web_vitals_cls",
            WebVital::Fid => "web_vitals_fid",
            WebVital::Lcp => "web_vitals_lcp",
            WebVital::Fcp => "web_vitals_fcp",
            WebVital::Ttfb => "web_vitals_ttfb",
            WebVital::LoadTime => "page_load_time",
        }
    }

    pub fn help(self) -> &'static str {
        match self {
            WebVital::Cls => "Cumulative Layout Shift",
            WebVital::Fid => "First Input Delay",
            WebVital::Lcp => "Largest Contentful Paint",
            WebVital::Fcp => "First Contentful Paint",
            WebVital::Ttfb => "Time To First Byte",
            WebVital::LoadTime => "Page load time in ms",
        }
    }
}

/// Running totals per web vital. Each observation adds its value.
#[derive(Debug, Clone, Default)]
pub struct VitalsRegistry {
    totals: BTreeMap<WebVital, f64>,
}

impl VitalsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_metrics<'a>(metrics: impl IntoIterator<Item = &'a Metric>) -> Self {
        let mut registry = Self::new();
        for m in metrics {
            registry.observe(m);
        }
        registry
    }

    /// Add `metric` to its counter. Returns false for names that are not
    /// vitals and for negative or non-finite values, which a counter cannot take.
    pub fn observe(&mut self, metric: &Metric) -> bool {
        if !metric.value.is_finite() || metric.value < 0.0 {
            return false;
        }
        match WebVital::from_metric_name(&metric.name) {
            Some(vital) => {
                *self.totals.entry(vital).or_insert(0.0) += metric.value;
                true
            }
            None => false,
        }
    }

    pub fn total(&self, vital: WebVital) -> f64 {
        self.totals.get(&vital).copied().unwrap_or(0.0)
    }

    /// Every counter, zero-valued ones included.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for vital in WebVital::ALL {
            let name = vital.counter_name();
            let _ = writeln!(out, "# HELP {name} {}", vital.help());
            let _ = writeln!(out, "# TYPE {name} counter");
            let _ = writeln!(out, "{name} {}", self.total(vital));
        }
        out
    }
}
