//! Frontend performance and error telemetry.
//!
//! Observations are validated and timestamped by [`ingest`], stored through a
//! [`MetricsSink`], and summarised per name by [`aggregate`].

pub mod metric;
pub mod stats;
pub mod vitals;

pub use metric::{ingest, JsonLinesMetricsSink, MemoryMetricsSink, Metric, MetricsSink};
pub use stats::{aggregate, MetricStats};
pub use vitals::{VitalsRegistry, WebVital};
