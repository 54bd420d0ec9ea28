use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::LoanCalcError;
use crate::LoanCalcResult;

/// One frontend observation: a timing, a web-vital sample or an error report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    pub name: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_resolution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Metric {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            url: None,
            user_agent: None,
            screen_resolution: None,
            rating: None,
            message: None,
            stack: None,
            timestamp: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_screen_resolution(mut self, resolution: impl Into<String>) -> Self {
        self.screen_resolution = Some(resolution.into());
        self
    }

    pub fn with_rating(mut self, rating: impl Into<String>) -> Self {
        self.rating = Some(rating.into());
        self
    }

    /// Attach an error report.
    pub fn with_error(mut self, message: impl Into<String>, stack: Option<String>) -> Self {
        self.message = Some(message.into());
        self.stack = stack;
        self
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// Where ingested metrics end up.
pub trait MetricsSink {
    fn record(&mut self, metric: Metric) -> LoanCalcResult<()>;
    fn all(&self) -> LoanCalcResult<Vec<Metric>>;
}

/// Validate, timestamp and store one observation.
pub fn ingest(sink: &mut dyn MetricsSink, mut metric: Metric) -> LoanCalcResult<Metric> {
    if metric.name.trim().is_empty() {
        return Err(LoanCalcError::InvalidInput {
            field: "name".into(),
            reason: "Metric name must not be empty".into(),
        });
    }
    if !metric.value.is_finite() {
        return Err(LoanCalcError::InvalidInput {
            field: "value".into(),
            reason: "Metric value must be a finite number".into(),
        });
    }
    if metric.timestamp.is_none() {
        metric.timestamp = Some(Utc::now());
    }
    sink.record(metric.clone())?;
    info!(name = %metric.name, value = metric.value, "metric received");
    Ok(metric)
}

#[derive(Debug, Clone, Default)]
pub struct MemoryMetricsSink {
    metrics: Vec<Metric>,
}

impl MemoryMetricsSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MetricsSink for MemoryMetricsSink {
    fn record(&mut self, metric: Metric) -> LoanCalcResult<()> {
        self.metrics.push(metric);
        Ok(())
    }

    fn all(&self) -> LoanCalcResult<Vec<Metric>> {
        Ok(self.metrics.clone())
    }
}

/// Append-only file, one JSON object per line.
#[derive(Debug, Clone)]
pub struct JsonLinesMetricsSink {
    path: PathBuf,
}

impl JsonLinesMetricsSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MetricsSink for JsonLinesMetricsSink {
    fn record(&mut self, metric: Metric) -> LoanCalcResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let line = serde_json::to_string(&metric)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")?;
        Ok(())
    }

    fn all(&self) -> LoanCalcResult<Vec<Metric>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                serde_json::from_str(line).map_err(|e| {
                    LoanCalcError::SerializationError(format!(
                        "{} line {}: {}",
                        self.path.display(),
                        idx + 1,
                        e
                    ))
                })
            })
            .collect()
    }
}
