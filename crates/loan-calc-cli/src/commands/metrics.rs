use clap::{Args, Subcommand};
use serde_json::Value;

use loan_calc_core::telemetry::{aggregate, ingest, Metric, MetricsSink, VitalsRegistry};

use super::Context;
use crate::input;

#[derive(Subcommand)]
pub enum MetricsCommand {
    /// Store one client metric (web vital, load time or error report)
    Record(RecordArgs),
    /// Count, average, minimum and maximum per metric name
    Analytics,
    /// Web-vitals counters in Prometheus text exposition format
    Export,
}

#[derive(Args)]
pub struct RecordArgs {
    /// JSON file holding one metric (falls back to stdin, then flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Metric name, e.g. LCP or js_error
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long, allow_negative_numbers = true)]
    pub value: Option<f64>,

    #[arg(long)]
    pub url: Option<String>,

    #[arg(long)]
    pub user_agent: Option<String>,

    #[arg(long)]
    pub screen_resolution: Option<String>,

    /// good, needs-improvement or poor
    #[arg(long)]
    pub rating: Option<String>,

    /// Error message, for error reports
    #[arg(long)]
    pub message: Option<String>,

    #[arg(long)]
    pub stack: Option<String>,
}

impl RecordArgs {
    fn into_metric(self) -> Result<Metric, Box<dyn std::error::Error>> {
        if self.name.is_none() {
            if let Some(metric) = input::resolve::<Metric>(self.input.as_deref())? {
                return Ok(metric);
            }
        }

        let mut metric = Metric::new(
            self.name.ok_or("--name is required (or provide --input)")?,
            self.value.ok_or("--value is required (or provide --input)")?,
        );
        if let Some(url) = self.url {
            metric = metric.with_url(url);
        }
        if let Some(agent) = self.user_agent {
            metric = metric.with_user_agent(agent);
        }
        if let Some(resolution) = self.screen_resolution {
            metric = metric.with_screen_resolution(resolution);
        }
        if let Some(rating) = self.rating {
            metric = metric.with_rating(rating);
        }
        if let Some(message) = self.message {
            metric = metric.with_error(message, self.stack);
        }
        Ok(metric)
    }
}

pub fn run_metrics(ctx: &Context, action: MetricsCommand) -> Result<Value, Box<dyn std::error::Error>> {
    let mut sink = ctx.metrics_sink();
    match action {
        MetricsCommand::Record(args) => {
            let stored = ingest(&mut sink, args.into_metric()?)?;
            Ok(serde_json::to_value(stored)?)
        }
        MetricsCommand::Analytics => Ok(serde_json::to_value(aggregate(&sink.all()?))?),
        MetricsCommand::Export => {
            let registry = VitalsRegistry::from_metrics(&sink.all()?);
            print!("{}", registry.render());
            Ok(Value::Null)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    fn record(name: &str, value: f64) -> MetricsCommand {
        MetricsCommand::Record(RecordArgs {
            input: None,
            name: Some(name.into()),
            value: Some(value),
            url: Some("/credits".into()),
            user_agent: None,
            screen_resolution: None,
            rating: None,
            message: None,
            stack: None,
        })
    }

    #[test]
    fn test_record_then_analytics() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::new(Settings {
            data_dir: dir.path().to_path_buf(),
            ..Settings::default()
        });

        for (name, value) in [("TTFB", 120.0), ("TTFB", 80.0), ("FCP", 700.0)] {
            let stored = run_metrics(&ctx, record(name, value)).unwrap();
            assert!(stored["timestamp"].is_string());
        }

        let stats = run_metrics(&ctx, MetricsCommand::Analytics).unwrap();
        assert_eq!(stats[0]["name"], "FCP");
        assert_eq!(stats[1]["name"], "TTFB");
        assert_eq!(stats[1]["count"], 2);
        assert_eq!(stats[1]["avgValue"], 100.0);
    }

    #[test]
    fn test_record_requires_name() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::new(Settings {
            data_dir: dir.path().to_path_buf(),
            ..Settings::default()
        });
        let args = RecordArgs {
            input: Some(dir.path().join("absent.json").to_string_lossy().to_string()),
            name: None,
            value: None,
            url: None,
            user_agent: None,
            screen_resolution: None,
            rating: None,
            message: None,
            stack: None,
        };
        assert!(run_metrics(&ctx, MetricsCommand::Record(args)).is_err());
    }
}
