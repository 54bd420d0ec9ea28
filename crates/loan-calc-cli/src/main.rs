mod commands;
mod input;
mod mail;
mod output;
mod settings;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use commands::calculate::{CalculateArgs, ScheduleArgs};
use commands::catalog::CatalogCommand;
use commands::email::EmailArgs;
use commands::history::HistoryCommand;
use commands::metrics::MetricsCommand;
use commands::Context;
use settings::Settings;

/// Loan payment calculator
#[derive(Parser)]
#[command(
    name = "loancalc",
    version,
    about = "Fixed-rate loan payment calculator",
    long_about = "Computes annuity payments for the bank's loan products, manages the \
                  product catalog, mails result summaries and keeps calculation history \
                  and client telemetry."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Catalog file, overrides the configured catalog_path
    #[arg(long, global = true, env = "LOANCALC_CATALOG")]
    catalog: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate payments for one loan request
    Calculate(CalculateArgs),
    /// Month-by-month amortization schedule
    Schedule(ScheduleArgs),
    /// Inspect or edit the loan product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogCommand,
    },
    /// Calculate and mail the result summary to a client
    Email(EmailArgs),
    /// Record and analyze client telemetry
    Metrics {
        #[command(subcommand)]
        action: MetricsCommand,
    },
    /// Recorded calculations
    History {
        #[command(subcommand)]
        action: HistoryCommand,
    },
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    if let Commands::Version = cli.command {
        println!("loancalc {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    let mut settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}: invalid configuration: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };
    if let Some(path) = cli.catalog {
        settings.catalog_path = Some(path);
    }
    tracing::debug!(data_dir = %settings.data_dir.display(), "settings loaded");
    let ctx = Context::new(settings);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Calculate(args) => commands::calculate::run_calculate(&ctx, args),
        Commands::Schedule(args) => commands::calculate::run_schedule(&ctx, args),
        Commands::Catalog { action } => commands::catalog::run_catalog(&ctx, action),
        Commands::Email(args) => commands::email::run_email(&ctx, args),
        Commands::Metrics { action } => commands::metrics::run_metrics(&ctx, action),
        Commands::History { action } => commands::history::run_history(&ctx, action),
        Commands::Version => return,
    };

    match result {
        // Commands that write their own document (CSV export, exposition text) return Null.
        Ok(serde_json::Value::Null) => process::exit(0),
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}

/// Logs go to stderr so piped JSON on stdout stays clean. `RUST_LOG` wins over `-v`.
fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false);

    let _ = tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .try_init();
}
