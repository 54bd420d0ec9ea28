pub mod calculate;
pub mod catalog;
pub mod email;
pub mod history;
pub mod metrics;

use std::path::PathBuf;

use clap::Args;
use loan_calc_core::calculator::CalculationInput;
use loan_calc_core::catalog::{Catalog, ConfigStore, JsonFileConfigStore};
use loan_calc_core::history::History;
use loan_calc_core::telemetry::JsonLinesMetricsSink;

use crate::input;
use crate::settings::Settings;

/// Storage locations resolved from [`Settings`], shared by every command.
pub struct Context {
    pub settings: Settings,
}

impl Context {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn catalog_store(&self) -> JsonFileConfigStore {
        JsonFileConfigStore::new(self.settings.catalog_path())
    }

    /// The persisted catalog, or the built-in products when the file is
    /// missing or unusable.
    pub fn load_catalog(&self) -> Catalog {
        let store = self.catalog_store();
        Catalog::load(Some(&store))
    }

    /// The catalog exactly as stored, for edits. Unlike [`Context::load_catalog`]
    /// a corrupt or invalid file is an error, so an edit never overwrites it
    /// with the built-in products. A missing or empty file starts from them.
    pub fn stored_catalog(&self) -> Result<Catalog, Box<dyn std::error::Error>> {
        match self.catalog_store().read_all()? {
            Some(configs) if !configs.is_empty() => Ok(Catalog::from_configs(configs)?),
            _ => Ok(Catalog::defaults()),
        }
    }

    pub fn metrics_sink(&self) -> JsonLinesMetricsSink {
        JsonLinesMetricsSink::new(self.settings.metrics_path())
    }

    pub fn history_path(&self) -> PathBuf {
        self.settings.history_path()
    }

    pub fn load_history(&self) -> Result<History, Box<dyn std::error::Error>> {
        Ok(History::read_from(&self.history_path())?)
    }
}

/// A calculation request given as a JSON document or as individual flags.
#[derive(Args)]
pub struct RequestArgs {
    /// JSON file holding a calculation request (falls back to stdin, then flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan product key, e.g. mortgage
    #[arg(long)]
    pub loan_type: Option<String>,

    /// Property or vehicle price, or the requested amount for products without a down payment
    #[arg(long, alias = "basis")]
    pub amount: Option<f64>,

    /// Down payment in currency units
    #[arg(long)]
    pub down_payment: Option<f64>,

    /// Term in whole years
    #[arg(long, alias = "years")]
    pub term: Option<u32>,
}

impl RequestArgs {
    /// Build the request from individual flags only.
    pub fn into_input(self) -> Result<CalculationInput, Box<dyn std::error::Error>> {
        Ok(CalculationInput {
            loan_type: self
                .loan_type
                .ok_or("--loan-type is required (or provide --input)")?,
            principal_basis: self
                .amount
                .ok_or("--amount is required (or provide --input)")?,
            down_payment: self.down_payment,
            term_years: self.term.ok_or("--term is required (or provide --input)")?,
        })
    }

    /// `--input` file, then piped stdin, then flags. Stdin is only read
    /// when no `--loan-type` flag was given.
    pub fn resolve(self) -> Result<CalculationInput, Box<dyn std::error::Error>> {
        if let Some(ref path) = self.input {
            return input::file::read_json(path);
        }
        if self.loan_type.is_none() {
            if let Some(request) = input::stdin::read_stdin_as::<CalculationInput>()? {
                return Ok(request);
            }
        }
        self.into_input()
    }
}
