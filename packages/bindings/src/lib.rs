use loan_calc_core::calculator::{self, CalculationInput};
use loan_calc_core::catalog::{Catalog, LoanConfig, MemoryConfigStore};
use loan_calc_core::notify::{EmailMessage, Recipient, ResultSummary};
use loan_calc_core::telemetry::{self, Metric, VitalsRegistry};
use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// The catalog the frontend holds, or the built-in products when it has none
/// or it does not validate.
fn catalog_from(catalog_json: Option<String>) -> Catalog {
    let configs = catalog_json.and_then(|json| serde_json::from_str::<Vec<LoanConfig>>(&json).ok());
    match configs {
        Some(configs) => Catalog::load(Some(&MemoryConfigStore::with_configs(configs))),
        None => Catalog::defaults(),
    }
}

fn catalog_to_json(catalog: &Catalog) -> NapiResult<String> {
    serde_json::to_string(catalog.as_slice()).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Calculation
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_loan(input_json: String, catalog_json: Option<String>) -> NapiResult<String> {
    let input: CalculationInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        calculator::analyze_loan(&input, &catalog_from(catalog_json)).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn loan_schedule(input_json: String, catalog_json: Option<String>) -> NapiResult<String> {
    let input: CalculationInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let rows =
        calculator::schedule_for(&input, &catalog_from(catalog_json)).map_err(to_napi_error)?;
    serde_json::to_string(&rows).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[napi]
pub fn default_catalog() -> NapiResult<String> {
    catalog_to_json(&Catalog::defaults())
}

#[napi]
pub fn upsert_config(catalog_json: Option<String>, config_json: String) -> NapiResult<String> {
    let config: LoanConfig = serde_json::from_str(&config_json).map_err(to_napi_error)?;
    let updated = catalog_from(catalog_json)
        .upsert(config)
        .map_err(to_napi_error)?;
    catalog_to_json(&updated)
}

#[napi]
pub fn remove_config(catalog_json: Option<String>, loan_type: String) -> NapiResult<String> {
    catalog_to_json(&catalog_from(catalog_json).remove(&loan_type))
}

// ---------------------------------------------------------------------------
// Result mail
// ---------------------------------------------------------------------------

#[napi]
pub fn format_email(
    sender: String,
    recipient: String,
    input_json: String,
    catalog_json: Option<String>,
) -> NapiResult<String> {
    let to = Recipient::parse(&recipient).map_err(to_napi_error)?;
    let input: CalculationInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let catalog = catalog_from(catalog_json);
    let config = catalog.require(&input.loan_type).map_err(to_napi_error)?;
    let result = calculator::compute_with_config(&input, config).map_err(to_napi_error)?;
    let message = EmailMessage::compose(&sender, to, &ResultSummary::new(config, &result))
        .map_err(to_napi_error)?;
    serde_json::to_string(&message).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Telemetry
// ---------------------------------------------------------------------------

#[napi]
pub fn aggregate_metrics(metrics_json: String) -> NapiResult<String> {
    let metrics: Vec<Metric> = serde_json::from_str(&metrics_json).map_err(to_napi_error)?;
    serde_json::to_string(&telemetry::aggregate(&metrics)).map_err(to_napi_error)
}

#[napi]
pub fn vitals_exposition(metrics_json: String) -> NapiResult<String> {
    let metrics: Vec<Metric> = serde_json::from_str(&metrics_json).map_err(to_napi_error)?;
    Ok(VitalsRegistry::from_metrics(&metrics).render())
}
