//! Fixed-rate annuity loan calculation.
//!
//! The monthly payment follows the standard amortization formula
//!
//! ```text
//! payment = L * r * (1 + r)^n / ((1 + r)^n - 1)
//! ```
//!
//! with `L` the loan amount, `r` the monthly rate and `n` the number of
//! monthly payments. All arithmetic is `f64`; nothing is rounded here.

use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::catalog::{Catalog, LoanConfig, MAX_TERM_YEARS};
use crate::types::{with_metadata, ComputationOutput, Money, Years};
use crate::{LoanCalcError, LoanCalcResult};

use super::validation::validate_input;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Affordability heuristic: income needed per unit of monthly payment.
pub const REQUIRED_INCOME_MULTIPLIER: f64 = 2.5;

pub const MONTHS_PER_YEAR: u32 = 12;

// ---------------------------------------------------------------------------
// Input / output types
// ---------------------------------------------------------------------------

/// A user-supplied calculation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationInput {
    /// Catalog key of the product.
    pub loan_type: String,
    /// Value the loan finances: property, vehicle, tuition, business need.
    pub principal_basis: Money,
    /// Upfront payment in currency units. Ignored for products without a
    /// down-payment concept.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub down_payment: Option<Money>,
    /// Loan term in whole years.
    pub term_years: Years,
}

/// Derived loan figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub loan_amount: Money,
    pub monthly_payment: Money,
    pub total_payment: Money,
    pub overpayment: Money,
    pub required_income: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Resolve the product in `catalog` and compute the loan.
pub fn compute_loan(input: &CalculationInput, catalog: &Catalog) -> LoanCalcResult<CalculationResult> {
    let config = catalog.require(&input.loan_type)?;
    compute_with_config(input, config)
}

/// Compute the loan against an already-resolved product.
pub fn compute_with_config(
    input: &CalculationInput,
    config: &LoanConfig,
) -> LoanCalcResult<CalculationResult> {
    let loan_amount = validate_input(input, config)?;
    let months = term_months(input.term_years)?;
    let monthly_payment = annuity_payment(loan_amount, config.monthly_rate(), months);
    let total_payment = monthly_payment * f64::from(months);

    Ok(CalculationResult {
        loan_amount,
        monthly_payment,
        total_payment,
        overpayment: total_payment - loan_amount,
        required_income: monthly_payment * REQUIRED_INCOME_MULTIPLIER,
    })
}

/// Number of monthly payments in `term_years`. Terms above
/// [`MAX_TERM_YEARS`] are rejected as `InvalidTerm`.
pub fn term_months(term_years: Years) -> LoanCalcResult<u32> {
    term_years
        .checked_mul(MONTHS_PER_YEAR)
        .filter(|_| term_years <= MAX_TERM_YEARS)
        .ok_or(LoanCalcError::InvalidTerm { term_years })
}

/// [`compute_loan`] wrapped in the standard output envelope.
pub fn analyze_loan(
    input: &CalculationInput,
    catalog: &Catalog,
) -> LoanCalcResult<ComputationOutput<CalculationResult>> {
    let start = Instant::now();
    let config = catalog.require(&input.loan_type)?;
    let result = compute_with_config(input, config)?;

    let mut warnings = Vec::new();
    if !config.has_down_payment() && input.down_payment.is_some_and(|dp| dp != 0.0) {
        warnings.push(format!(
            "{} has no down payment; the supplied down payment was ignored",
            config.title
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        &format!("Fixed-rate annuity at {}% p.a.", config.interest_rate),
        input,
        warnings,
        elapsed,
        result,
    ))
}

/// Level monthly payment that amortizes `loan_amount` over `months`.
///
/// A zero rate degenerates to straight division.
pub fn annuity_payment(loan_amount: Money, monthly_rate: f64, months: u32) -> Money {
    if months == 0 {
        return 0.0;
    }
    let n = f64::from(months);
    if monthly_rate == 0.0 {
        return loan_amount / n;
    }
    let growth = (1.0 + monthly_rate).powf(n);
    loan_amount * monthly_rate * growth / (growth - 1.0)
}
