//! Month-by-month amortization schedule for a computed loan.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::types::{Money, Years};
use crate::LoanCalcResult;

use super::amortization::{annuity_payment, compute_with_config, term_months, CalculationInput};

/// One scheduled payment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRow {
    /// 1-based month number.
    pub month: u32,
    pub payment: Money,
    pub interest: Money,
    pub principal: Money,
    /// Outstanding balance after this payment.
    pub balance: Money,
}

/// Split each level payment into interest and principal.
///
/// The last row's balance is forced to zero to absorb floating-point drift.
pub fn amortization_schedule(
    loan_amount: Money,
    annual_rate: f64,
    term_years: Years,
) -> LoanCalcResult<Vec<ScheduleRow>> {
    let months = term_months(term_years)?;
    let monthly_rate = annual_rate / 12.0 / 100.0;
    let payment = annuity_payment(loan_amount, monthly_rate, months);

    let mut rows = Vec::with_capacity(months as usize);
    let mut balance = loan_amount;
    for month in 1..=months {
        let interest = balance * monthly_rate;
        let principal = payment - interest;
        balance -= principal;
        if month == months || balance < 0.0 {
            balance = 0.0;
        }
        rows.push(ScheduleRow {
            month,
            payment,
            interest,
            principal,
            balance,
        });
    }
    Ok(rows)
}

/// Validate `input` against the catalog and build its schedule.
pub fn schedule_for(input: &CalculationInput, catalog: &Catalog) -> LoanCalcResult<Vec<ScheduleRow>> {
    let config = catalog.require(&input.loan_type)?;
    let result = compute_with_config(input, config)?;
    amortization_schedule(result.loan_amount, config.interest_rate, input.term_years)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_length_and_final_balance() {
        let rows = amortization_schedule(1_600_000.0, 9.6, 10).unwrap();
        assert_eq!(rows.len(), 120);
        assert_eq!(rows.last().unwrap().balance, 0.0);
        assert_eq!(rows[0].month, 1);
    }

    #[test]
    fn test_first_month_interest() {
        let rows = amortization_schedule(1_600_000.0, 9.6, 10).unwrap();
        // 1.6M * 0.008
        assert!((rows[0].interest - 12_800.0).abs() < 1e-6);
        assert!((rows[0].principal + rows[0].interest - rows[0].payment).abs() < 1e-9);
    }

    #[test]
    fn test_principal_repaid_in_full() {
        let rows = amortization_schedule(500_000.0, 14.5, 3).unwrap();
        let repaid: f64 = rows.iter().map(|r| r.principal).sum();
        assert!((repaid - 500_000.0).abs() < 1e-4, "repaid {repaid}");
    }

    #[test]
    fn test_interest_declines_over_time() {
        let rows = amortization_schedule(1_000_000.0, 12.0, 5).unwrap();
        assert!(rows.windows(2).all(|w| w[1].interest < w[0].interest));
    }

    #[test]
    fn test_oversized_term_is_rejected() {
        assert!(amortization_schedule(1_000_000.0, 12.0, 101).is_err());
        assert!(amortization_schedule(1_000_000.0, 12.0, u32::MAX).is_err());
    }

    #[test]
    fn test_schedule_for_validates() {
        let input = CalculationInput {
            loan_type: "auto".into(),
            principal_basis: 1_000_000.0,
            down_payment: Some(10_000.0),
            term_years: 5,
        };
        assert!(schedule_for(&input, &Catalog::defaults()).is_err());
    }
}
