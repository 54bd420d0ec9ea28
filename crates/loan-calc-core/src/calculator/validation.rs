use crate::catalog::LoanConfig;
use crate::error::LoanCalcError;
use crate::types::Money;
use crate::LoanCalcResult;

use super::amortization::CalculationInput;

/// Check a request against its product's bounds.
///
/// Returns the loan amount (principal basis less any down payment) when
/// every bound holds. Checks run in a fixed order: principal basis, term,
/// then down payment, and the first violation is reported.
pub fn validate_input(input: &CalculationInput, config: &LoanConfig) -> LoanCalcResult<Money> {
    let basis = input.principal_basis;
    if !basis.is_finite() || basis <= 0.0 {
        return Err(LoanCalcError::InvalidInput {
            field: "principal_basis".into(),
            reason: "Principal basis must be a positive number".into(),
        });
    }
    check_range("principal_basis", basis, config.min_amount, config.max_amount)?;

    if input.term_years == 0 {
        return Err(LoanCalcError::InvalidTerm {
            term_years: input.term_years,
        });
    }
    check_range(
        "term_years",
        f64::from(input.term_years),
        f64::from(config.min_term),
        f64::from(config.max_term),
    )?;

    if !config.has_down_payment() {
        return Ok(basis);
    }

    let down_payment = input.down_payment.unwrap_or(0.0);
    if !down_payment.is_finite() || down_payment < 0.0 || down_payment >= basis {
        return Err(LoanCalcError::out_of_bounds(
            "down_payment",
            0.0,
            basis,
            down_payment,
        ));
    }
    let (min_dp, max_dp) = config.down_payment_range(basis);
    check_range("down_payment", down_payment, min_dp, max_dp)?;

    Ok(basis - down_payment)
}

/// Inclusive range check.
fn check_range(field: &str, actual: f64, min: f64, max: f64) -> LoanCalcResult<()> {
    if actual < min || actual > max {
        return Err(LoanCalcError::out_of_bounds(field, min, max, actual));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn mortgage() -> LoanConfig {
        Catalog::defaults().get("mortgage").unwrap().clone()
    }

    fn consumer() -> LoanConfig {
        Catalog::defaults().get("consumer").unwrap().clone()
    }

    fn input(loan_type: &str, basis: f64, down: Option<f64>, term: u32) -> CalculationInput {
        CalculationInput {
            loan_type: loan_type.into(),
            principal_basis: basis,
            down_payment: down,
            term_years: term,
        }
    }

    fn field_of(err: LoanCalcError) -> String {
        match err {
            LoanCalcError::OutOfBounds { field, .. } => field,
            other => panic!("Expected OutOfBounds, got {other:?}"),
        }
    }

    #[test]
    fn test_loan_amount_subtracts_down_payment() {
        let amount = validate_input(&input("mortgage", 2_000_000.0, Some(400_000.0), 10), &mortgage());
        assert_eq!(amount.unwrap(), 1_600_000.0);
    }

    #[test]
    fn test_no_down_payment_product_ignores_down_payment() {
        let amount = validate_input(&input("consumer", 500_000.0, Some(100_000.0), 3), &consumer());
        assert_eq!(amount.unwrap(), 500_000.0);
    }

    #[test]
    fn test_basis_below_minimum() {
        let err = validate_input(&input("mortgage", 99_999.0, Some(20_000.0), 10), &mortgage())
            .unwrap_err();
        match err {
            LoanCalcError::OutOfBounds {
                field,
                min,
                max,
                actual,
            } => {
                assert_eq!(field, "principal_basis");
                assert_eq!(min, 100_000.0);
                assert_eq!(max, 5_000_000.0);
                assert_eq!(actual, 99_999.0);
            }
            other => panic!("Expected OutOfBounds, got {other:?}"),
        }
    }

    #[test]
    fn test_non_positive_basis_is_invalid_input() {
        let err = validate_input(&input("consumer", 0.0, None, 3), &consumer()).unwrap_err();
        assert!(matches!(err, LoanCalcError::InvalidInput { .. }));
        let err = validate_input(&input("consumer", f64::NAN, None, 3), &consumer()).unwrap_err();
        assert!(matches!(err, LoanCalcError::InvalidInput { .. }));
    }

    #[test]
    fn test_zero_term_is_invalid_term() {
        let err = validate_input(&input("consumer", 500_000.0, None, 0), &consumer()).unwrap_err();
        assert!(matches!(err, LoanCalcError::InvalidTerm { term_years: 0 }));
    }

    #[test]
    fn test_term_above_maximum() {
        let err = validate_input(&input("consumer", 500_000.0, None, 6), &consumer()).unwrap_err();
        assert_eq!(field_of(err), "term_years");
    }

    #[test]
    fn test_missing_down_payment_counts_as_zero() {
        let err = validate_input(&input("mortgage", 2_000_000.0, None, 10), &mortgage()).unwrap_err();
        assert_eq!(field_of(err), "down_payment");
    }

    #[test]
    fn test_negative_or_full_down_payment() {
        let cfg = mortgage();
        let err = validate_input(&input("mortgage", 2_000_000.0, Some(-1.0), 10), &cfg).unwrap_err();
        assert_eq!(field_of(err), "down_payment");

        let mut open = cfg.clone();
        open.max_down_payment = 100.0;
        let err =
            validate_input(&input("mortgage", 2_000_000.0, Some(2_000_000.0), 10), &open).unwrap_err();
        assert_eq!(field_of(err), "down_payment");
    }
}
