//! Loan product definitions: rate plus amount, term and down-payment bounds.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::LoanCalcError;
use crate::types::{Money, Percent, Years};
use crate::LoanCalcResult;

/// Longest term any product may offer.
pub const MAX_TERM_YEARS: Years = 100;

/// Terms offered for one loan product.
///
/// Field names serialise in camelCase so documents written by the browser
/// frontend (`loanType`, `interestRate`, ...) load unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanConfig {
    /// Stable catalog key, e.g. `mortgage`.
    pub loan_type: String,
    /// Display name.
    pub title: String,
    /// Annual interest rate in percent (9.6 = 9.6%).
    pub interest_rate: Percent,
    /// Smallest accepted principal basis.
    pub min_amount: Money,
    /// Largest accepted principal basis.
    pub max_amount: Money,
    /// Shortest term in whole years.
    pub min_term: Years,
    /// Longest term in whole years.
    pub max_term: Years,
    /// Lowest down payment as a percentage of the principal basis.
    pub min_down_payment: Percent,
    /// Highest down payment as a percentage of the principal basis.
    pub max_down_payment: Percent,
}

impl LoanConfig {
    /// Whether the product takes a down payment at all.
    ///
    /// Products with both down-payment bounds at zero (consumer, education)
    /// lend the full principal basis.
    pub fn has_down_payment(&self) -> bool {
        !(self.min_down_payment == 0.0 && self.max_down_payment == 0.0)
    }

    /// Every whole-year term the product offers.
    pub fn terms(&self) -> RangeInclusive<Years> {
        self.min_term..=self.max_term
    }

    /// Monthly interest rate as a fraction.
    pub fn monthly_rate(&self) -> f64 {
        self.interest_rate / 12.0 / 100.0
    }

    /// Down-payment bounds in currency units for a given principal basis.
    pub fn down_payment_range(&self, principal_basis: Money) -> (Money, Money) {
        (
            principal_basis * self.min_down_payment / 100.0,
            principal_basis * self.max_down_payment / 100.0,
        )
    }

    /// What the principal basis means for this product.
    pub fn basis_label(&self) -> &'static str {
        match self.loan_type.as_str() {
            "mortgage" => "Property value",
            "auto" => "Vehicle value",
            "education" => "Tuition cost",
            "business" => "Required amount",
            _ => "Loan amount",
        }
    }

    /// Check the bound invariants. Rejected configs never enter a catalog.
    pub fn validate(&self) -> LoanCalcResult<()> {
        if self.loan_type.trim().is_empty() {
            return Err(self.invalid("loan type must not be empty"));
        }
        if self.title.trim().is_empty() {
            return Err(self.invalid("title must not be empty"));
        }

        let numbers = [
            ("interestRate", self.interest_rate),
            ("minAmount", self.min_amount),
            ("maxAmount", self.max_amount),
            ("minDownPayment", self.min_down_payment),
            ("maxDownPayment", self.max_down_payment),
        ];
        if let Some((name, _)) = numbers.iter().find(|(_, v)| !v.is_finite()) {
            return Err(self.invalid(&format!("{name} must be a finite number")));
        }

        if self.interest_rate <= 0.0 {
            return Err(self.invalid("interest rate must be greater than zero"));
        }
        if self.min_amount <= 0.0 {
            return Err(self.invalid("minimum amount must be greater than zero"));
        }
        if self.min_amount > self.max_amount {
            return Err(self.invalid(&format!(
                "minimum amount {} exceeds maximum amount {}",
                self.min_amount, self.max_amount
            )));
        }
        if self.min_term < 1 {
            return Err(self.invalid("minimum term must be at least one year"));
        }
        if self.min_term > self.max_term {
            return Err(self.invalid(&format!(
                "minimum term {} exceeds maximum term {}",
                self.min_term, self.max_term
            )));
        }
        if self.max_term > MAX_TERM_YEARS {
            return Err(self.invalid(&format!(
                "maximum term {} exceeds the {MAX_TERM_YEARS}-year ceiling",
                self.max_term
            )));
        }
        if self.min_down_payment < 0.0 || self.max_down_payment > 100.0 {
            return Err(self.invalid("down payment bounds must lie within 0..=100 percent"));
        }
        if self.min_down_payment > self.max_down_payment {
            return Err(self.invalid(&format!(
                "minimum down payment {}% exceeds maximum down payment {}%",
                self.min_down_payment, self.max_down_payment
            )));
        }
        Ok(())
    }

    fn invalid(&self, reason: &str) -> LoanCalcError {
        LoanCalcError::InvalidConfig {
            loan_type: self.loan_type.clone(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LoanConfig {
        LoanConfig {
            loan_type: "mortgage".into(),
            title: "Mortgage".into(),
            interest_rate: 9.6,
            min_amount: 100_000.0,
            max_amount: 5_000_000.0,
            min_term: 1,
            max_term: 30,
            min_down_payment: 10.0,
            max_down_payment: 90.0,
        }
    }

    fn reason_of(err: LoanCalcError) -> String {
        match err {
            LoanCalcError::InvalidConfig { reason, .. } => reason,
            other => panic!("Expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_min_amount_above_max_rejected() {
        let mut cfg = sample();
        cfg.min_amount = 6_000_000.0;
        let reason = reason_of(cfg.validate().unwrap_err());
        assert!(reason.contains("minimum amount"), "{reason}");
    }

    #[test]
    fn test_term_bounds_rejected() {
        let mut cfg = sample();
        cfg.min_term = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = sample();
        cfg.min_term = 10;
        cfg.max_term = 5;
        let reason = reason_of(cfg.validate().unwrap_err());
        assert!(reason.contains("minimum term"), "{reason}");

        let mut cfg = sample();
        cfg.max_term = MAX_TERM_YEARS;
        assert!(cfg.validate().is_ok());
        cfg.max_term = MAX_TERM_YEARS + 1;
        let reason = reason_of(cfg.validate().unwrap_err());
        assert!(reason.contains("ceiling"), "{reason}");
    }

    #[test]
    fn test_down_payment_bounds_rejected() {
        let mut cfg = sample();
        cfg.max_down_payment = 120.0;
        assert!(cfg.validate().is_err());

        let mut cfg = sample();
        cfg.min_down_payment = 50.0;
        cfg.max_down_payment = 40.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_zero_rate_and_nan_rejected() {
        let mut cfg = sample();
        cfg.interest_rate = 0.0;
        assert!(cfg.validate().is_err());

        let mut cfg = sample();
        cfg.max_amount = f64::NAN;
        let reason = reason_of(cfg.validate().unwrap_err());
        assert!(reason.contains("maxAmount"), "{reason}");
    }

    #[test]
    fn test_blank_key_rejected() {
        let mut cfg = sample();
        cfg.loan_type = "  ".into();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_has_down_payment_zero_bounds_convention() {
        assert!(sample().has_down_payment());
        let mut cfg = sample();
        cfg.min_down_payment = 0.0;
        cfg.max_down_payment = 0.0;
        assert!(!cfg.has_down_payment());
        // A zero floor alone still means a down payment is taken.
        cfg.max_down_payment = 30.0;
        assert!(cfg.has_down_payment());
    }

    #[test]
    fn test_terms_and_down_payment_range() {
        let cfg = sample();
        assert_eq!(cfg.terms().count(), 30);
        assert_eq!(cfg.down_payment_range(2_000_000.0), (200_000.0, 1_800_000.0));
    }

    #[test]
    fn test_camel_case_wire_format() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["loanType"], "mortgage");
        assert_eq!(json["interestRate"], 9.6);
        assert_eq!(json["minDownPayment"], 10.0);
    }
}
