//! Built-in loan products used whenever no usable stored catalog exists.

use super::config::LoanConfig;

/// Loan types of the built-in catalog, in display order.
pub const DEFAULT_LOAN_TYPES: [&str; 5] = ["mortgage", "auto", "consumer", "education", "business"];

/// The five compiled-in loan products.
pub fn default_configs() -> Vec<LoanConfig> {
    vec![
        product("mortgage", "Mortgage", 9.6, (100_000.0, 5_000_000.0), (1, 30), (10.0, 90.0)),
        product("auto", "Auto loan", 3.5, (100_000.0, 3_000_000.0), (1, 7), (15.0, 80.0)),
        product("consumer", "Consumer loan", 14.5, (50_000.0, 1_000_000.0), (1, 5), (0.0, 0.0)),
        product("education", "Education loan", 7.9, (50_000.0, 2_000_000.0), (1, 10), (0.0, 0.0)),
        product("business", "Business loan", 12.0, (500_000.0, 10_000_000.0), (1, 15), (20.0, 60.0)),
    ]
}

fn product(
    loan_type: &str,
    title: &str,
    interest_rate: f64,
    amount: (f64, f64),
    term: (u32, u32),
    down_payment: (f64, f64),
) -> LoanConfig {
    LoanConfig {
        loan_type: loan_type.to_string(),
        title: title.to_string(),
        interest_rate,
        min_amount: amount.0,
        max_amount: amount.1,
        min_term: term.0,
        max_term: term.1,
        min_down_payment: down_payment.0,
        max_down_payment: down_payment.1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid_and_ordered() {
        let configs = default_configs();
        let keys: Vec<&str> = configs.iter().map(|c| c.loan_type.as_str()).collect();
        assert_eq!(keys, DEFAULT_LOAN_TYPES);
        for cfg in &configs {
            assert!(cfg.validate().is_ok(), "{} should be valid", cfg.loan_type);
        }
    }
}
