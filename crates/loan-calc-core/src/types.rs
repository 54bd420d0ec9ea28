use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Currency amounts. Double precision throughout the calculation; rounding
/// to minor units only happens at presentation via [`round_money`].
pub type Money = f64;

/// Rates and shares expressed as percentages (9.6 = 9.6%). Never as decimals.
pub type Percent = f64;

/// Whole years
pub type Years = u32;

/// Minor units kept when presenting money.
pub const MONEY_SCALE: u32 = 2;

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "f64".to_string(),
        },
    }
}

/// Round an amount to minor units, midpoint away from zero.
///
/// Non-finite values collapse to zero.
pub fn round_money(value: Money) -> Decimal {
    let mut rounded = Decimal::from_f64_retain(value)
        .unwrap_or_default()
        .round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_SCALE);
    rounded
}

/// Render an amount with space-grouped thousands: `1 600 000.00`.
pub fn format_money(value: Money) -> String {
    group_thousands(round_money(value))
}

/// Space-group the integer digits of an already-rounded amount.
pub fn group_thousands(amount: Decimal) -> String {
    let text = amount.to_string();
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }

    if fraction.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{fraction}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_money_half_up() {
        assert_eq!(round_money(20791.310671918585), dec!(20791.31));
        assert_eq!(round_money(0.125), dec!(0.13));
        assert_eq!(round_money(-0.125), dec!(-0.13));
    }

    #[test]
    fn test_round_money_keeps_two_places() {
        assert_eq!(round_money(1_600_000.0).to_string(), "1600000.00");
    }

    #[test]
    fn test_round_money_non_finite_is_zero() {
        assert_eq!(round_money(f64::NAN), Decimal::ZERO);
        assert_eq!(round_money(f64::INFINITY), Decimal::ZERO);
    }

    #[test]
    fn test_group_thousands_keeps_scale() {
        assert_eq!(group_thousands(dec!(51978.28)), "51 978.28");
        assert_eq!(group_thousands(dec!(100)), "100");
    }

    #[test]
    fn test_format_money_groups_thousands() {
        assert_eq!(format_money(1_600_000.0), "1 600 000.00");
        assert_eq!(format_money(20791.310671918585), "20 791.31");
        assert_eq!(format_money(999.0), "999.00");
        assert_eq!(format_money(-1234.5), "-1 234.50");
    }
}
