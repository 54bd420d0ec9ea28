pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use serde_json::Value;

use crate::OutputFormat;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Cell text for table and minimal output. Floats of magnitude one or more
/// are shown as money: two decimals, space-grouped thousands.
pub(crate) fn display_cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(f)) if f.abs() >= 1.0 => {
                loan_calc_core::format_money(f)
            }
            _ => n.to_string(),
        },
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        Value::Array(items) => items.iter().map(display_cell).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_cell() {
        assert_eq!(display_cell(&json!(20791.310671918585)), "20 791.31");
        assert_eq!(display_cell(&json!(1600000.0)), "1 600 000.00");
        assert_eq!(display_cell(&json!(9.6)), "9.60");
        assert_eq!(display_cell(&json!(120)), "120");
        assert_eq!(display_cell(&json!(0.05)), "0.05");
        assert_eq!(display_cell(&json!(null)), "-");
        assert_eq!(display_cell(&json!(["a", "b"])), "a, b");
    }
}
