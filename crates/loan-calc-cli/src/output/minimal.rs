use serde_json::Value;

use super::display_cell;

/// Fields worth printing on their own, most useful first.
const HEADLINE_FIELDS: [&str; 5] = [
    "monthlyPayment",
    "loanAmount",
    "avgValue",
    "loanType",
    "success",
];

/// Print just the headline value: the first headline field present in the
/// result envelope, else the first field, else the whole value.
pub fn print_minimal(value: &Value) {
    println!("{}", headline(value));
}

fn headline(value: &Value) -> String {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result {
        Value::Object(map) => HEADLINE_FIELDS
            .iter()
            .find_map(|key| map.get(*key).filter(|v| !v.is_null()))
            .map(display_cell)
            .or_else(|| {
                map.iter()
                    .next()
                    .map(|(key, val)| format!("{}: {}", key, display_cell(val)))
            })
            .unwrap_or_default(),
        Value::Array(rows) => format!("{} rows", rows.len()),
        other => display_cell(other),
    }
}
