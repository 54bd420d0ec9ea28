use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::display_cell;

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => print_envelope(result, map),
            _ => println!("{}", field_table(map)),
        },
        Value::Array(rows) => println!("{}", rows_table(rows)),
        other => println!("{}", display_cell(other)),
    }
}

fn print_envelope(result: &Map<String, Value>, envelope: &Map<String, Value>) {
    println!("{}", field_table(result));

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn field_table(map: &Map<String, Value>) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.clone(), display_cell(val)]);
    }
    builder.build()
}

/// One row per object; columns come from the first object.
fn rows_table(rows: &[Value]) -> String {
    let Some(Value::Object(first)) = rows.first() else {
        return if rows.is_empty() {
            "(empty)".to_string()
        } else {
            rows.iter().map(display_cell).collect::<Vec<_>>().join("\n")
        };
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for row in rows.iter().filter_map(Value::as_object) {
        builder.push_record(
            headers
                .iter()
                .map(|h| row.get(h).map(display_cell).unwrap_or_default()),
        );
    }
    builder.build().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schedule_rows_render_as_columns() {
        let rows = json!([
            {"month": 1, "payment": 17210.49, "balance": 491_039.47},
            {"month": 2, "payment": 17210.49, "balance": 481_970.16},
        ]);
        let rendered = rows_table(rows.as_array().unwrap());
        assert!(rendered.contains("month"));
        assert!(rendered.contains("17 210.49"));
        assert!(rendered.contains("481 970.16"));
    }

    #[test]
    fn test_empty_rows() {
        assert_eq!(rows_table(&[]), "(empty)");
    }
}
