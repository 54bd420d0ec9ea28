use clap::Subcommand;
use serde_json::Value;

use super::Context;

#[derive(Subcommand)]
pub enum HistoryCommand {
    /// Show recorded calculations
    List {
        /// Only the most recent N records
        #[arg(long)]
        last: Option<usize>,
    },
    /// Write all records as CSV to stdout
    Export,
}

pub fn run_history(ctx: &Context, action: HistoryCommand) -> Result<Value, Box<dyn std::error::Error>> {
    let history = ctx.load_history()?;
    match action {
        HistoryCommand::List { last } => {
            let records = history.records();
            let skip = last.map_or(0, |n| records.len().saturating_sub(n));
            Ok(serde_json::to_value(&records[skip..])?)
        }
        HistoryCommand::Export => {
            print!("{}", history.to_csv()?);
            Ok(Value::Null)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use loan_calc_core::calculator::{compute_loan, CalculationInput};
    use loan_calc_core::catalog::Catalog;
    use loan_calc_core::history::History;

    #[test]
    fn test_list_last_records() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::new(Settings {
            data_dir: dir.path().to_path_buf(),
            ..Settings::default()
        });

        let mut history = History::new();
        for term in 1..=4 {
            let input = CalculationInput {
                loan_type: "education".into(),
                principal_basis: 300_000.0,
                down_payment: None,
                term_years: term,
            };
            let result = compute_loan(&input, &Catalog::defaults()).unwrap();
            history.push(input, None, result);
        }
        history.write_to(&ctx.history_path()).unwrap();

        let listed = run_history(&ctx, HistoryCommand::List { last: Some(2) }).unwrap();
        let ids: Vec<u64> = listed
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["id"].as_u64().unwrap())
            .collect();
        assert_eq!(ids, vec![3, 4]);
    }

    #[test]
    fn test_empty_history_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::new(Settings {
            data_dir: dir.path().to_path_buf(),
            ..Settings::default()
        });
        let listed = run_history(&ctx, HistoryCommand::List { last: None }).unwrap();
        assert_eq!(listed, Value::Array(Vec::new()));
    }
}
