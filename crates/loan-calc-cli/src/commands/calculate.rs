use clap::Args;
use serde_json::Value;

use loan_calc_core::calculator::{analyze_loan, schedule_for, CalculationInput, CalculationResult};
use loan_calc_core::notify::Recipient;

use super::{email, Context, RequestArgs};

#[derive(Args)]
pub struct CalculateArgs {
    #[command(flatten)]
    pub request: RequestArgs,

    /// Also mail the result summary to this address
    #[arg(long)]
    pub email: Option<String>,

    /// Append the calculation to the history file
    #[arg(long)]
    pub record: bool,
}

#[derive(Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub request: RequestArgs,
}

pub fn run_calculate(ctx: &Context, args: CalculateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let recipient = args.email.as_deref().map(Recipient::parse).transpose()?;
    let request = args.request.resolve()?;
    let catalog = ctx.load_catalog();
    let output = analyze_loan(&request, &catalog)?;

    if let Some(ref to) = recipient {
        email::deliver(ctx, to, catalog.require(&request.loan_type)?, &output.result)?;
    }
    if args.record {
        record(ctx, request, recipient.map(String::from), output.result)?;
    }
    Ok(serde_json::to_value(output)?)
}

pub fn run_schedule(ctx: &Context, args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request = args.request.resolve()?;
    let rows = schedule_for(&request, &ctx.load_catalog())?;
    Ok(serde_json::to_value(rows)?)
}

/// Append one calculation to the history file.
pub(crate) fn record(
    ctx: &Context,
    request: CalculationInput,
    email: Option<String>,
    result: CalculationResult,
) -> Result<(), Box<dyn std::error::Error>> {
    let path = ctx.history_path();
    let mut history = ctx.load_history()?;
    let id = history.push(request, email, result).id;
    history.write_to(&path)?;
    tracing::info!(id, path = %path.display(), "calculation recorded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    fn context(dir: &std::path::Path) -> Context {
        Context::new(Settings {
            data_dir: dir.to_path_buf(),
            ..Settings::default()
        })
    }

    fn consumer_request() -> RequestArgs {
        RequestArgs {
            input: None,
            loan_type: Some("consumer".into()),
            amount: Some(500_000.0),
            down_payment: None,
            term: Some(3),
        }
    }

    #[test]
    fn test_calculate_mails_and_records() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());

        let value = run_calculate(
            &ctx,
            CalculateArgs {
                request: consumer_request(),
                email: Some("client@bank.example".into()),
                record: true,
            },
        )
        .unwrap();
        assert_eq!(value["result"]["loanAmount"], 500_000.0);

        let history = ctx.load_history().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history.records()[0].input.loan_type, "consumer");
        assert_eq!(history.records()[0].email.as_deref(), Some("client@bank.example"));
        assert_eq!(std::fs::read_dir(ctx.settings.outbox_dir()).unwrap().count(), 1);
    }

    #[test]
    fn test_schedule_has_one_row_per_month() {
        let dir = tempfile::tempdir().unwrap();
        let value = run_schedule(
            &context(dir.path()),
            ScheduleArgs {
                request: consumer_request(),
            },
        )
        .unwrap();
        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 36);
        assert_eq!(rows[35]["balance"], 0.0);
    }
}
