use clap::Args;
use serde_json::{json, Value};

use loan_calc_core::calculator::{compute_with_config, CalculationResult};
use loan_calc_core::catalog::LoanConfig;
use loan_calc_core::notify::{send_summary, EmailMessage, Recipient, ResultSummary};

use super::{calculate, Context, RequestArgs};
use crate::mail;

#[derive(Args)]
pub struct EmailArgs {
    /// Client address to send the summary to
    #[arg(long)]
    pub to: String,

    #[command(flatten)]
    pub request: RequestArgs,

    /// Append the calculation, with the recipient, to the history file
    #[arg(long)]
    pub record: bool,
}

pub fn run_email(ctx: &Context, args: EmailArgs) -> Result<Value, Box<dyn std::error::Error>> {
    // Reject the address before doing any work.
    let recipient = Recipient::parse(&args.to)?;
    let request = args.request.resolve()?;

    let catalog = ctx.load_catalog();
    let config = catalog.require(&request.loan_type)?;
    let result = compute_with_config(&request, config)?;
    let summary = deliver(ctx, &recipient, config, &result)?;

    if args.record {
        calculate::record(ctx, request, Some(recipient.to_string()), result)?;
    }

    Ok(json!({
        "success": true,
        "recipient": recipient,
        "summary": summary,
    }))
}

/// Compose the summary for `result` and hand it to the configured transport.
pub(crate) fn deliver(
    ctx: &Context,
    recipient: &Recipient,
    config: &LoanConfig,
    result: &CalculationResult,
) -> Result<ResultSummary, Box<dyn std::error::Error>> {
    let summary = ResultSummary::new(config, result);
    let message = EmailMessage::compose(&ctx.settings.mail.sender, recipient.clone(), &summary)?;
    let transport = mail::build_transport(&ctx.settings)?;
    send_summary(transport.as_ref(), &message)?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    #[test]
    fn test_email_lands_in_outbox_and_history() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::new(Settings {
            data_dir: dir.path().to_path_buf(),
            ..Settings::default()
        });

        let out = run_email(
            &ctx,
            EmailArgs {
                to: "client@bank.example".into(),
                request: RequestArgs {
                    input: None,
                    loan_type: Some("mortgage".into()),
                    amount: Some(2_000_000.0),
                    down_payment: Some(400_000.0),
                    term: Some(10),
                },
                record: true,
            },
        )
        .unwrap();

        assert_eq!(out["success"], true);
        assert_eq!(out["summary"]["monthlyPayment"], "20791.31");
        assert_eq!(std::fs::read_dir(ctx.settings.outbox_dir()).unwrap().count(), 1);

        let history = ctx.load_history().unwrap();
        assert_eq!(history.records()[0].email.as_deref(), Some("client@bank.example"));
    }

    #[test]
    fn test_bad_address_sends_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::new(Settings {
            data_dir: dir.path().to_path_buf(),
            ..Settings::default()
        });

        let result = run_email(
            &ctx,
            EmailArgs {
                to: "not-an-address".into(),
                request: RequestArgs {
                    input: None,
                    loan_type: Some("consumer".into()),
                    amount: Some(500_000.0),
                    down_payment: None,
                    term: Some(3),
                },
                record: true,
            },
        );

        assert!(result.is_err());
        assert!(!ctx.settings.outbox_dir().exists());
        assert!(ctx.load_history().unwrap().is_empty());
    }
}
