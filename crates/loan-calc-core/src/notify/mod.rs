//! Emailing a calculation summary.
//!
//! This module only formats: a [`ResultSummary`] is rendered into an
//! [`EmailMessage`] and handed to whatever [`MailTransport`] the caller
//! supplies. Amounts are rounded to minor units here and nowhere earlier.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::calculator::CalculationResult;
use crate::catalog::LoanConfig;
use crate::error::LoanCalcError;
use crate::types::{group_thousands, round_money};
use crate::LoanCalcResult;

pub const DEFAULT_SUBJECT: &str = "Your loan calculation results";
pub const SENDER_NAME: &str = "Bank Calculator";

/// Products whose summary leaves out the required-income line.
const NO_INCOME_CHECK: [&str; 1] = ["business"];

fn is_plausible_email(address: &str) -> bool {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(address))
}

/// A syntactically plausible email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Recipient(String);

impl Recipient {
    pub fn parse(address: &str) -> LoanCalcResult<Self> {
        let trimmed = address.trim();
        if !is_plausible_email(trimmed) {
            return Err(LoanCalcError::InvalidInput {
                field: "recipient_email".into(),
                reason: format!("'{address}' is not a valid email address"),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Recipient {
    type Error = LoanCalcError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Recipient> for String {
    fn from(r: Recipient) -> Self {
        r.0
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Presentation copy of a result, rounded for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSummary {
    pub loan_type: String,
    pub title: String,
    pub interest_rate: Decimal,
    pub loan_amount: Decimal,
    pub monthly_payment: Decimal,
    pub total_payment: Decimal,
    pub overpayment: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_income: Option<Decimal>,
}

impl ResultSummary {
    pub fn new(config: &LoanConfig, result: &CalculationResult) -> Self {
        let required_income = if NO_INCOME_CHECK.contains(&config.loan_type.as_str()) {
            None
        } else {
            Some(round_money(result.required_income))
        };
        Self {
            loan_type: config.loan_type.clone(),
            title: config.title.clone(),
            interest_rate: Decimal::from_f64_retain(config.interest_rate)
                .unwrap_or_default()
                .round_dp(4)
                .normalize(),
            loan_amount: round_money(result.loan_amount),
            monthly_payment: round_money(result.monthly_payment),
            total_payment: round_money(result.total_payment),
            overpayment: round_money(result.overpayment),
            required_income,
        }
    }

    /// Label/value pairs in display order.
    pub fn lines(&self) -> Vec<(&'static str, String)> {
        let mut lines = vec![
            ("Loan type", self.title.clone()),
            ("Interest rate", format!("{}%", self.interest_rate)),
            ("Loan amount", group_thousands(self.loan_amount)),
            ("Monthly payment", group_thousands(self.monthly_payment)),
            ("Total payment", group_thousands(self.total_payment)),
            ("Overpayment", group_thousands(self.overpayment)),
        ];
        if let Some(income) = self.required_income {
            lines.push(("Required income", group_thousands(income)));
        }
        lines
    }
}

/// A rendered message ready for a transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub from: String,
    pub to: Recipient,
    pub subject: String,
    pub html: String,
    pub text: String,
}

impl EmailMessage {
    /// Render `summary` as an HTML table with a JSON plain-text alternative.
    pub fn compose(sender: &str, to: Recipient, summary: &ResultSummary) -> LoanCalcResult<Self> {
        Ok(Self {
            from: format!("{SENDER_NAME} <{sender}>"),
            to,
            subject: DEFAULT_SUBJECT.to_string(),
            html: render_html(summary),
            text: serde_json::to_string_pretty(summary)?,
        })
    }
}

fn render_html(summary: &ResultSummary) -> String {
    let rows: String = summary
        .lines()
        .into_iter()
        .map(|(label, value)| {
            format!(
                "<tr><td style=\"padding: 10px; border-bottom: 1px solid #eee; font-weight: bold;\">{}</td>\
                 <td style=\"padding: 10px; border-bottom: 1px solid #eee;\">{}</td></tr>",
                escape_html(label),
                escape_html(&value)
            )
        })
        .collect();
    format!(
        "<div style=\"font-family: Arial, sans-serif; padding: 20px; max-width: 600px; margin: 0 auto; border: 1px solid #ddd;\">\
         <h2 style=\"color: #2c3e50;\">Loan calculation results</h2>\
         <table style=\"width: 100%; border-collapse: collapse; margin-top: 20px;\">{rows}</table></div>"
    )
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Outbound mail delivery.
pub trait MailTransport {
    fn send(&self, message: &EmailMessage) -> LoanCalcResult<()>;
}

/// Deliver `message`, logging the outcome.
pub fn send_summary(transport: &dyn MailTransport, message: &EmailMessage) -> LoanCalcResult<()> {
    match transport.send(message) {
        Ok(()) => {
            info!(to = %message.to, "calculation summary sent");
            Ok(())
        }
        Err(e) => {
            error!(to = %message.to, error = %e, "failed to send calculation summary");
            Err(match e {
                LoanCalcError::Transport(_) => e,
                other => LoanCalcError::Transport(other.to_string()),
            })
        }
    }
}
