//! Log of past calculations with CSV export.

use std::fs;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::calculator::{CalculationInput, CalculationResult};
use crate::error::LoanCalcError;
use crate::types::round_money;
use crate::LoanCalcResult;

pub const CSV_HEADER: [&str; 11] = [
    "id",
    "loanType",
    "principalBasis",
    "downPayment",
    "termYears",
    "email",
    "monthlyPayment",
    "totalPayment",
    "overpayment",
    "requiredIncome",
    "createdAt",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRecord {
    pub id: u64,
    pub input: CalculationInput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub result: CalculationResult,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    records: Vec<CalculationRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record stamped now, with the next free id.
    pub fn push(
        &mut self,
        input: CalculationInput,
        email: Option<String>,
        result: CalculationResult,
    ) -> &CalculationRecord {
        let id = self.records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        self.records.push(CalculationRecord {
            id,
            input,
            email,
            result,
            created_at: Utc::now(),
        });
        &self.records[self.records.len() - 1]
    }

    pub fn records(&self) -> &[CalculationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Read a JSON history file. A missing file is an empty history.
    pub fn read_from(path: &Path) -> LoanCalcResult<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let contents = fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|e| {
            LoanCalcError::Store(format!("Failed to parse '{}': {}", path.display(), e))
        })
    }

    pub fn write_to(&self, path: &Path) -> LoanCalcResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn to_csv(&self) -> LoanCalcResult<String> {
        to_csv(&self.records)
    }
}

/// One header row, then one row per record. Money columns carry two decimals.
pub fn to_csv(records: &[CalculationRecord]) -> LoanCalcResult<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(CSV_HEADER)?;
    for r in records {
        wtr.write_record([
            r.id.to_string(),
            r.input.loan_type.clone(),
            round_money(r.input.principal_basis).to_string(),
            r.input
                .down_payment
                .map(|d| round_money(d).to_string())
                .unwrap_or_default(),
            r.input.term_years.to_string(),
            r.email.clone().unwrap_or_default(),
            round_money(r.result.monthly_payment).to_string(),
            round_money(r.result.total_payment).to_string(),
            round_money(r.result.overpayment).to_string(),
            round_money(r.result.required_income).to_string(),
            r.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        ])?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| LoanCalcError::SerializationError(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| LoanCalcError::SerializationError(e.to_string()))
}
