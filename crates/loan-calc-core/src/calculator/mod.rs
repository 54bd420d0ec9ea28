//! Amortization calculator: bound validation plus the annuity formula.

pub mod amortization;
pub mod schedule;
pub mod validation;

pub use amortization::{
    analyze_loan, annuity_payment, compute_loan, compute_with_config, term_months, CalculationInput,
    CalculationResult, MONTHS_PER_YEAR, REQUIRED_INCOME_MULTIPLIER,
};
pub use schedule::{amortization_schedule, schedule_for, ScheduleRow};
pub use validation::validate_input;
