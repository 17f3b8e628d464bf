//! Payroll period validation and pay computation.
//!
//! A payroll record snapshots the salary package at generation time:
//! `gross = base + allowance + bonus`, `net = gross - deductions`.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::CoreError;

pub const STATUS_GENERATED: &str = "generated";
pub const STATUS_PAID: &str = "paid";

/// All valid payroll statuses.
pub const VALID_STATUSES: &[&str] = &[STATUS_GENERATED, STATUS_PAID];

/// Longest pay period accepted, in days.
pub const MAX_PERIOD_DAYS: i64 = 366;

/// Validate a payroll status filter value.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid payroll status '{status}'. Must be one of: {}",
            VALID_STATUSES.join(", ")
        )))
    }
}

/// The end date must fall strictly after the start date.
pub fn validate_period(start: NaiveDate, end: NaiveDate) -> Result<(), CoreError> {
    if end <= start {
        return Err(CoreError::Validation(format!(
            "period_end ({end}) must be after period_start ({start})"
        )));
    }
    let days = (end - start).num_days();
    if days > MAX_PERIOD_DAYS {
        return Err(CoreError::Validation(format!(
            "Pay period spans {days} days; maximum is {MAX_PERIOD_DAYS}"
        )));
    }
    Ok(())
}

/// Salary package figures that feed a payroll computation.
#[derive(Debug, Clone, Copy)]
pub struct PackageFigures {
    pub base_salary_cents: i64,
    pub allowance_cents: i64,
    pub deduction_cents: i64,
}

/// Computed payroll amounts, all in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PayrollAmounts {
    pub gross_cents: i64,
    pub deduction_cents: i64,
    pub bonus_cents: i64,
    pub net_cents: i64,
}

/// Compute gross and net pay for one period.
pub fn compute_amounts(
    package: PackageFigures,
    bonus_cents: i64,
) -> Result<PayrollAmounts, CoreError> {
    if bonus_cents < 0 {
        return Err(CoreError::Validation("bonus_cents must not be negative".into()));
    }

    let gross_cents = package
        .base_salary_cents
        .checked_add(package.allowance_cents)
        .and_then(|v| v.checked_add(bonus_cents))
        .ok_or_else(|| CoreError::Validation("Payroll amount overflow".into()))?;

    let net_cents = gross_cents - package.deduction_cents;
    if net_cents < 0 {
        return Err(CoreError::Validation(format!(
            "Deductions ({}) exceed gross pay ({gross_cents})",
            package.deduction_cents
        )));
    }

    Ok(PayrollAmounts {
        gross_cents,
        deduction_cents: package.deduction_cents,
        bonus_cents,
        net_cents,
    })
}
