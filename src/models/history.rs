//! Closed-period snapshots
//!
//! A [`HistoricalPeriod`] is produced once, when a period is closed, and is
//! an append-only record from then on.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;
use super::period::PeriodType;

/// Snapshot of one closed period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPeriod {
    pub period_type: PeriodType,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub total_income: Money,
    /// All expenses, savings-category spending included
    pub total_expenses: Money,
    /// Expenses tagged with a savings category
    pub total_savings: Money,
    /// `(income - expenses) / income * 100`, 0 with no income
    pub budget_adherence: f64,
    /// `savings / income * 100`, 0 with no income
    pub savings_rate: f64,
    pub is_complete: bool,
    /// Evaluation of the selected rule over the closed window
    pub rule_data: serde_json::Value,
}

impl HistoricalPeriod {
    /// Income left after all expenses
    pub fn net(&self) -> Money {
        self.total_income - self.total_expenses
    }
}

impl fmt::Display for HistoricalPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} to {}: income {}, expenses {}, savings {}",
            self.period_type,
            self.start_date.format("%Y-%m-%d"),
            self.end_date.format("%Y-%m-%d"),
            self.total_income,
            self.total_expenses,
            self.total_savings
        )
    }
}
