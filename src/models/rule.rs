//! Budgeting rule selection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BudgetError;

/// One of the supported budgeting strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BudgetRule {
    /// 50% needs, 30% wants, 20% savings
    #[default]
    #[serde(rename = "50-30-20")]
    FiftyThirtyTwenty,
    /// Set aside a fixed share of income before spending
    #[serde(rename = "pay-yourself-first")]
    PayYourselfFirst,
    /// Pace and forecast toward saving goals
    #[serde(rename = "smart-goal")]
    SmartGoal,
}

impl BudgetRule {
    pub fn all() -> &'static [Self] {
        &[Self::FiftyThirtyTwenty, Self::PayYourselfFirst, Self::SmartGoal]
    }

    /// Identifier used in settings files and on the command line
    pub fn key(&self) -> &'static str {
        match self {
            Self::FiftyThirtyTwenty => "50-30-20",
            Self::PayYourselfFirst => "pay-yourself-first",
            Self::SmartGoal => "smart-goal",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::FiftyThirtyTwenty => "50/30/20",
            Self::PayYourselfFirst => "Pay Yourself First",
            Self::SmartGoal => "SMART Goal",
        }
    }
}

impl fmt::Display for BudgetRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for BudgetRule {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', '/', ' '], "-");
        match normalized.as_str() {
            "50-30-20" | "503020" => Ok(Self::FiftyThirtyTwenty),
            "pay-yourself-first" | "pyf" => Ok(Self::PayYourselfFirst),
            "smart-goal" | "smart" => Ok(Self::SmartGoal),
            _ => Err(BudgetError::invalid_config(format!(
                "Unknown budget rule: {}",
                s.trim()
            ))),
        }
    }
}
