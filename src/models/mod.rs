//! Core data models for budget-rules
//!
//! This module contains the values the calculation core consumes
//! (transactions, saving goals) and produces (period bounds, closed-period
//! snapshots), plus the money and period primitives they are built on.

pub mod category;
pub mod goal;
pub mod history;
pub mod ids;
pub mod money;
pub mod period;
pub mod rule;
pub mod transaction;

pub use category::{classify, is_savings_category, BudgetBucket};
pub use goal::{GoalValidationError, SavingGoal};
pub use history::HistoricalPeriod;
pub use ids::{GoalId, TransactionId};
pub use money::Money;
pub use period::{CalendarPeriod, PeriodBounds, PeriodConfig, PeriodType};
pub use rule::BudgetRule;
pub use transaction::{Transaction, TransactionKind};
