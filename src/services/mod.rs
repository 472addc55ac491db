//! Service layer for budget-rules
//!
//! Period math driven by settings, transaction aggregation, the three
//! budgeting rules, period close and file import. Apart from import, every
//! service is a pure computation over values the caller passes in.

pub mod aggregation;
pub mod close;
pub mod import;
pub mod period;
pub mod rules;

pub use aggregation::{CategorizedSpending, CategoryTotal, PeriodSummary};
pub use close::{close_elapsed_periods, close_period, close_period_with_goals, PeriodClose};
pub use import::{load_goals, load_transactions, parse_timestamp, TransactionImport};
pub use period::{get_next_period_start, get_period_bounds, PeriodService};
pub use rules::{RuleEngine, RuleEvaluation, RuleOutcome, RuleWindow};
