//! budget-rules - period math and budgeting rule evaluation
//!
//! This library computes budget period boundaries, rolls transactions up
//! into those periods, and evaluates three budgeting rules against the
//! result: 50/30/20, Pay-Yourself-First and SMART goal forecasting. It also
//! produces the snapshot used to close a finished period.
//!
//! The calculation core works on values supplied by the caller and performs
//! no I/O; only `config` and `services::import` touch the filesystem.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Settings and path management
//! - `error`: Custom error types
//! - `models`: Transactions, goals, money and period primitives
//! - `services`: Aggregation, rules, period close and import
//! - `clock`: Injectable wall clock
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `budget-rules` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use budget_rules::models::{PeriodConfig, PeriodType};
//! use budget_rules::services::{PeriodSummary, RuleEngine, RuleWindow};
//!
//! let bounds = PeriodConfig::new(PeriodType::Monthly, None)?.bounds(now);
//! let summary = PeriodSummary::generate(&transactions, &bounds);
//! let evaluation = RuleEngine::new(&settings)
//!     .evaluate(&transactions, &goals, RuleWindow::CurrentPeriod, now)?;
//! ```

pub mod cli;
pub mod clock;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;

pub use error::{BudgetError, BudgetResult};
