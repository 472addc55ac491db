//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod close;
pub mod evaluate;
pub mod period;
pub mod settings;

pub use close::{handle_close_command, CloseArgs};
pub use evaluate::{
    handle_evaluate_command, handle_goal_command, handle_summary_command, EvaluateArgs, GoalArgs,
    SummaryArgs,
};
pub use period::{handle_period_command, handle_periods_command, PeriodArgs};
pub use settings::{handle_config_command, handle_settings_command, SettingsCommands};

use std::path::Path;

use serde::Serialize;

use crate::error::BudgetResult;
use crate::models::Transaction;
use crate::services::import::load_transactions;

/// Print a value as pretty JSON on stdout
pub(crate) fn print_json<T: Serialize>(value: &T) -> BudgetResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Load transactions, reporting skipped rows on stderr
pub(crate) fn read_transactions(path: &Path) -> BudgetResult<Vec<Transaction>> {
    let import = load_transactions(path)?;
    if import.has_errors() {
        eprintln!(
            "Skipped {} invalid row(s) in {}:",
            import.skipped.len(),
            path.display()
        );
        for (row, message) in &import.skipped {
            eprintln!("  row {}: {}", row, message);
        }
    }
    Ok(import.transactions)
}
