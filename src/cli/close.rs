//! Period close CLI command
//!
//! Prints the snapshot of the active period. With `--apply` the stored
//! period start is advanced and settings are saved; the snapshot itself is
//! printed for the caller to keep.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::Args;

use super::{print_json, read_transactions};
use crate::config::paths::BudgetPaths;
use crate::config::settings::RuleSettings;
use crate::display::format_period_close;
use crate::error::BudgetResult;
use crate::services::close::{close_elapsed_periods, close_period_with_goals, PeriodClose};
use crate::services::import::load_goals;

/// Arguments for the `close` command
#[derive(Args, Debug)]
pub struct CloseArgs {
    /// Transactions file (.csv or .json)
    #[arg(short, long, env = "BUDGET_RULES_TRANSACTIONS", value_name = "FILE")]
    pub transactions: PathBuf,

    /// Saving goals file (.json), used by the smart-goal rule
    #[arg(short, long, value_name = "FILE")]
    pub goals: Option<PathBuf>,

    /// Close every elapsed period instead of just the active one
    #[arg(long)]
    pub elapsed: bool,

    /// Save the advanced period start to settings
    #[arg(long)]
    pub apply: bool,
}

/// Handle the `close` command
pub fn handle_close_command(
    paths: &BudgetPaths,
    settings: &mut RuleSettings,
    args: CloseArgs,
    now: NaiveDateTime,
    json: bool,
) -> BudgetResult<()> {
    let transactions = read_transactions(&args.transactions)?;
    let goals = match &args.goals {
        Some(path) => load_goals(path)?,
        None => Vec::new(),
    };

    let closes: Vec<PeriodClose> = if args.elapsed {
        close_elapsed_periods(&transactions, &goals, settings, now)?
    } else {
        vec![close_period_with_goals(&transactions, &goals, settings, now)?]
    };

    if json {
        print_json(&closes)?;
    } else if closes.is_empty() {
        println!("No elapsed periods to close.");
    } else {
        for close in &closes {
            print!(
                "{}",
                format_period_close(close, settings.selected_rule, &settings.currency_symbol)
            );
        }
    }

    if args.apply {
        if let Some(last) = closes.last() {
            last.apply(settings);
            settings.save(paths)?;
            if !json {
                println!(
                    "Period start advanced to {}",
                    settings.period_start_date.format("%Y-%m-%d %H:%M:%S")
                );
            }
        }
    }
    Ok(())
}
