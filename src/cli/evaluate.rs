//! Summary, rule and goal CLI commands

use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::Args;
use serde::Serialize;

use super::{print_json, read_transactions};
use crate::config::settings::RuleSettings;
use crate::display::{format_evaluation, format_goal_results, format_period_summary};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{BudgetRule, Money, SavingGoal};
use crate::services::aggregation::PeriodSummary;
use crate::services::import::load_goals;
use crate::services::period::PeriodService;
use crate::services::rules::{evaluate_smart_goal, monthly_income, RuleEngine, RuleWindow};

/// Arguments for the `summary` command
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Transactions file (.csv or .json)
    #[arg(short, long, env = "BUDGET_RULES_TRANSACTIONS", value_name = "FILE")]
    pub transactions: PathBuf,

    /// Summarize the whole history instead of the current period
    #[arg(long)]
    pub all_time: bool,

    /// Show top N categories only
    #[arg(long)]
    pub top: Option<usize>,
}

/// Arguments for the `evaluate` command
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Transactions file (.csv or .json)
    #[arg(short, long, env = "BUDGET_RULES_TRANSACTIONS", value_name = "FILE")]
    pub transactions: PathBuf,

    /// Rule to apply instead of the one in settings
    #[arg(short, long)]
    pub rule: Option<String>,

    /// Evaluate over the whole history, ignoring periods
    #[arg(long)]
    pub all_time: bool,

    /// Saving goals file (.json), used by the smart-goal rule
    #[arg(short, long, value_name = "FILE")]
    pub goals: Option<PathBuf>,
}

/// Arguments for the `goal` command
#[derive(Args, Debug)]
pub struct GoalArgs {
    /// Saving goals file (.json)
    #[arg(short, long, value_name = "FILE")]
    pub goals: PathBuf,

    /// Only show the goal with this name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Transactions file used to work out this month's income
    #[arg(short, long, env = "BUDGET_RULES_TRANSACTIONS", value_name = "FILE")]
    pub transactions: Option<PathBuf>,

    /// Monthly income to check affordability against (e.g., "4000")
    #[arg(short, long, conflicts_with = "transactions")]
    pub income: Option<String>,
}

/// Handle the `summary` command
pub fn handle_summary_command(
    settings: &RuleSettings,
    args: SummaryArgs,
    json: bool,
) -> BudgetResult<()> {
    let transactions = read_transactions(&args.transactions)?;
    let summary = if args.all_time {
        PeriodSummary::all_time(&transactions)
    } else {
        let bounds = PeriodService::new(settings).current_bounds()?;
        PeriodSummary::generate(&transactions, &bounds)
    };

    if json {
        return print_json(&summary);
    }
    print!(
        "{}",
        format_period_summary(&summary, &settings.currency_symbol, args.top)
    );
    Ok(())
}

/// Handle the `evaluate` command
pub fn handle_evaluate_command(
    settings: &RuleSettings,
    args: EvaluateArgs,
    now: NaiveDateTime,
    json: bool,
) -> BudgetResult<()> {
    let rule: BudgetRule = match &args.rule {
        Some(name) => name.parse()?,
        None => settings.selected_rule,
    };
    let window = if args.all_time {
        RuleWindow::AllTime
    } else {
        RuleWindow::CurrentPeriod
    };

    let transactions = read_transactions(&args.transactions)?;
    let goals = match &args.goals {
        Some(path) => load_goals(path)?,
        None => Vec::new(),
    };
    if rule == BudgetRule::SmartGoal && goals.is_empty() {
        eprintln!("No saving goals supplied; pass --goals to evaluate the smart-goal rule.");
    }

    let evaluation =
        RuleEngine::new(settings).evaluate_rule(rule, &transactions, &goals, window, now)?;

    if json {
        return print_json(&evaluation);
    }
    print!("{}", format_evaluation(&evaluation, &settings.currency_symbol));
    Ok(())
}

#[derive(Serialize)]
struct GoalReport<'a> {
    monthly_income: Money,
    goals: &'a [crate::services::rules::SmartGoalResult],
}

/// Handle the `goal` command
pub fn handle_goal_command(
    settings: &RuleSettings,
    args: GoalArgs,
    now: NaiveDateTime,
    json: bool,
) -> BudgetResult<()> {
    let mut goals = load_goals(&args.goals)?;
    if let Some(name) = &args.name {
        goals.retain(|goal| goal.name.eq_ignore_ascii_case(name));
        if goals.is_empty() {
            return Err(BudgetError::goal_not_found(name.clone()));
        }
    }

    let income = match (&args.income, &args.transactions) {
        (Some(amount), _) => Money::parse(amount)
            .map_err(|e| BudgetError::Validation(format!("Invalid income '{}': {}", amount, e)))?,
        (None, Some(path)) => monthly_income(&read_transactions(path)?, now),
        (None, None) => Money::zero(),
    };

    let results: Vec<_> = goals
        .iter()
        .map(|goal: &SavingGoal| evaluate_smart_goal(goal, income, now))
        .collect();

    if json {
        return print_json(&GoalReport {
            monthly_income: income,
            goals: &results,
        });
    }

    println!(
        "Monthly income: {}",
        income.format_with_symbol(&settings.currency_symbol)
    );
    print!("{}", format_goal_results(&results, &settings.currency_symbol));
    Ok(())
}
