//! Rule evaluation formatting
//!
//! Renders each rule outcome the way the period summary is rendered: a
//! titled block of figures, with a table where there is one row per item.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::report::{format_percentage, format_progress_bar, format_title, separator, yes_no};
use crate::models::{BudgetBucket, BudgetRule};
use crate::services::close::PeriodClose;
use crate::services::rules::{
    allocation_share, FiftyThirtyTwentyResult, PayYourselfFirstResult, RuleEvaluation,
    RuleOutcome, SmartGoalResult,
};

#[derive(Tabled)]
struct BucketRow {
    #[tabled(rename = "Bucket")]
    bucket: String,
    #[tabled(rename = "Allocated")]
    allocation: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Used")]
    used: String,
    #[tabled(rename = "")]
    bar: String,
    #[tabled(rename = "Status")]
    status: &'static str,
}

#[derive(Tabled)]
struct GoalRow {
    #[tabled(rename = "Goal")]
    name: String,
    #[tabled(rename = "Saved")]
    saved: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Months left")]
    months: u32,
    #[tabled(rename = "Needed/month")]
    required: String,
    #[tabled(rename = "Pace/month")]
    pace: String,
    #[tabled(rename = "Affordable")]
    affordable: &'static str,
}

/// Format a rule evaluation with the window it covered
pub fn format_evaluation(evaluation: &RuleEvaluation, symbol: &str) -> String {
    let window = match evaluation.bounds() {
        Some(bounds) => bounds.to_string(),
        None => "all time".to_string(),
    };
    let rule = evaluation.outcome.rule();

    let mut output = format_title(&format!("{} - {}", rule.title(), window));
    output.push_str(&format_outcome(&evaluation.outcome, symbol));
    output
}

/// Format just the outcome body
pub fn format_outcome(outcome: &RuleOutcome, symbol: &str) -> String {
    match outcome {
        RuleOutcome::FiftyThirtyTwenty(result) => format_fifty_thirty_twenty(result, symbol),
        RuleOutcome::PayYourselfFirst(result) => format_pay_yourself_first(result, symbol),
        RuleOutcome::SmartGoal(results) => format_goal_results(results, symbol),
    }
}

pub fn format_fifty_thirty_twenty(result: &FiftyThirtyTwentyResult, symbol: &str) -> String {
    let rows = BudgetBucket::all().iter().map(|bucket| {
        let status = result.bucket(*bucket);
        BucketRow {
            bucket: format!("{} ({}%)", bucket.name(), allocation_share(*bucket)),
            allocation: status.allocation.format_with_symbol(symbol),
            spent: status.spent.format_with_symbol(symbol),
            remaining: status.remaining.format_with_symbol(symbol),
            used: format_percentage(status.percent_used),
            bar: format_progress_bar(status.percent_used, 10),
            status: if status.over_budget { "OVER" } else { "OK" },
        }
    });

    let mut table = Table::new(rows);
    table.with(Style::modern());

    let mut output = format!(
        "Income: {}    Spent: {}\n",
        result.total_budget.format_with_symbol(symbol),
        result.total_spent.format_with_symbol(symbol)
    );
    output.push_str(&table.to_string());
    output.push('\n');
    if result.any_over_budget() {
        output.push_str("Over budget in at least one bucket.\n");
    }
    output
}

pub fn format_pay_yourself_first(result: &PayYourselfFirstResult, symbol: &str) -> String {
    let money = |m: crate::models::Money| m.format_with_symbol(symbol);

    let mut output = String::new();
    output.push_str(&format!("  Income:                {:>12}\n", money(result.income)));
    output.push_str(&format!(
        "  Savings target ({:>3}%): {:>12}\n",
        result.savings_percentage,
        money(result.savings_target)
    ));
    output.push_str(&format!("  Actual savings:        {:>12}\n", money(result.actual_savings)));
    output.push_str(&format!("  Savings gap:           {:>12}\n", money(result.savings_gap)));
    output.push_str(&format!(
        "  Savings progress:      {} {}\n",
        format_progress_bar(result.savings_progress, 20),
        format_percentage(result.savings_progress)
    ));
    output.push_str(&format!("  {}\n", separator(36)));
    output.push_str(&format!(
        "  Available for expenses:{:>12}\n",
        money(result.available_for_expenses)
    ));
    output.push_str(&format!(
        "  Spent (non-savings):   {:>12}\n",
        money(result.non_savings_expenses)
    ));
    output.push_str(&format!("  Remaining budget:      {:>12}\n", money(result.remaining_budget)));
    output.push_str(&format!(
        "  Budget used:           {} {}\n",
        format_progress_bar(result.expense_budget_used, 20),
        format_percentage(result.expense_budget_used)
    ));
    output.push('\n');
    output.push_str(&format!("  On track:              {}\n", yes_no(result.is_on_track)));
    output.push_str(&format!(
        "  Expenses over budget:  {}\n",
        yes_no(result.expenses_over_budget)
    ));
    output
}

pub fn format_goal_results(results: &[SmartGoalResult], symbol: &str) -> String {
    if results.is_empty() {
        return "No saving goals.\n".to_string();
    }

    let rows = results.iter().map(|result| GoalRow {
        name: result.name.clone(),
        saved: result.saved.format_with_symbol(symbol),
        target: result.target.format_with_symbol(symbol),
        progress: format_percentage(result.progress_percentage),
        months: result.months_remaining,
        required: result.required_monthly_saving.format_with_symbol(symbol),
        pace: result.current_monthly_pace.format_with_symbol(symbol),
        affordable: yes_no(result.is_affordable),
    });

    let mut table = Table::new(rows);
    table.with(Style::modern());

    let mut output = table.to_string();
    output.push('\n');
    for result in results {
        output.push_str(&format!("  {}: {}\n", result.name, result.forecast_message));
    }
    output
}

/// Format the result of closing a period
pub fn format_period_close(close: &PeriodClose, rule: BudgetRule, symbol: &str) -> String {
    let snapshot = &close.snapshot;
    let money = |m: crate::models::Money| m.format_with_symbol(symbol);

    let mut output = format_title(&format!(
        "Closed {} period {} to {}",
        snapshot.period_type,
        snapshot.start_date.format("%Y-%m-%d"),
        snapshot.end_date.format("%Y-%m-%d")
    ));
    output.push_str(&format!("  Income:            {:>12}\n", money(snapshot.total_income)));
    output.push_str(&format!("  Expenses:          {:>12}\n", money(snapshot.total_expenses)));
    output.push_str(&format!("  Savings:           {:>12}\n", money(snapshot.total_savings)));
    output.push_str(&format!(
        "  Budget adherence:  {:>12}\n",
        format_percentage(snapshot.budget_adherence)
    ));
    output.push_str(&format!(
        "  Savings rate:      {:>12}\n",
        format_percentage(snapshot.savings_rate)
    ));
    output.push_str(&format!("  Rule:              {:>12}\n", rule.key()));
    output.push_str(&format!(
        "  Next period start: {}\n",
        close.next_period_start.format("%Y-%m-%d %H:%M:%S")
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, SavingGoal};
    use crate::services::aggregation::CategorizedSpending;
    use crate::services::rules::{
        evaluate_fifty_thirty_twenty, evaluate_pay_yourself_first, evaluate_smart_goal,
    };
    use chrono::NaiveDate;

    #[test]
    fn test_fifty_thirty_twenty_output() {
        let spending = CategorizedSpending {
            needs: Money::from_dollars(2500),
            wants: Money::from_dollars(300),
            savings: Money::from_dollars(900),
        };
        let result = evaluate_fifty_thirty_twenty(Money::from_dollars(4000), &spending);
        let output = format_fifty_thirty_twenty(&result, "$");

        assert!(output.contains("Needs (50%)"));
        assert!(output.contains("$2000.00"));
        assert!(output.contains("OVER"));
        assert!(output.contains("Over budget in at least one bucket."));
    }

    #[test]
    fn test_pay_yourself_first_output() {
        let result = evaluate_pay_yourself_first(
            Money::from_dollars(4000),
            20,
            Money::from_dollars(2500),
            Money::from_dollars(900),
        )
        .unwrap();
        let output = format_pay_yourself_first(&result, "$");
        assert!(output.contains("Savings target ( 20%)"));
        assert!(output.contains("$700.00"));
        assert!(output.contains("On track:              Yes"));
    }

    #[test]
    fn test_goal_output() {
        let created = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let deadline = NaiveDate::from_ymd_opt(2026, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let goal = SavingGoal::new("Vacation", Money::from_dollars(1200), Money::zero(), deadline, created);
        let result = evaluate_smart_goal(&goal, Money::from_dollars(3000), created);

        let output = format_goal_results(&[result], "$");
        assert!(output.contains("Vacation"));
        assert!(output.contains("$100.00/month"));
        assert_eq!(format_goal_results(&[], "$"), "No saving goals.\n");
    }
}
