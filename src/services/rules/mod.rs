//! Budgeting rule evaluation
//!
//! Each rule is a pure function of aggregated figures. [`RuleEngine`] wires
//! them to stored settings and picks the window the figures come from.

pub mod fifty_thirty_twenty;
pub mod pay_yourself_first;
pub mod smart_goal;

pub use fifty_thirty_twenty::{
    allocation_share, evaluate_fifty_thirty_twenty, BucketStatus, FiftyThirtyTwentyResult,
};
pub use pay_yourself_first::{evaluate_pay_yourself_first, PayYourselfFirstResult};
pub use smart_goal::{evaluate_smart_goal, whole_months_between, GoalForecast, SmartGoalResult};

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::debug;

use crate::config::settings::RuleSettings;
use crate::error::BudgetResult;
use crate::models::{BudgetRule, Money, PeriodBounds, PeriodConfig, SavingGoal, Transaction};
use crate::services::aggregation::PeriodSummary;
use crate::services::period::PeriodService;

/// Which transactions feed a rule evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuleWindow {
    /// Only the active period
    #[default]
    CurrentPeriod,
    /// The whole history, ignoring periods
    AllTime,
}

/// Result of one rule, tagged with the rule key
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "rule", content = "result", rename_all = "kebab-case")]
pub enum RuleOutcome {
    #[serde(rename = "50-30-20")]
    FiftyThirtyTwenty(FiftyThirtyTwentyResult),
    PayYourselfFirst(PayYourselfFirstResult),
    SmartGoal(Vec<SmartGoalResult>),
}

impl RuleOutcome {
    pub fn rule(&self) -> BudgetRule {
        match self {
            Self::FiftyThirtyTwenty(_) => BudgetRule::FiftyThirtyTwenty,
            Self::PayYourselfFirst(_) => BudgetRule::PayYourselfFirst,
            Self::SmartGoal(_) => BudgetRule::SmartGoal,
        }
    }
}

/// A rule outcome together with the figures it was computed from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleEvaluation {
    pub summary: PeriodSummary,
    pub outcome: RuleOutcome,
}

impl RuleEvaluation {
    pub fn bounds(&self) -> Option<&PeriodBounds> {
        self.summary.bounds.as_ref()
    }
}

/// Evaluates rules against stored settings
pub struct RuleEngine<'a> {
    settings: &'a RuleSettings,
}

impl<'a> RuleEngine<'a> {
    pub fn new(settings: &'a RuleSettings) -> Self {
        Self { settings }
    }

    /// Evaluate the rule selected in settings
    pub fn evaluate(
        &self,
        transactions: &[Transaction],
        goals: &[SavingGoal],
        window: RuleWindow,
        now: NaiveDateTime,
    ) -> BudgetResult<RuleEvaluation> {
        self.evaluate_rule(self.settings.selected_rule, transactions, goals, window, now)
    }

    /// Evaluate a specific rule
    pub fn evaluate_rule(
        &self,
        rule: BudgetRule,
        transactions: &[Transaction],
        goals: &[SavingGoal],
        window: RuleWindow,
        now: NaiveDateTime,
    ) -> BudgetResult<RuleEvaluation> {
        let summary = match window {
            RuleWindow::CurrentPeriod => {
                let bounds = PeriodService::new(self.settings).current_bounds()?;
                PeriodSummary::generate(transactions, &bounds)
            }
            RuleWindow::AllTime => PeriodSummary::all_time(transactions),
        };
        debug!(
            rule = rule.key(),
            window = ?window,
            transactions = summary.transaction_count,
            "evaluating rule"
        );

        let outcome = self.outcome_for(rule, &summary, transactions, goals, now)?;
        Ok(RuleEvaluation { summary, outcome })
    }

    /// Apply `rule` to an already computed summary
    ///
    /// Goal evaluation ignores the summary and measures income over the
    /// calendar month containing `now`.
    pub fn outcome_for(
        &self,
        rule: BudgetRule,
        summary: &PeriodSummary,
        transactions: &[Transaction],
        goals: &[SavingGoal],
        now: NaiveDateTime,
    ) -> BudgetResult<RuleOutcome> {
        let outcome = match rule {
            BudgetRule::FiftyThirtyTwenty => RuleOutcome::FiftyThirtyTwenty(
                evaluate_fifty_thirty_twenty(summary.total_income, &summary.categorized()),
            ),
            BudgetRule::PayYourselfFirst => {
                RuleOutcome::PayYourselfFirst(evaluate_pay_yourself_first(
                    summary.total_income,
                    self.settings.savings_percentage,
                    summary.non_savings_expenses,
                    summary.savings_total,
                )?)
            }
            BudgetRule::SmartGoal => {
                let income = monthly_income(transactions, now);
                RuleOutcome::SmartGoal(
                    goals
                        .iter()
                        .map(|goal| evaluate_smart_goal(goal, income, now))
                        .collect(),
                )
            }
        };
        Ok(outcome)
    }
}

/// Income recorded in the calendar month containing `now`
pub fn monthly_income(transactions: &[Transaction], now: NaiveDateTime) -> Money {
    PeriodSummary::generate(transactions, &PeriodConfig::monthly().bounds(now)).total_income
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PeriodType;
    use chrono::{Duration, NaiveDate};

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn at(m: u32, d: u32) -> NaiveDateTime {
        day(m, d).and_hms_opt(0, 0, 0).unwrap()
    }

    fn march_transactions() -> Vec<Transaction> {
        vec![
            Transaction::income(Money::from_dollars(4000), "Salary", day(3, 1)),
            Transaction::expense(Money::from_dollars(1200), "Rent", day(3, 2)),
            Transaction::expense(Money::from_dollars(300), "Dining", day(3, 10)),
            Transaction::expense(Money::from_dollars(200), "Investment", day(3, 15)),
            // Previous period, ignored by the current window
            Transaction::income(Money::from_dollars(3000), "Salary", day(2, 1)),
            Transaction::expense(Money::from_dollars(2500), "Shopping", day(2, 5)),
        ]
    }

    fn settings(rule: BudgetRule) -> RuleSettings {
        RuleSettings {
            selected_rule: rule,
            rule_period: PeriodType::Monthly,
            period_start_date: at(3, 1),
            ..RuleSettings::default()
        }
    }

    #[test]
    fn test_fifty_thirty_twenty_current_period() {
        let s = settings(BudgetRule::FiftyThirtyTwenty);
        let evaluation = RuleEngine::new(&s)
            .evaluate(&march_transactions(), &[], RuleWindow::CurrentPeriod, at(3, 20))
            .unwrap();

        assert_eq!(evaluation.bounds().unwrap().label, "March 2025");
        match evaluation.outcome {
            RuleOutcome::FiftyThirtyTwenty(result) => {
                assert_eq!(result.needs.allocation, Money::from_dollars(2000));
                assert_eq!(result.needs.percent_used, 60.0);
                assert_eq!(result.wants.percent_used, 25.0);
                assert_eq!(result.savings.percent_used, 25.0);
                assert!(!result.any_over_budget());
            }
            other => panic!("unexpected outcome {:?}", other.rule()),
        }
    }

    #[test]
    fn test_all_time_window_ignores_periods() {
        let s = settings(BudgetRule::FiftyThirtyTwenty);
        let evaluation = RuleEngine::new(&s)
            .evaluate(&march_transactions(), &[], RuleWindow::AllTime, at(3, 20))
            .unwrap();

        assert!(evaluation.bounds().is_none());
        assert_eq!(evaluation.summary.total_income, Money::from_dollars(7000));
        match evaluation.outcome {
            RuleOutcome::FiftyThirtyTwenty(result) => {
                assert_eq!(result.wants.spent, Money::from_dollars(2800));
            }
            other => panic!("unexpected outcome {:?}", other.rule()),
        }
    }

    #[test]
    fn test_pay_yourself_first_uses_settings_percentage() {
        let mut s = settings(BudgetRule::PayYourselfFirst);
        s.savings_percentage = 5;
        let evaluation = RuleEngine::new(&s)
            .evaluate(&march_transactions(), &[], RuleWindow::CurrentPeriod, at(3, 20))
            .unwrap();

        match evaluation.outcome {
            RuleOutcome::PayYourselfFirst(result) => {
                assert_eq!(result.savings_target, Money::from_dollars(200));
                assert_eq!(result.non_savings_expenses, Money::from_dollars(1500));
                assert!(result.is_on_track);
            }
            other => panic!("unexpected outcome {:?}", other.rule()),
        }
    }

    #[test]
    fn test_smart_goal_uses_calendar_month_income() {
        let s = settings(BudgetRule::SmartGoal);
        let now = at(3, 20);
        let goal = SavingGoal::new(
            "Emergency fund",
            Money::from_dollars(1200),
            Money::zero(),
            NaiveDate::from_ymd_opt(2026, 3, 20)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            now - Duration::days(10),
        );

        let evaluation = RuleEngine::new(&s)
            .evaluate(&march_transactions(), &[goal], RuleWindow::AllTime, now)
            .unwrap();
        match evaluation.outcome {
            RuleOutcome::SmartGoal(results) => {
                assert_eq!(results.len(), 1);
                assert!(results[0].is_affordable);
                assert_eq!(results[0].required_monthly_saving, Money::from_dollars(100));
            }
            other => panic!("unexpected outcome {:?}", other.rule()),
        }

        assert_eq!(monthly_income(&march_transactions(), now), Money::from_dollars(4000));
        assert_eq!(monthly_income(&march_transactions(), at(4, 2)), Money::zero());
    }

    #[test]
    fn test_outcome_serializes_with_rule_key() {
        let s = settings(BudgetRule::FiftyThirtyTwenty);
        let evaluation = RuleEngine::new(&s)
            .evaluate(&march_transactions(), &[], RuleWindow::CurrentPeriod, at(3, 20))
            .unwrap();
        let json = serde_json::to_value(&evaluation.outcome).unwrap();
        assert_eq!(json["rule"], "50-30-20");
        assert_eq!(json["result"]["needs"]["over_budget"], false);
    }

    #[test]
    fn test_invalid_period_config_fails() {
        let mut s = settings(BudgetRule::FiftyThirtyTwenty);
        s.rule_period = PeriodType::Custom;
        s.custom_period_days = None;
        let err = RuleEngine::new(&s)
            .evaluate(&march_transactions(), &[], RuleWindow::CurrentPeriod, at(3, 20))
            .unwrap_err();
        assert!(err.is_invalid_configuration());
    }
}
