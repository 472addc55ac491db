//! Period close
//!
//! Turns the active period into a [`HistoricalPeriod`] snapshot and works
//! out where the next period starts. Nothing is written here; the caller
//! stores the snapshot and advances `period_start_date` together.

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::settings::RuleSettings;
use crate::error::BudgetResult;
use crate::models::{HistoricalPeriod, PeriodBounds, SavingGoal, Transaction};
use crate::services::aggregation::PeriodSummary;
use crate::services::rules::RuleEngine;

/// Outcome of closing one period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodClose {
    pub snapshot: HistoricalPeriod,
    /// New value for the stored period start
    pub next_period_start: NaiveDateTime,
}

impl PeriodClose {
    /// Advance the stored period start past the closed period
    pub fn apply(&self, settings: &mut RuleSettings) {
        settings.period_start_date = self.next_period_start;
    }
}

/// Close the active period without goal data
///
/// # Errors
///
/// `InvalidConfiguration` for a bad period setup, before any aggregation.
pub fn close_period(
    transactions: &[Transaction],
    settings: &RuleSettings,
    now: NaiveDateTime,
) -> BudgetResult<PeriodClose> {
    close_period_with_goals(transactions, &[], settings, now)
}

/// Close the active period, evaluating goals when the SMART rule is selected
pub fn close_period_with_goals(
    transactions: &[Transaction],
    goals: &[SavingGoal],
    settings: &RuleSettings,
    now: NaiveDateTime,
) -> BudgetResult<PeriodClose> {
    settings.validate()?;
    let config = settings.period_config()?;
    let bounds = config.bounds(settings.period_start_date);

    let close = snapshot_period(transactions, goals, settings, &bounds, now)?;
    info!(
        period = %bounds.label,
        income = %close.snapshot.total_income,
        expenses = %close.snapshot.total_expenses,
        next_start = %close.next_period_start,
        "closed period"
    );
    Ok(close)
}

fn snapshot_period(
    transactions: &[Transaction],
    goals: &[SavingGoal],
    settings: &RuleSettings,
    bounds: &PeriodBounds,
    now: NaiveDateTime,
) -> BudgetResult<PeriodClose> {
    let summary = PeriodSummary::generate(transactions, bounds);
    let outcome = RuleEngine::new(settings).outcome_for(
        settings.selected_rule,
        &summary,
        transactions,
        goals,
        now,
    )?;

    let snapshot = HistoricalPeriod {
        period_type: bounds.period_type,
        start_date: bounds.start,
        end_date: bounds.end,
        total_income: summary.total_income,
        total_expenses: summary.total_expenses,
        total_savings: summary.savings_total,
        budget_adherence: summary.net().percentage_of(summary.total_income),
        savings_rate: summary.savings_total.percentage_of(summary.total_income),
        is_complete: true,
        rule_data: serde_json::to_value(&outcome)?,
    };

    Ok(PeriodClose {
        snapshot,
        next_period_start: settings.period_config()?.next_start(bounds.end),
    })
}

/// Close every period that has fully elapsed by `now`, oldest first
///
/// Does nothing when auto-reset is off. The period containing `now` is never
/// closed. Apply the last entry to bring settings up to date.
pub fn close_elapsed_periods(
    transactions: &[Transaction],
    goals: &[SavingGoal],
    settings: &RuleSettings,
    now: NaiveDateTime,
) -> BudgetResult<Vec<PeriodClose>> {
    settings.validate()?;
    if !settings.auto_reset_enabled {
        debug!("auto-reset disabled, nothing to close");
        return Ok(Vec::new());
    }

    let config = settings.period_config()?;
    let mut working = settings.clone();
    let mut closes = Vec::new();

    loop {
        let bounds = config.bounds(working.period_start_date);
        if !bounds.is_complete(now) {
            break;
        }
        let close = snapshot_period(transactions, goals, &working, &bounds, now)?;
        info!(period = %bounds.label, "closed elapsed period");
        close.apply(&mut working);
        closes.push(close);
    }

    Ok(closes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetRule, Money, PeriodType};
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        day(y, m, d).and_hms_opt(0, 0, 0).unwrap()
    }

    fn transactions() -> Vec<Transaction> {
        vec![
            Transaction::income(Money::from_dollars(4000), "Salary", day(2025, 3, 1)),
            Transaction::expense(Money::from_dollars(1200), "Rent", day(2025, 3, 2)),
            Transaction::expense(Money::from_dollars(300), "Dining", day(2025, 3, 10)),
            Transaction::expense(Money::from_dollars(200), "Investment", day(2025, 3, 15)),
            Transaction::income(Money::from_dollars(4000), "Salary", day(2025, 4, 1)),
            Transaction::expense(Money::from_dollars(1000), "Rent", day(2025, 4, 2)),
        ]
    }

    fn monthly_settings() -> RuleSettings {
        RuleSettings {
            selected_rule: BudgetRule::FiftyThirtyTwenty,
            rule_period: PeriodType::Monthly,
            period_start_date: at(2025, 3, 1),
            ..RuleSettings::default()
        }
    }

    #[test]
    fn test_close_period_snapshot() {
        let close = close_period(&transactions(), &monthly_settings(), at(2025, 4, 3)).unwrap();
        let snapshot = &close.snapshot;

        assert_eq!(snapshot.period_type, PeriodType::Monthly);
        assert_eq!(snapshot.start_date, at(2025, 3, 1));
        assert_eq!(snapshot.total_income, Money::from_dollars(4000));
        assert_eq!(snapshot.total_expenses, Money::from_dollars(1700));
        assert_eq!(snapshot.total_savings, Money::from_dollars(200));
        assert_eq!(snapshot.budget_adherence, 57.5);
        assert_eq!(snapshot.savings_rate, 5.0);
        assert!(snapshot.is_complete);
        assert_eq!(snapshot.rule_data["rule"], "50-30-20");
        assert_eq!(close.next_period_start, at(2025, 4, 1));
    }

    #[test]
    fn test_close_matches_live_evaluation() {
        let settings = monthly_settings();
        let now = at(2025, 3, 20);
        let live = RuleEngine::new(&settings)
            .evaluate(&transactions(), &[], crate::services::rules::RuleWindow::CurrentPeriod, now)
            .unwrap();
        let close = close_period(&transactions(), &settings, now).unwrap();

        assert_eq!(close.snapshot.rule_data, serde_json::to_value(&live.outcome).unwrap());
    }

    #[test]
    fn test_close_is_deterministic() {
        let settings = monthly_settings();
        let now = at(2025, 4, 3);
        let first = close_period(&transactions(), &settings, now).unwrap();
        let second = close_period(&transactions(), &settings, now).unwrap();

        assert_eq!(
            serde_json::to_string(&first.snapshot).unwrap(),
            serde_json::to_string(&second.snapshot).unwrap()
        );
        assert_eq!(first.next_period_start, second.next_period_start);
    }

    #[test]
    fn test_zero_income_close() {
        let txns = vec![Transaction::expense(Money::from_dollars(50), "Rent", day(2025, 3, 5))];
        let close = close_period(&txns, &monthly_settings(), at(2025, 4, 3)).unwrap();
        assert_eq!(close.snapshot.budget_adherence, 0.0);
        assert_eq!(close.snapshot.savings_rate, 0.0);
    }

    #[test]
    fn test_invalid_custom_config_fails_fast() {
        let mut settings = monthly_settings();
        settings.rule_period = PeriodType::Custom;
        settings.custom_period_days = Some(0);
        let err = close_period(&transactions(), &settings, at(2025, 4, 3)).unwrap_err();
        assert!(err.is_invalid_configuration());
    }

    #[test]
    fn test_custom_close_advances_to_next_day() {
        let mut settings = monthly_settings();
        settings.rule_period = PeriodType::Custom;
        settings.custom_period_days = Some(10);
        let close = close_period(&transactions(), &settings, at(2025, 3, 20)).unwrap();
        assert_eq!(close.snapshot.end_date.date(), day(2025, 3, 10));
        assert_eq!(close.next_period_start, at(2025, 3, 11));
    }

    #[test]
    fn test_apply_advances_settings() {
        let mut settings = monthly_settings();
        let close = close_period(&transactions(), &settings, at(2025, 4, 3)).unwrap();
        close.apply(&mut settings);
        assert_eq!(settings.period_start_date, at(2025, 4, 1));
    }

    #[test]
    fn test_close_elapsed_periods() {
        let settings = monthly_settings();
        let closes = close_elapsed_periods(&transactions(), &[], &settings, at(2025, 5, 15)).unwrap();

        assert_eq!(closes.len(), 2);
        assert_eq!(closes[0].snapshot.start_date, at(2025, 3, 1));
        assert_eq!(closes[1].snapshot.start_date, at(2025, 4, 1));
        assert_eq!(closes[1].snapshot.total_expenses, Money::from_dollars(1000));
        assert_eq!(closes[1].next_period_start, at(2025, 5, 1));

        // Nothing has elapsed yet
        assert!(close_elapsed_periods(&transactions(), &[], &settings, at(2025, 3, 31))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_close_elapsed_respects_auto_reset() {
        let mut settings = monthly_settings();
        settings.auto_reset_enabled = false;
        let closes = close_elapsed_periods(&transactions(), &[], &settings, at(2025, 5, 15)).unwrap();
        assert!(closes.is_empty());
    }
}
