//! Pay-Yourself-First rule
//!
//! A fixed share of income is reserved for savings up front; the rest is the
//! expense budget. Actual savings are what the user recorded under savings
//! categories, not whatever happens to be left over.

use serde::Serialize;

use crate::error::{BudgetError, BudgetResult};
use crate::models::Money;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayYourselfFirstResult {
    pub income: Money,
    pub savings_percentage: u8,
    pub savings_target: Money,
    pub available_for_expenses: Money,
    /// Spending recorded under savings categories
    pub actual_savings: Money,
    pub non_savings_expenses: Money,
    /// `available_for_expenses - non_savings_expenses`; negative when overspent
    pub remaining_budget: Money,
    pub is_on_track: bool,
    /// Shortfall against the savings target, never negative
    pub savings_gap: Money,
    pub expenses_over_budget: bool,
    /// `actual_savings / income * 100`
    pub savings_rate: f64,
    /// `actual_savings / savings_target * 100`
    pub savings_progress: f64,
    /// `non_savings_expenses / available_for_expenses * 100`
    pub expense_budget_used: f64,
}

/// Evaluate Pay-Yourself-First for one window
///
/// # Errors
///
/// `InvalidConfiguration` when `savings_percentage` is outside 1..=100.
pub fn evaluate_pay_yourself_first(
    income: Money,
    savings_percentage: u8,
    non_savings_expenses: Money,
    savings_total: Money,
) -> BudgetResult<PayYourselfFirstResult> {
    if !(1..=100).contains(&savings_percentage) {
        return Err(BudgetError::invalid_config(format!(
            "savings percentage must be between 1 and 100, got {}",
            savings_percentage
        )));
    }

    let savings_target = income.percent(savings_percentage as u32);
    let available_for_expenses = income - savings_target;

    Ok(PayYourselfFirstResult {
        income,
        savings_percentage,
        savings_target,
        available_for_expenses,
        actual_savings: savings_total,
        non_savings_expenses,
        remaining_budget: available_for_expenses - non_savings_expenses,
        is_on_track: savings_total >= savings_target,
        savings_gap: (savings_target - savings_total).clamp_non_negative(),
        expenses_over_budget: non_savings_expenses > available_for_expenses,
        savings_rate: savings_total.percentage_of(income),
        savings_progress: savings_total.percentage_of(savings_target),
        expense_budget_used: non_savings_expenses.percentage_of(available_for_expenses),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_on_track() {
        let result = evaluate_pay_yourself_first(
            Money::from_dollars(4000),
            20,
            Money::from_dollars(2500),
            Money::from_dollars(900),
        )
        .unwrap();

        assert_eq!(result.savings_target, Money::from_dollars(800));
        assert_eq!(result.available_for_expenses, Money::from_dollars(3200));
        assert_eq!(result.remaining_budget, Money::from_dollars(700));
        assert!(result.is_on_track);
        assert_eq!(result.savings_gap, Money::zero());
        assert!(!result.expenses_over_budget);
        assert_eq!(result.savings_rate, 22.5);
    }

    #[test]
    fn test_behind_and_overspent() {
        let result = evaluate_pay_yourself_first(
            Money::from_dollars(3000),
            10,
            Money::from_dollars(2900),
            Money::from_dollars(100),
        )
        .unwrap();

        assert_eq!(result.savings_target, Money::from_dollars(300));
        assert_eq!(result.available_for_expenses, Money::from_dollars(2700));
        assert_eq!(result.remaining_budget, Money::from_dollars(-200));
        assert!(!result.is_on_track);
        assert_eq!(result.savings_gap, Money::from_dollars(200));
        assert!(result.expenses_over_budget);
    }

    #[test]
    fn test_leftover_income_is_not_savings() {
        // Nothing tagged as savings, even though most income went unspent
        let result = evaluate_pay_yourself_first(
            Money::from_dollars(5000),
            20,
            Money::from_dollars(1000),
            Money::zero(),
        )
        .unwrap();
        assert!(!result.is_on_track);
        assert_eq!(result.savings_gap, Money::from_dollars(1000));
    }

    #[test]
    fn test_zero_income_is_safe() {
        let result =
            evaluate_pay_yourself_first(Money::zero(), 20, Money::from_dollars(50), Money::zero())
                .unwrap();

        assert_eq!(result.savings_rate, 0.0);
        assert_eq!(result.savings_progress, 0.0);
        assert_eq!(result.expense_budget_used, 0.0);
        assert!(result.is_on_track);
        assert!(result.expenses_over_budget);
        assert_eq!(result.remaining_budget, Money::from_dollars(-50));
    }

    #[test]
    fn test_full_savings_percentage() {
        let result = evaluate_pay_yourself_first(
            Money::from_dollars(1000),
            100,
            Money::zero(),
            Money::from_dollars(1000),
        )
        .unwrap();
        assert_eq!(result.available_for_expenses, Money::zero());
        assert_eq!(result.expense_budget_used, 0.0);
        assert!(result.is_on_track);
    }

    #[test]
    fn test_rejects_out_of_range_percentage() {
        for pct in [0u8, 101] {
            let err = evaluate_pay_yourself_first(Money::from_dollars(100), pct, Money::zero(), Money::zero())
                .unwrap_err();
            assert!(err.is_invalid_configuration());
        }
    }
}
