//! Transaction aggregation
//!
//! Windows a transaction list into a period and reduces it to totals. Every
//! function here is a pure function of its inputs; the same reductions back
//! both the live rule views and closed-period snapshots.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{is_savings_category, BudgetBucket, Money, PeriodBounds, Transaction};

/// Transactions dated within `bounds` (inclusive), in input order
pub fn filter_by_period<'t>(
    transactions: &'t [Transaction],
    bounds: &PeriodBounds,
) -> Vec<&'t Transaction> {
    transactions
        .iter()
        .filter(|txn| bounds.contains(txn.date))
        .collect()
}

/// Sum of income amounts
pub fn aggregate_income<'t, I>(transactions: I) -> Money
where
    I: IntoIterator<Item = &'t Transaction>,
{
    transactions
        .into_iter()
        .filter(|txn| txn.is_income())
        .map(|txn| txn.amount)
        .sum()
}

/// Sum of expense amounts, savings categories included
pub fn aggregate_expenses<'t, I>(transactions: I) -> Money
where
    I: IntoIterator<Item = &'t Transaction>,
{
    transactions
        .into_iter()
        .filter(|txn| txn.is_expense())
        .map(|txn| txn.amount)
        .sum()
}

/// Expense totals keyed by exact category string
///
/// Keys are case-sensitive and not normalized. Only positive totals appear.
pub fn aggregate_expense_breakdown<'t, I>(transactions: I) -> BTreeMap<String, Money>
where
    I: IntoIterator<Item = &'t Transaction>,
{
    let mut breakdown: BTreeMap<String, Money> = BTreeMap::new();
    for txn in transactions.into_iter().filter(|txn| txn.is_expense()) {
        *breakdown.entry(txn.category.clone()).or_default() += txn.amount;
    }
    breakdown.retain(|_, total| total.is_positive());
    breakdown
}

/// Spending rolled up into the three 50/30/20 buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CategorizedSpending {
    pub needs: Money,
    pub wants: Money,
    pub savings: Money,
}

impl CategorizedSpending {
    /// Classify every category of a breakdown
    pub fn from_breakdown(breakdown: &BTreeMap<String, Money>) -> Self {
        let mut spending = Self::default();
        for (category, amount) in breakdown {
            *spending.bucket_mut(BudgetBucket::classify(category)) += *amount;
        }
        spending
    }

    pub fn bucket(&self, bucket: BudgetBucket) -> Money {
        match bucket {
            BudgetBucket::Needs => self.needs,
            BudgetBucket::Wants => self.wants,
            BudgetBucket::Savings => self.savings,
        }
    }

    fn bucket_mut(&mut self, bucket: BudgetBucket) -> &mut Money {
        match bucket {
            BudgetBucket::Needs => &mut self.needs,
            BudgetBucket::Wants => &mut self.wants,
            BudgetBucket::Savings => &mut self.savings,
        }
    }

    pub fn total(&self) -> Money {
        self.needs + self.wants + self.savings
    }

    /// Everything that is not savings
    pub fn non_savings(&self) -> Money {
        self.needs + self.wants
    }
}

/// One row of a period's spending breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub bucket: BudgetBucket,
    pub amount: Money,
    /// Share of total expenses
    pub percentage: f64,
}

/// Income, expenses and category breakdown for one window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodSummary {
    /// `None` for an all-time summary
    pub bounds: Option<PeriodBounds>,
    pub total_income: Money,
    pub total_expenses: Money,
    /// Expenses in savings categories
    pub savings_total: Money,
    /// Expenses outside savings categories
    pub non_savings_expenses: Money,
    pub transaction_count: usize,
    pub breakdown: BTreeMap<String, Money>,
}

impl PeriodSummary {
    /// Summarize the transactions inside `bounds`
    pub fn generate(transactions: &[Transaction], bounds: &PeriodBounds) -> Self {
        let in_period = filter_by_period(transactions, bounds);
        Self::from_transactions(in_period, Some(bounds.clone()))
    }

    /// Summarize an entire history without windowing
    pub fn all_time(transactions: &[Transaction]) -> Self {
        Self::from_transactions(transactions.iter().collect(), None)
    }

    fn from_transactions(transactions: Vec<&Transaction>, bounds: Option<PeriodBounds>) -> Self {
        let breakdown = aggregate_expense_breakdown(transactions.iter().copied());
        let savings_total: Money = breakdown
            .iter()
            .filter(|(category, _)| is_savings_category(category))
            .map(|(_, amount)| *amount)
            .sum();
        let total_expenses = aggregate_expenses(transactions.iter().copied());

        Self {
            bounds,
            total_income: aggregate_income(transactions.iter().copied()),
            total_expenses,
            savings_total,
            non_savings_expenses: total_expenses - savings_total,
            transaction_count: transactions.len(),
            breakdown,
        }
    }

    /// Income minus all expenses
    pub fn net(&self) -> Money {
        self.total_income - self.total_expenses
    }

    pub fn categorized(&self) -> CategorizedSpending {
        CategorizedSpending::from_breakdown(&self.breakdown)
    }

    /// Breakdown rows, largest spending first
    pub fn category_totals(&self) -> Vec<CategoryTotal> {
        let mut rows: Vec<CategoryTotal> = self
            .breakdown
            .iter()
            .map(|(category, amount)| CategoryTotal {
                category: category.clone(),
                bucket: BudgetBucket::classify(category),
                amount: *amount,
                percentage: amount.percentage_of(self.total_expenses),
            })
            .collect();
        rows.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.category.cmp(&b.category)));
        rows
    }

    /// The `limit` largest spending categories
    pub fn top_categories(&self, limit: usize) -> Vec<CategoryTotal> {
        let mut rows = self.category_totals();
        rows.truncate(limit);
        rows
    }
}
