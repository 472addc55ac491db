//! 50/30/20 rule
//!
//! Half of income goes to needs, 30% to wants and 20% to savings. Spending
//! in each bucket is compared against its allocation.

use serde::Serialize;

use crate::models::{BudgetBucket, Money};
use crate::services::aggregation::CategorizedSpending;

/// Share of income allocated to each bucket, in percent
pub fn allocation_share(bucket: BudgetBucket) -> u32 {
    match bucket {
        BudgetBucket::Needs => 50,
        BudgetBucket::Wants => 30,
        BudgetBucket::Savings => 20,
    }
}

/// Allocation versus spending for one bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketStatus {
    pub allocation: Money,
    pub spent: Money,
    /// `allocation - spent`, never below zero
    pub remaining: Money,
    /// `spent / allocation * 100`, 0 when nothing is allocated
    pub percent_used: f64,
    /// Always false for savings
    pub over_budget: bool,
}

impl BucketStatus {
    fn new(bucket: BudgetBucket, allocation: Money, spent: Money) -> Self {
        Self {
            allocation,
            spent,
            remaining: (allocation - spent).clamp_non_negative(),
            percent_used: spent.percentage_of(allocation),
            // Saving more than the target is not a violation
            over_budget: bucket != BudgetBucket::Savings && spent > allocation,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FiftyThirtyTwentyResult {
    pub income: Money,
    pub needs: BucketStatus,
    pub wants: BucketStatus,
    pub savings: BucketStatus,
    pub total_spent: Money,
    /// Equal to income
    pub total_budget: Money,
}

impl FiftyThirtyTwentyResult {
    pub fn bucket(&self, bucket: BudgetBucket) -> &BucketStatus {
        match bucket {
            BudgetBucket::Needs => &self.needs,
            BudgetBucket::Wants => &self.wants,
            BudgetBucket::Savings => &self.savings,
        }
    }

    /// True if needs or wants overspent
    pub fn any_over_budget(&self) -> bool {
        self.needs.over_budget || self.wants.over_budget
    }
}

/// Compare categorized spending with the 50/30/20 split of `income`
pub fn evaluate_fifty_thirty_twenty(
    income: Money,
    spending: &CategorizedSpending,
) -> FiftyThirtyTwentyResult {
    let status = |bucket: BudgetBucket| {
        BucketStatus::new(
            bucket,
            income.percent(allocation_share(bucket)),
            spending.bucket(bucket),
        )
    };

    FiftyThirtyTwentyResult {
        income,
        needs: status(BudgetBucket::Needs),
        wants: status(BudgetBucket::Wants),
        savings: status(BudgetBucket::Savings),
        total_spent: spending.total(),
        total_budget: income,
    }
}
