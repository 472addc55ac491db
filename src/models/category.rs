//! Spending buckets and keyword classification
//!
//! Free-text categories are sorted into needs, wants and savings by a single
//! keyword table. Both the 50/30/20 and Pay-Yourself-First evaluators read
//! this table, so they always agree on what counts as savings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Keywords that mark a category as a need
pub const NEEDS_KEYWORDS: &[&str] = &[
    "groceries",
    "rent",
    "transport",
    "utilities",
    "insurance",
    "healthcare",
    "bills",
];

/// Keywords that mark a category as a want
pub const WANTS_KEYWORDS: &[&str] = &[
    "shopping",
    "entertainment",
    "dining",
    "hobbies",
    "travel",
    "subscriptions",
];

/// Keywords that mark a category as savings
pub const SAVINGS_KEYWORDS: &[&str] = &["savings", "investment", "retirement", "emergency fund"];

/// The 50/30/20 bucket a category falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetBucket {
    Needs,
    Wants,
    Savings,
}

impl BudgetBucket {
    /// Buckets in classification order
    pub fn all() -> &'static [Self] {
        &[Self::Needs, Self::Wants, Self::Savings]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Needs => "Needs",
            Self::Wants => "Wants",
            Self::Savings => "Savings",
        }
    }

    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Needs => NEEDS_KEYWORDS,
            Self::Wants => WANTS_KEYWORDS,
            Self::Savings => SAVINGS_KEYWORDS,
        }
    }

    /// Classify a category name
    ///
    /// Case-insensitive substring match, checked needs, then wants, then
    /// savings. Anything unmatched is a want.
    pub fn classify(category: &str) -> Self {
        let lowered = category.to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|bucket| bucket.keywords().iter().any(|kw| lowered.contains(kw)))
            .unwrap_or(Self::Wants)
    }
}

impl fmt::Display for BudgetBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Shorthand for [`BudgetBucket::classify`]
pub fn classify(category: &str) -> BudgetBucket {
    BudgetBucket::classify(category)
}

/// True if the category counts as savings
pub fn is_savings_category(category: &str) -> bool {
    classify(category) == BudgetBucket::Savings
}
