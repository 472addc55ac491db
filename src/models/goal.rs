//! Saving goal model
//!
//! A savings target with a deadline. The core reads goals but never changes
//! them; `saved <= target` is expected from the caller, not enforced here.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::GoalId;
use super::money::Money;

/// A savings goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingGoal {
    pub id: GoalId,
    #[serde(default)]
    pub name: String,
    pub target: Money,
    #[serde(default)]
    pub saved: Money,
    pub deadline: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

impl SavingGoal {
    pub fn new(
        name: impl Into<String>,
        target: Money,
        saved: Money,
        deadline: NaiveDateTime,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            id: GoalId::new(),
            name: name.into(),
            target,
            saved,
            deadline,
            created_at,
        }
    }

    /// Amount still to save, never negative
    pub fn amount_remaining(&self) -> Money {
        (self.target - self.saved).clamp_non_negative()
    }

    pub fn is_achieved(&self) -> bool {
        self.saved >= self.target
    }

    /// Check the invariants a write path is expected to enforce
    pub fn validate(&self) -> Result<(), GoalValidationError> {
        if !self.target.is_positive() {
            return Err(GoalValidationError::NonPositiveTarget);
        }

        if self.saved.is_negative() {
            return Err(GoalValidationError::NegativeSaved);
        }

        if self.deadline < self.created_at {
            return Err(GoalValidationError::DeadlineBeforeCreation);
        }

        Ok(())
    }
}

impl fmt::Display for SavingGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} of {} by {}",
            self.name,
            self.saved,
            self.target,
            self.deadline.format("%Y-%m-%d")
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalValidationError {
    NonPositiveTarget,
    NegativeSaved,
    DeadlineBeforeCreation,
}

impl fmt::Display for GoalValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveTarget => write!(f, "Goal target must be positive"),
            Self::NegativeSaved => write!(f, "Saved amount cannot be negative"),
            Self::DeadlineBeforeCreation => {
                write!(f, "Goal deadline cannot be before its creation date")
            }
        }
    }
}

impl std::error::Error for GoalValidationError {}
