//! SMART goal pacing and forecast
//!
//! Compares the average saving pace since a goal was created with the
//! monthly amount needed to hit its deadline.

use chrono::{Datelike, NaiveDateTime};
use serde::Serialize;
use std::fmt;

use crate::models::{GoalId, Money, SavingGoal};

/// Share of monthly income above which a goal is considered unaffordable
pub const AFFORDABILITY_LIMIT_PERCENT: f64 = 30.0;

/// Days per month used to extrapolate the saving pace
const DAYS_PER_MONTH: i64 = 30;

/// Where a goal stands, in message priority order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum GoalForecast {
    Achieved,
    DeadlinePassed { shortfall: Money },
    /// No saving recorded yet
    NeedToSave { monthly: Money },
    OnTrack { months_to_goal: u32 },
    Behind { additional_monthly: Money },
}

impl GoalForecast {
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for GoalForecast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Achieved => write!(f, "Goal achieved! You've reached your target."),
            Self::DeadlinePassed { shortfall } => {
                write!(f, "Deadline passed with {} still to save.", shortfall)
            }
            Self::NeedToSave { monthly } => {
                write!(f, "You need to save {}/month to reach this goal.", monthly)
            }
            Self::OnTrack { months_to_goal } => {
                let unit = if *months_to_goal == 1 { "month" } else { "months" };
                write!(f, "On track! About {} {} to reach your goal.", months_to_goal, unit)
            }
            Self::Behind { additional_monthly } => write!(
                f,
                "Behind pace: you need an additional {}/month to stay on track.",
                additional_monthly
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmartGoalResult {
    pub goal_id: GoalId,
    pub name: String,
    pub target: Money,
    pub saved: Money,
    pub amount_remaining: Money,
    /// Whole calendar months until the deadline, never negative
    pub months_remaining: u32,
    pub required_monthly_saving: Money,
    pub days_since_creation: i64,
    /// Average pace since creation, scaled to 30 days
    pub current_monthly_pace: Money,
    pub is_on_track: bool,
    /// Months at the current pace; `None` with no pace
    pub months_to_goal: Option<u32>,
    pub is_affordable: bool,
    /// `saved / target * 100`, capped at 100
    pub progress_percentage: f64,
    pub forecast: GoalForecast,
    pub forecast_message: String,
}

/// Evaluate one goal at `now` against the user's monthly income
pub fn evaluate_smart_goal(
    goal: &SavingGoal,
    monthly_income: Money,
    now: NaiveDateTime,
) -> SmartGoalResult {
    let months_remaining = whole_months_between(now, goal.deadline);
    let amount_remaining = goal.amount_remaining();
    let required_monthly_saving = amount_remaining.div_ceil(months_remaining.max(1) as i64);

    let days_since_creation = (now - goal.created_at).num_days().max(1);
    // Average since creation, not a trailing 30-day rate
    let current_monthly_pace = goal
        .saved
        .scale(DAYS_PER_MONTH, days_since_creation)
        .clamp_non_negative();

    let is_on_track = current_monthly_pace >= required_monthly_saving;
    let months_to_goal = current_monthly_pace.is_positive().then(|| {
        let pace = current_monthly_pace.cents();
        let months = (amount_remaining.cents() + pace - 1) / pace;
        months.clamp(0, u32::MAX as i64) as u32
    });

    let is_affordable = monthly_income.is_positive()
        && required_monthly_saving.percentage_of(monthly_income) <= AFFORDABILITY_LIMIT_PERCENT;

    let forecast = if goal.saved >= goal.target {
        GoalForecast::Achieved
    } else if months_remaining == 0 {
        GoalForecast::DeadlinePassed {
            shortfall: amount_remaining,
        }
    } else if current_monthly_pace.is_zero() {
        GoalForecast::NeedToSave {
            monthly: required_monthly_saving,
        }
    } else if is_on_track {
        GoalForecast::OnTrack {
            months_to_goal: months_to_goal.unwrap_or(0),
        }
    } else {
        GoalForecast::Behind {
            additional_monthly: required_monthly_saving - current_monthly_pace,
        }
    };

    SmartGoalResult {
        goal_id: goal.id,
        name: goal.name.clone(),
        target: goal.target,
        saved: goal.saved,
        amount_remaining,
        months_remaining,
        required_monthly_saving,
        days_since_creation,
        current_monthly_pace,
        is_on_track,
        months_to_goal,
        is_affordable,
        progress_percentage: goal.saved.percentage_of(goal.target).min(100.0),
        forecast_message: forecast.message(),
        forecast,
    }
}

/// Complete calendar months from `from` to `to`; 0 when `to` is not later
///
/// A month only counts once the same day-of-month and time is reached.
pub fn whole_months_between(from: NaiveDateTime, to: NaiveDateTime) -> u32 {
    if to <= from {
        return 0;
    }
    let mut months = (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32;
    if (to.day(), to.time()) < (from.day(), from.time()) {
        months -= 1;
    }
    months.max(0) as u32
}
