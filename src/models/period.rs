//! Budget period representation
//!
//! Supports calendar-aligned periods (weekly, monthly, quarterly,
//! semi-annual, annual) and rolling custom windows of N days.
//!
//! Instants are wall-clock [`NaiveDateTime`]s with millisecond resolution.
//! Every period ends at 23:59:59.999 of its last day, so the next period
//! begins exactly one millisecond after the previous one ends.

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use crate::error::{BudgetError, BudgetResult};

/// The gap between one period's inclusive end and the next period's start
pub fn period_epsilon() -> Duration {
    Duration::milliseconds(1)
}

/// Longest custom window accepted, roughly ten years
pub const MAX_CUSTOM_PERIOD_DAYS: u32 = 3660;

/// Period type as stored in user settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PeriodType {
    Weekly,
    #[default]
    Monthly,
    Quarterly,
    SemiAnnual,
    Annual,
    Custom,
}

impl PeriodType {
    pub fn all() -> &'static [Self] {
        &[
            Self::Weekly,
            Self::Monthly,
            Self::Quarterly,
            Self::SemiAnnual,
            Self::Annual,
            Self::Custom,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::SemiAnnual => "semi-annual",
            Self::Annual => "annual",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for PeriodType {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        Self::all()
            .iter()
            .copied()
            .find(|t| t.name() == normalized || (normalized == "semiannual" && *t == Self::SemiAnnual))
            .ok_or_else(|| BudgetError::invalid_config(format!("Unknown period type: {}", s.trim())))
    }
}

/// Calendar-aligned period kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendarPeriod {
    /// Monday through Sunday
    Weekly,
    Monthly,
    /// Jan-Mar, Apr-Jun, Jul-Sep, Oct-Dec
    Quarterly,
    /// Jan-Jun, Jul-Dec
    SemiAnnual,
    Annual,
}

impl CalendarPeriod {
    /// Length in calendar months; `None` for weekly
    fn months(&self) -> Option<u32> {
        match self {
            Self::Weekly => None,
            Self::Monthly => Some(1),
            Self::Quarterly => Some(3),
            Self::SemiAnnual => Some(6),
            Self::Annual => Some(12),
        }
    }

    pub fn period_type(&self) -> PeriodType {
        match self {
            Self::Weekly => PeriodType::Weekly,
            Self::Monthly => PeriodType::Monthly,
            Self::Quarterly => PeriodType::Quarterly,
            Self::SemiAnnual => PeriodType::SemiAnnual,
            Self::Annual => PeriodType::Annual,
        }
    }

    /// First and last day of the unit containing `date`
    fn unit_dates(&self, date: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self.months() {
            None => {
                let monday = date - Duration::days(date.weekday().num_days_from_monday() as i64);
                (monday, monday + Duration::days(6))
            }
            Some(len) => {
                let first_month = (date.month0() / len) * len + 1;
                let first = NaiveDate::from_ymd_opt(date.year(), first_month, 1).unwrap_or(date);
                let last = first
                    .checked_add_months(Months::new(len))
                    .map(|next| next - Duration::days(1))
                    .unwrap_or(NaiveDate::MAX);
                (first, last)
            }
        }
    }

    fn label(&self, first: NaiveDate) -> String {
        match self {
            Self::Weekly => format!(
                "Week of {}/{}/{}",
                first.month(),
                first.day(),
                first.year()
            ),
            Self::Monthly => first.format("%B %Y").to_string(),
            Self::Quarterly => format!("Q{} {}", first.month0() / 3 + 1, first.year()),
            Self::SemiAnnual => format!("H{} {}", first.month0() / 6 + 1, first.year()),
            Self::Annual => first.year().to_string(),
        }
    }
}

/// A validated period configuration
///
/// A custom period always carries its day count, so there is no way to ask
/// for a custom window without one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeriodConfig {
    Calendar(CalendarPeriod),
    Custom { days: NonZeroU32 },
}

impl PeriodConfig {
    /// Build a configuration from the loosely-typed settings fields
    ///
    /// `custom_days` is ignored for calendar types and required (and
    /// positive) for `custom`.
    pub fn new(period_type: PeriodType, custom_days: Option<u32>) -> BudgetResult<Self> {
        let config = match period_type {
            PeriodType::Weekly => Self::Calendar(CalendarPeriod::Weekly),
            PeriodType::Monthly => Self::Calendar(CalendarPeriod::Monthly),
            PeriodType::Quarterly => Self::Calendar(CalendarPeriod::Quarterly),
            PeriodType::SemiAnnual => Self::Calendar(CalendarPeriod::SemiAnnual),
            PeriodType::Annual => Self::Calendar(CalendarPeriod::Annual),
            PeriodType::Custom => match custom_days {
                Some(days) => Self::custom(days)?,
                None => {
                    return Err(BudgetError::invalid_config(
                        "custom period requires a number of days",
                    ))
                }
            },
        };
        Ok(config)
    }

    /// A rolling window of `days` days
    pub fn custom(days: u32) -> BudgetResult<Self> {
        if days > MAX_CUSTOM_PERIOD_DAYS {
            return Err(BudgetError::invalid_config(format!(
                "custom period length must be at most {} days, got {}",
                MAX_CUSTOM_PERIOD_DAYS, days
            )));
        }
        NonZeroU32::new(days)
            .map(|days| Self::Custom { days })
            .ok_or_else(|| {
                BudgetError::invalid_config("custom period length must be a positive number of days")
            })
    }

    pub fn monthly() -> Self {
        Self::Calendar(CalendarPeriod::Monthly)
    }

    pub fn period_type(&self) -> PeriodType {
        match self {
            Self::Calendar(calendar) => calendar.period_type(),
            Self::Custom { .. } => PeriodType::Custom,
        }
    }

    /// Day count for custom periods
    pub fn custom_days(&self) -> Option<u32> {
        match self {
            Self::Calendar(_) => None,
            Self::Custom { days } => Some(days.get()),
        }
    }

    /// Bounds of the period containing `anchor`
    ///
    /// Calendar types snap to the enclosing unit. Custom windows start
    /// exactly at `anchor` and end at the close of day `days - 1` after it.
    pub fn bounds(&self, anchor: NaiveDateTime) -> PeriodBounds {
        match self {
            Self::Calendar(calendar) => {
                let (first, last) = calendar.unit_dates(anchor.date());
                PeriodBounds {
                    start: start_of_day(first),
                    end: end_of_day(last),
                    period_type: calendar.period_type(),
                    label: calendar.label(first),
                }
            }
            Self::Custom { days } => {
                let last = anchor.date() + Duration::days(days.get() as i64 - 1);
                PeriodBounds {
                    start: anchor,
                    end: end_of_day(last),
                    period_type: PeriodType::Custom,
                    label: format!(
                        "{} - {}",
                        anchor.format("%b %-d, %Y"),
                        last.format("%b %-d, %Y")
                    ),
                }
            }
        }
    }

    /// First instant of the period following one that ends at `current_end`
    pub fn next_start(&self, current_end: NaiveDateTime) -> NaiveDateTime {
        match self {
            Self::Calendar(_) => self.bounds(current_end).end + period_epsilon(),
            Self::Custom { .. } => start_of_day(current_end.date() + Duration::days(1)),
        }
    }

    /// First instant of the period preceding one that starts at `current_start`
    pub fn previous_start(&self, current_start: NaiveDateTime) -> NaiveDateTime {
        match self {
            Self::Calendar(_) => self.bounds(current_start - period_epsilon()).start,
            Self::Custom { days } => {
                start_of_day(current_start.date() - Duration::days(days.get() as i64))
            }
        }
    }
}

impl fmt::Display for PeriodConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Calendar(calendar) => write!(f, "{}", calendar.period_type()),
            Self::Custom { days } => write!(f, "custom ({} days)", days),
        }
    }
}

/// Inclusive bounds of one period
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeriodBounds {
    pub start: NaiveDateTime,
    /// Inclusive; always 23:59:59.999 of the last day
    pub end: NaiveDateTime,
    pub period_type: PeriodType,
    pub label: String,
}

impl PeriodBounds {
    /// Inclusive membership test
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        instant >= self.start && instant <= self.end
    }

    /// True once `now` is strictly after the end
    pub fn is_complete(&self, now: NaiveDateTime) -> bool {
        is_period_complete(self.end, now)
    }

    /// Elapsed share of the period at `now`, 0 to 100
    pub fn progress_percentage(&self, now: NaiveDateTime) -> f64 {
        progress_percentage(self.start, self.end, now)
    }

    /// Calendar days covered, counting both ends
    pub fn length_days(&self) -> i64 {
        (self.end.date() - self.start.date()).num_days() + 1
    }

    /// Whole days left before the period ends; 0 once complete
    pub fn days_remaining(&self, now: NaiveDateTime) -> i64 {
        if now >= self.end {
            0
        } else {
            (self.end - now.max(self.start)).num_days()
        }
    }
}

impl fmt::Display for PeriodBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} to {})",
            self.label,
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

/// True iff `now` is strictly after `period_end`
pub fn is_period_complete(period_end: NaiveDateTime, now: NaiveDateTime) -> bool {
    now > period_end
}

/// Linear elapsed-time fraction of `now` between `start` and `end`, clamped to 0..=100
///
/// A zero-length span reports 0 until it has passed and 100 afterwards.
pub fn progress_percentage(start: NaiveDateTime, end: NaiveDateTime, now: NaiveDateTime) -> f64 {
    if now <= start {
        return if now > end { 100.0 } else { 0.0 };
    }
    if now >= end {
        return 100.0;
    }

    let span = (end - start).num_milliseconds();
    if span <= 0 {
        return 0.0;
    }
    let elapsed = (now - start).num_milliseconds();
    (elapsed as f64 / span as f64 * 100.0).clamp(0.0, 100.0)
}

pub(crate) fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

pub(crate) fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_milli_opt(23, 59, 59, 999)
        .unwrap_or_else(|| start_of_day(date))
}
