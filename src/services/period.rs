//! Budget period service
//!
//! Derives period bounds from stored settings and exposes the loosely-typed
//! entry points that take a raw period type plus an optional day count.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::config::settings::RuleSettings;
use crate::error::BudgetResult;
use crate::models::{PeriodBounds, PeriodConfig, PeriodType};

pub use crate::models::period::{is_period_complete, progress_percentage, MAX_CUSTOM_PERIOD_DAYS};

/// Bounds of the `period_type` period containing `anchor`
///
/// # Errors
///
/// `InvalidConfiguration` when `period_type` is custom and `custom_days` is
/// missing, zero or longer than [`MAX_CUSTOM_PERIOD_DAYS`].
pub fn get_period_bounds(
    period_type: PeriodType,
    anchor: NaiveDateTime,
    custom_days: Option<u32>,
) -> BudgetResult<PeriodBounds> {
    let config = PeriodConfig::new(period_type, custom_days)?;
    Ok(config.bounds(anchor))
}

/// First instant of the period after one ending at `current_end`
pub fn get_next_period_start(
    period_type: PeriodType,
    current_end: NaiveDateTime,
    custom_days: Option<u32>,
) -> BudgetResult<NaiveDateTime> {
    let config = PeriodConfig::new(period_type, custom_days)?;
    Ok(config.next_start(current_end))
}

/// Service for budget period management
pub struct PeriodService<'a> {
    settings: &'a RuleSettings,
}

impl<'a> PeriodService<'a> {
    /// Create a new period service
    pub fn new(settings: &'a RuleSettings) -> Self {
        Self { settings }
    }

    /// The validated period configuration from settings
    pub fn config(&self) -> BudgetResult<PeriodConfig> {
        self.settings.period_config()
    }

    /// The active period, anchored at the stored period start
    pub fn current_bounds(&self) -> BudgetResult<PeriodBounds> {
        let bounds = self.config()?.bounds(self.settings.period_start_date);
        debug!(label = %bounds.label, start = %bounds.start, end = %bounds.end, "current period");
        Ok(bounds)
    }

    /// The period containing `instant` under the configured period type
    ///
    /// Custom windows are laid out from the stored period start so that they
    /// line up with the periods that closing would produce.
    pub fn bounds_containing(&self, instant: NaiveDateTime) -> BudgetResult<PeriodBounds> {
        let config = self.config()?;
        match config {
            PeriodConfig::Calendar(_) => Ok(config.bounds(instant)),
            PeriodConfig::Custom { .. } => {
                let mut bounds = config.bounds(self.settings.period_start_date);
                while instant > bounds.end {
                    bounds = config.bounds(config.next_start(bounds.end));
                }
                while instant < bounds.start {
                    bounds = config.bounds(config.previous_start(bounds.start));
                }
                Ok(bounds)
            }
        }
    }

    /// Start of the period after `bounds`
    pub fn next_period_start(&self, bounds: &PeriodBounds) -> BudgetResult<NaiveDateTime> {
        Ok(self.config()?.next_start(bounds.end))
    }

    /// The last `count` periods ending with the one containing `now`, oldest first
    pub fn recent_periods(&self, now: NaiveDateTime, count: usize) -> BudgetResult<Vec<PeriodBounds>> {
        let config = self.config()?;
        let mut periods = Vec::with_capacity(count);
        if count == 0 {
            return Ok(periods);
        }

        let mut current = self.bounds_containing(now)?;
        periods.push(current.clone());
        while periods.len() < count {
            current = config.bounds(config.previous_start(current.start));
            periods.push(current.clone());
        }

        periods.reverse();
        Ok(periods)
    }

    /// True when auto-reset is on and the active period has elapsed
    pub fn is_due_for_reset(&self, now: NaiveDateTime) -> BudgetResult<bool> {
        if !self.settings.auto_reset_enabled {
            return Ok(false);
        }
        Ok(self.current_bounds()?.is_complete(now))
    }
}
