//! Period CLI commands
//!
//! Shows the active period from settings, or any period when the type,
//! length or anchor is overridden on the command line.

use chrono::NaiveDateTime;
use clap::Args;
use serde::Serialize;

use super::print_json;
use crate::config::settings::RuleSettings;
use crate::display::{format_period_details, format_period_list};
use crate::error::BudgetResult;
use crate::models::{PeriodBounds, PeriodType};
use crate::services::import::parse_timestamp;
use crate::services::period::{get_next_period_start, get_period_bounds, PeriodService};

/// Overrides for the `period` command
#[derive(Args, Debug, Default)]
pub struct PeriodArgs {
    /// Period type (weekly, monthly, quarterly, semi-annual, annual, custom)
    #[arg(long = "type", value_name = "TYPE")]
    pub period_type: Option<String>,

    /// Length in days for custom periods
    #[arg(long)]
    pub days: Option<u32>,

    /// Any instant inside the period (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS)
    #[arg(long)]
    pub anchor: Option<String>,
}

impl PeriodArgs {
    fn is_empty(&self) -> bool {
        self.period_type.is_none() && self.days.is_none() && self.anchor.is_none()
    }
}

#[derive(Serialize)]
struct PeriodReport<'a> {
    #[serde(flatten)]
    bounds: &'a PeriodBounds,
    next_period_start: NaiveDateTime,
    progress_percentage: f64,
    days_remaining: i64,
    is_complete: bool,
}

/// Handle the `period` command
pub fn handle_period_command(
    settings: &RuleSettings,
    args: PeriodArgs,
    now: NaiveDateTime,
    json: bool,
) -> BudgetResult<()> {
    let (bounds, next_start) = if args.is_empty() {
        let service = PeriodService::new(settings);
        let bounds = service.current_bounds()?;
        let next = service.next_period_start(&bounds)?;
        (bounds, next)
    } else {
        let period_type: PeriodType = match &args.period_type {
            Some(name) => name.parse()?,
            None => settings.rule_period,
        };
        let days = args.days.or(settings.custom_period_days);
        let anchor = match &args.anchor {
            Some(value) => parse_timestamp(value)?,
            None => settings.period_start_date,
        };
        let bounds = get_period_bounds(period_type, anchor, days)?;
        let next = get_next_period_start(period_type, bounds.end, days)?;
        (bounds, next)
    };

    if json {
        return print_json(&PeriodReport {
            bounds: &bounds,
            next_period_start: next_start,
            progress_percentage: bounds.progress_percentage(now),
            days_remaining: bounds.days_remaining(now),
            is_complete: bounds.is_complete(now),
        });
    }

    print!("{}", format_period_details(&bounds, now));
    println!("  Next start:     {}", next_start.format("%Y-%m-%d %H:%M:%S"));
    if args.is_empty() && PeriodService::new(settings).is_due_for_reset(now)? {
        println!();
        println!("This period has ended. Run 'budget-rules close --apply' to start the next one.");
    }
    Ok(())
}

/// Handle the `periods` command
pub fn handle_periods_command(
    settings: &RuleSettings,
    count: usize,
    now: NaiveDateTime,
    json: bool,
) -> BudgetResult<()> {
    let periods = PeriodService::new(settings).recent_periods(now, count)?;
    if json {
        return print_json(&periods);
    }
    println!("{}", format_period_list(&periods, now));
    Ok(())
}
