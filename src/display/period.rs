//! Period display formatting

use chrono::NaiveDateTime;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::report::{format_percentage, format_progress_bar, format_title, yes_no};
use crate::models::PeriodBounds;

#[derive(Tabled)]
struct PeriodRow {
    #[tabled(rename = "Period")]
    label: String,
    #[tabled(rename = "Start")]
    start: String,
    #[tabled(rename = "End")]
    end: String,
    #[tabled(rename = "Days")]
    days: i64,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Status")]
    status: &'static str,
}

/// Format one period with progress at `now`
pub fn format_period_details(bounds: &PeriodBounds, now: NaiveDateTime) -> String {
    let progress = bounds.progress_percentage(now);

    let mut output = format_title(&format!("Period: {}", bounds.label));
    output.push_str(&format!("  Type:           {}\n", bounds.period_type));
    output.push_str(&format!("  Start:          {}\n", bounds.start.format("%Y-%m-%d %H:%M:%S")));
    output.push_str(&format!("  End:            {}\n", bounds.end.format("%Y-%m-%d %H:%M:%S%.3f")));
    output.push_str(&format!("  Length:         {} days\n", bounds.length_days()));
    output.push_str(&format!("  Days remaining: {}\n", bounds.days_remaining(now)));
    output.push_str(&format!(
        "  Progress:       {} {}\n",
        format_progress_bar(progress, 20),
        format_percentage(progress)
    ));
    output.push_str(&format!("  Complete:       {}\n", yes_no(bounds.is_complete(now))));
    output
}

/// Table of periods, oldest first
pub fn format_period_list(periods: &[PeriodBounds], now: NaiveDateTime) -> String {
    if periods.is_empty() {
        return "No periods.".to_string();
    }

    let rows = periods.iter().map(|bounds| PeriodRow {
        label: bounds.label.clone(),
        start: bounds.start.format("%Y-%m-%d").to_string(),
        end: bounds.end.format("%Y-%m-%d").to_string(),
        days: bounds.length_days(),
        progress: format_percentage(bounds.progress_percentage(now)),
        status: if bounds.is_complete(now) {
            "Complete"
        } else if bounds.contains(now) {
            "Current"
        } else {
            "Upcoming"
        },
    });

    let mut table = Table::new(rows);
    table.with(Style::modern());
    table.to_string()
}
