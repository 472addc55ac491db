//! Period summary formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use super::report::{format_bar, format_percentage, format_title, separator};
use crate::services::aggregation::PeriodSummary;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Bucket")]
    bucket: &'static str,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "%")]
    percentage: String,
    #[tabled(rename = "")]
    bar: String,
}

/// Totals plus a spending breakdown, largest categories first
///
/// `top` limits the breakdown to that many rows.
pub fn format_period_summary(summary: &PeriodSummary, symbol: &str, top: Option<usize>) -> String {
    let title = match &summary.bounds {
        Some(bounds) => format!("Summary: {}", bounds),
        None => "Summary: all time".to_string(),
    };

    let mut output = format_title(&title);
    output.push_str(&format!(
        "  Income:            {:>14}\n",
        summary.total_income.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Expenses:          {:>14}\n",
        summary.total_expenses.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "    of which savings:{:>14}\n",
        summary.savings_total.format_with_symbol(symbol)
    ));
    output.push_str(&format!("  {}\n", separator(33)));
    output.push_str(&format!(
        "  Net:               {:>14}\n",
        summary.net().format_with_symbol(symbol)
    ));
    output.push_str(&format!("  Transactions:      {:>14}\n", summary.transaction_count));

    let rows = match top {
        Some(limit) => summary.top_categories(limit),
        None => summary.category_totals(),
    };
    if rows.is_empty() {
        output.push_str("\nNo spending recorded.\n");
        return output;
    }

    let max = rows
        .iter()
        .map(|row| row.percentage)
        .fold(0.0_f64, f64::max);
    let rows = rows.iter().map(|row| CategoryRow {
        category: row.category.clone(),
        bucket: row.bucket.name(),
        amount: row.amount.format_with_symbol(symbol),
        percentage: format_percentage(row.percentage),
        bar: format_bar(row.percentage, max, 12),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Columns::new(2..4)).with(Alignment::right()));

    output.push('\n');
    output.push_str(&table.to_string());
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, PeriodConfig, Transaction};
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn test_summary_output() {
        let txns = vec![
            Transaction::income(Money::from_dollars(4000), "Salary", day(1)),
            Transaction::expense(Money::from_dollars(1200), "Rent", day(2)),
            Transaction::expense(Money::from_dollars(300), "Dining", day(3)),
        ];
        let bounds = PeriodConfig::monthly().bounds(day(1).and_hms_opt(0, 0, 0).unwrap());
        let summary = PeriodSummary::generate(&txns, &bounds);

        let output = format_period_summary(&summary, "$", None);
        assert!(output.contains("March 2025"));
        assert!(output.contains("$4000.00"));
        assert!(output.contains("$2500.00"));
        assert!(output.contains("Rent"));
        assert!(output.contains("Needs"));

        let top = format_period_summary(&summary, "$", Some(1));
        assert!(!top.contains("Dining"));
    }

    #[test]
    fn test_empty_summary() {
        let summary = PeriodSummary::all_time(&[]);
        let output = format_period_summary(&summary, "$", None);
        assert!(output.contains("all time"));
        assert!(output.contains("No spending recorded."));
    }
}
