//! Report formatting utilities for terminal output
//!
//! Shared helpers for the period, summary and rule views.

use crate::models::Money;

/// Format a money amount with color hints for terminal display
pub fn format_money_colored(amount: Money, symbol: &str) -> String {
    let text = amount.format_with_symbol(symbol);
    if amount.is_negative() {
        format!("\x1b[31m{}\x1b[0m", text) // Red for negative
    } else if amount.is_positive() {
        format!("\x1b[32m{}\x1b[0m", text) // Green for positive
    } else {
        text
    }
}

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct.abs() < 0.1 && pct != 0.0 {
        format!("{:.2}%", pct)
    } else if pct.abs() < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return "░".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Bar for a 0-100 percentage, overflow shown as a full bar
pub fn format_progress_bar(pct: f64, width: usize) -> String {
    format_bar(pct.min(100.0), 100.0, width)
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Format a double separator line
pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Title followed by a double rule of the same width
pub fn format_title(title: &str) -> String {
    format!("{}\n{}\n", title, double_separator(title.chars().count().max(40)))
}

/// "Yes"/"No" for flags
pub fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.0), "0.0%");
        assert_eq!(format_percentage(0.05), "0.05%");
        assert_eq!(format_percentage(5.5), "5.5%");
        assert_eq!(format_percentage(57.5), "58%");
        assert_eq!(format_percentage(-12.0), "-12%");
    }

    #[test]
    fn test_format_bar() {
        let bar = format_bar(50.0, 100.0, 10);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 5);
        assert_eq!(format_bar(0.0, 100.0, 4), "░░░░");
    }

    #[test]
    fn test_progress_bar_caps_overflow() {
        assert_eq!(format_progress_bar(250.0, 5), "█████");
    }

    #[test]
    fn test_money_colored() {
        assert_eq!(format_money_colored(Money::zero(), "$"), "$0.00");
        assert!(format_money_colored(Money::from_dollars(-5), "€").contains("-€5.00"));
    }

    #[test]
    fn test_title() {
        let title = format_title("March 2025");
        assert!(title.starts_with("March 2025\n"));
        assert!(title.contains(&double_separator(40)));
    }
}
