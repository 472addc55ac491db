//! Settings and configuration CLI commands

use clap::Subcommand;

use super::print_json;
use crate::config::paths::BudgetPaths;
use crate::config::settings::RuleSettings;
use crate::error::BudgetResult;
use crate::models::{BudgetRule, PeriodType};

/// Settings subcommands
#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Show the current settings
    Show,

    /// Change one setting and save
    ///
    /// Keys: rule, savings-percentage, period, custom-days, period-start,
    /// auto-reset, currency
    Set {
        /// Setting name
        key: String,
        /// New value
        value: String,
    },

    /// Restore default settings
    Reset,
}

/// Handle a settings command
pub fn handle_settings_command(
    paths: &BudgetPaths,
    settings: &mut RuleSettings,
    cmd: SettingsCommands,
    json: bool,
) -> BudgetResult<()> {
    match cmd {
        SettingsCommands::Show => {
            if json {
                return print_json(settings);
            }
            print_settings(settings);
        }
        SettingsCommands::Set { key, value } => {
            settings.set(&key, &value)?;
            settings.save(paths)?;
            if json {
                return print_json(settings);
            }
            println!("Updated {} = {}", key, value);
        }
        SettingsCommands::Reset => {
            *settings = RuleSettings::default();
            settings.save(paths)?;
            println!("Settings reset to defaults.");
        }
    }
    Ok(())
}

fn print_settings(settings: &RuleSettings) {
    println!("Settings");
    println!("========");
    println!(
        "  Rule:               {} ({})",
        settings.selected_rule.title(),
        settings.selected_rule.key()
    );
    println!("  Savings percentage: {}%", settings.savings_percentage);
    match settings.custom_period_days {
        Some(days) if settings.rule_period == PeriodType::Custom => {
            println!("  Period:             {} ({} days)", settings.rule_period, days)
        }
        _ => println!("  Period:             {}", settings.rule_period),
    }
    println!(
        "  Period start:       {}",
        settings.period_start_date.format("%Y-%m-%d %H:%M:%S")
    );
    println!(
        "  Auto reset:         {}",
        if settings.auto_reset_enabled { "on" } else { "off" }
    );
    println!("  Currency:           {}", settings.currency_symbol);
}

/// Handle the `config` command
pub fn handle_config_command(paths: &BudgetPaths, settings: &RuleSettings) {
    println!("budget-rules Configuration");
    println!("==========================");
    println!("Config directory: {}", paths.base_dir().display());
    println!("Settings file:    {}", paths.settings_file().display());
    println!(
        "Initialized:      {}",
        if paths.is_initialized() { "yes" } else { "no" }
    );
    println!();
    println!(
        "Rules:   {}",
        BudgetRule::all()
            .iter()
            .map(|rule| rule.key())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!(
        "Periods: {}",
        PeriodType::all()
            .iter()
            .map(|period| period.name())
            .collect::<Vec<_>>()
            .join(", ")
    );
    if let Err(e) = settings.validate() {
        println!();
        println!("Warning: {}", e);
    }
}
