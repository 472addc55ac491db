//! User settings for budget-rules
//!
//! Holds the selected budgeting rule and the active period configuration.
//! The stored `period_start_date` is the anchor of the current period and
//! is advanced each time a period is closed.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::paths::BudgetPaths;
use crate::error::{BudgetError, BudgetResult};
use crate::models::period::start_of_day;
use crate::models::{BudgetRule, PeriodConfig, PeriodType};

/// User settings for budget-rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSettings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Budgeting rule shown by default
    #[serde(default)]
    pub selected_rule: BudgetRule,

    /// Share of income to save first, 1-100; only used by pay-yourself-first
    #[serde(default = "default_savings_percentage")]
    pub savings_percentage: u8,

    /// Length of the budgeting period
    #[serde(default)]
    pub rule_period: PeriodType,

    /// Anchor of the current period
    #[serde(default = "default_period_start")]
    pub period_start_date: NaiveDateTime,

    /// Required when `rule_period` is custom
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_period_days: Option<u32>,

    /// Close elapsed periods automatically
    #[serde(default = "default_auto_reset")]
    pub auto_reset_enabled: bool,

    /// Default currency symbol
    #[serde(default = "default_currency")]
    pub currency_symbol: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_savings_percentage() -> u8 {
    20
}

fn default_period_start() -> NaiveDateTime {
    start_of_day(Local::now().date_naive())
}

fn default_auto_reset() -> bool {
    true
}

fn default_currency() -> String {
    "$".to_string()
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            selected_rule: BudgetRule::default(),
            savings_percentage: default_savings_percentage(),
            rule_period: PeriodType::default(),
            period_start_date: default_period_start(),
            custom_period_days: None,
            auto_reset_enabled: default_auto_reset(),
            currency_symbol: default_currency(),
        }
    }
}

impl RuleSettings {
    /// Typed period configuration; fails for a custom period without a
    /// positive day count
    pub fn period_config(&self) -> BudgetResult<PeriodConfig> {
        PeriodConfig::new(self.rule_period, self.custom_period_days)
    }

    /// Check every field the calculation core depends on
    pub fn validate(&self) -> BudgetResult<()> {
        if !(1..=100).contains(&self.savings_percentage) {
            return Err(BudgetError::invalid_config(format!(
                "savings percentage must be between 1 and 100, got {}",
                self.savings_percentage
            )));
        }
        self.period_config()?;
        Ok(())
    }

    /// Replace the period configuration, keeping the two stored fields in step
    pub fn set_period(&mut self, config: PeriodConfig) {
        self.rule_period = config.period_type();
        self.custom_period_days = config.custom_days();
    }

    /// Update a single setting from its command-line key
    pub fn set(&mut self, key: &str, value: &str) -> BudgetResult<()> {
        match key {
            "rule" | "selected-rule" | "selected_rule" => {
                self.selected_rule = value.parse()?;
            }
            "savings-percentage" | "savings_percentage" => {
                let pct: u8 = value.trim().parse().map_err(|_| {
                    BudgetError::Validation(format!("Invalid savings percentage: {}", value))
                })?;
                self.savings_percentage = pct;
            }
            "period" | "rule-period" | "rule_period" => match value.split_once(':') {
                Some((name, days)) => {
                    let period_type: PeriodType = name.parse()?;
                    let days = parse_days(days)?;
                    self.set_period(PeriodConfig::new(period_type, Some(days))?);
                }
                None => {
                    let period_type: PeriodType = value.parse()?;
                    if period_type == PeriodType::Custom && self.custom_period_days.is_none() {
                        return Err(BudgetError::invalid_config(
                            "custom period requires a number of days; use 'custom:N' \
                             or set custom-days first",
                        ));
                    }
                    self.rule_period = period_type;
                }
            },
            "custom-days" | "custom_period_days" => {
                let days = parse_days(value)?;
                PeriodConfig::custom(days)?;
                self.custom_period_days = Some(days);
            }
            "period-start" | "period_start_date" => {
                self.period_start_date = crate::services::import::parse_timestamp(value)?;
            }
            "auto-reset" | "auto_reset_enabled" => {
                self.auto_reset_enabled = parse_bool(value)?;
            }
            "currency" | "currency_symbol" => {
                self.currency_symbol = value.to_string();
            }
            other => {
                return Err(BudgetError::Validation(format!(
                    "Unknown setting: {}",
                    other
                )))
            }
        }
        self.validate()
    }

    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &BudgetPaths) -> Result<Self, BudgetError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                BudgetError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: RuleSettings = serde_json::from_str(&contents).map_err(|e| {
                BudgetError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(RuleSettings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BudgetPaths) -> Result<(), BudgetError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            BudgetError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            BudgetError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}

fn parse_days(value: &str) -> BudgetResult<u32> {
    value
        .trim()
        .parse()
        .map_err(|_| BudgetError::Validation(format!("Invalid day count: {}", value)))
}

fn parse_bool(value: &str) -> BudgetResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(BudgetError::Validation(format!("Invalid boolean: {}", value))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = RuleSettings::default();
        assert_eq!(settings.selected_rule, BudgetRule::FiftyThirtyTwenty);
        assert_eq!(settings.savings_percentage, 20);
        assert_eq!(settings.rule_period, PeriodType::Monthly);
        assert!(settings.auto_reset_enabled);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_custom_period_requires_days() {
        let mut settings = RuleSettings {
            rule_period: PeriodType::Custom,
            ..RuleSettings::default()
        };
        assert!(settings.period_config().unwrap_err().is_invalid_configuration());

        settings.custom_period_days = Some(0);
        assert!(settings.validate().unwrap_err().is_invalid_configuration());

        settings.custom_period_days = Some(14);
        assert_eq!(settings.period_config().unwrap().custom_days(), Some(14));
    }

    #[test]
    fn test_savings_percentage_range() {
        let mut settings = RuleSettings::default();
        settings.savings_percentage = 0;
        assert!(settings.validate().is_err());
        settings.savings_percentage = 101;
        assert!(settings.validate().is_err());
        settings.savings_percentage = 100;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_set_values() {
        let mut settings = RuleSettings::default();
        settings.set("rule", "pay-yourself-first").unwrap();
        settings.set("savings-percentage", "15").unwrap();
        settings.set("auto-reset", "off").unwrap();
        settings.set("period-start", "2025-02-01").unwrap();

        assert_eq!(settings.selected_rule, BudgetRule::PayYourselfFirst);
        assert_eq!(settings.savings_percentage, 15);
        assert!(!settings.auto_reset_enabled);
        assert_eq!(
            settings.period_start_date,
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap().and_hms_opt(0, 0, 0).unwrap()
        );

        assert!(settings.set("colour", "blue").is_err());
    }

    #[test]
    fn test_set_custom_period() {
        let mut settings = RuleSettings::default();
        let err = settings.set("period", "custom").unwrap_err();
        assert!(err.is_invalid_configuration());
        assert!(err.to_string().contains("custom:N"));
        assert_eq!(settings.rule_period, PeriodType::Monthly);

        settings.set("period", "custom:14").unwrap();
        assert_eq!(settings.rule_period, PeriodType::Custom);
        assert_eq!(settings.custom_period_days, Some(14));

        settings.set("period", "monthly").unwrap();
        settings.set("period", "custom").unwrap();
        assert_eq!(settings.period_config().unwrap().custom_days(), Some(14));

        assert!(settings.set("period", "custom:abc").is_err());
        assert!(settings
            .set("period", "custom:100000000")
            .unwrap_err()
            .is_invalid_configuration());

        settings.set("period", "monthly").unwrap();
        assert!(settings.set("custom-days", "100000000").is_err());
        assert!(settings.set("custom-days", "0").is_err());
        assert_eq!(settings.custom_period_days, Some(14));
    }

    #[test]
    fn test_set_period_keeps_fields_in_step() {
        let mut settings = RuleSettings::default();
        settings.set_period(PeriodConfig::custom(10).unwrap());
        assert_eq!(settings.rule_period, PeriodType::Custom);
        assert_eq!(settings.custom_period_days, Some(10));

        settings.set_period(PeriodConfig::monthly());
        assert_eq!(settings.custom_period_days, None);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = RuleSettings::default();
        settings.selected_rule = BudgetRule::SmartGoal;
        settings.set_period(PeriodConfig::custom(21).unwrap());
        settings.save(&paths).unwrap();

        let loaded = RuleSettings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: RuleSettings =
            serde_json::from_str(r#"{"selected_rule": "smart-goal"}"#).unwrap();
        assert_eq!(settings.selected_rule, BudgetRule::SmartGoal);
        assert_eq!(settings.savings_percentage, 20);
        assert_eq!(settings.currency_symbol, "$");
    }
}
