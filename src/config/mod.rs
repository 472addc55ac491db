//! Configuration module for budget-rules
//!
//! This module provides configuration management including:
//! - Config directory resolution
//! - User settings persistence (selected rule, period, savings percentage)

pub mod paths;
pub mod settings;

pub use paths::BudgetPaths;
pub use settings::RuleSettings;
