//! Display formatting for terminal output
//!
//! Text renderings of periods, summaries and rule results. `--json` output
//! bypasses this module and serializes the service types directly.

pub mod period;
pub mod report;
pub mod rules;
pub mod summary;

pub use period::{format_period_details, format_period_list};
pub use rules::{format_evaluation, format_goal_results, format_outcome, format_period_close};
pub use summary::format_period_summary;
