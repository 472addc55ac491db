use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use budget_rules::cli::{
    handle_close_command, handle_config_command, handle_evaluate_command, handle_goal_command,
    handle_period_command, handle_periods_command, handle_settings_command,
    handle_summary_command, CloseArgs, EvaluateArgs, GoalArgs, PeriodArgs, SettingsCommands,
    SummaryArgs,
};
use budget_rules::clock::{Clock, FixedClock, SystemClock};
use budget_rules::config::{paths::BudgetPaths, settings::RuleSettings};
use budget_rules::services::import::parse_timestamp;

#[derive(Parser)]
#[command(
    name = "budget-rules",
    author = "Kaylee Beyene",
    version,
    about = "Budget periods and budgeting rules from the command line",
    long_about = "budget-rules works out budget period boundaries, rolls your \
                  transactions up into them, and checks the result against the \
                  50/30/20, Pay-Yourself-First or SMART goal rule."
)]
struct Cli {
    /// Print machine-readable JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// Evaluate as of this instant instead of the system clock
    #[arg(long, global = true, value_name = "TIMESTAMP")]
    now: Option<String>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current budget period
    Period(PeriodArgs),

    /// List recent budget periods
    Periods {
        /// Number of periods to show
        #[arg(short, long, default_value = "6")]
        count: usize,
    },

    /// Summarize income and spending for the current period
    Summary(SummaryArgs),

    /// Evaluate a budgeting rule
    #[command(alias = "eval")]
    Evaluate(EvaluateArgs),

    /// Forecast saving goals
    #[command(alias = "goals")]
    Goal(GoalArgs),

    /// Close the current period and show its snapshot
    Close(CloseArgs),

    /// View or change settings
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// Show current configuration and paths
    Config,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env("BUDGET_RULES_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    // stdout carries command output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let clock: Box<dyn Clock> = match &cli.now {
        Some(value) => Box::new(FixedClock(parse_timestamp(value)?)),
        None => Box::new(SystemClock),
    };
    let now = clock.now();

    // Initialize paths and settings
    let paths = BudgetPaths::new()?;
    let mut settings = RuleSettings::load_or_create(&paths)?;
    let json = cli.json;

    match cli.command {
        Some(Commands::Period(args)) => handle_period_command(&settings, args, now, json)?,
        Some(Commands::Periods { count }) => handle_periods_command(&settings, count, now, json)?,
        Some(Commands::Summary(args)) => handle_summary_command(&settings, args, json)?,
        Some(Commands::Evaluate(args)) => handle_evaluate_command(&settings, args, now, json)?,
        Some(Commands::Goal(args)) => handle_goal_command(&settings, args, now, json)?,
        Some(Commands::Close(args)) => {
            handle_close_command(&paths, &mut settings, args, now, json)?
        }
        Some(Commands::Settings(cmd)) => {
            handle_settings_command(&paths, &mut settings, cmd, json)?
        }
        Some(Commands::Config) => handle_config_command(&paths, &settings),
        None => {
            println!("budget-rules - budget periods and budgeting rules");
            println!();
            println!("Run 'budget-rules --help' for usage information.");
        }
    }

    Ok(())
}
