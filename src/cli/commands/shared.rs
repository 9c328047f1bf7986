//! Shared components for CLI commands
//!
//! This module contains logging setup, configuration loading and result
//! printing used across the command implementations.

use crate::app::services::cost_breakdown::CostBreakdown;
use crate::app::services::quotation_store::QuotationStore;
use crate::cli::args::CommonArgs;
use crate::config::Config;
use crate::{Error, Result};
use colored::*;
use serde::Serialize;
use tracing::{debug, info};

/// How a command finished once its result has been printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    /// The operation succeeded
    Succeeded,
    /// The operation was rejected; a failure response was printed
    Failed,
}

impl CommandStatus {
    pub fn from_success(success: bool) -> Self {
        if success {
            Self::Succeeded
        } else {
            Self::Failed
        }
    }

    pub fn exit_code(self) -> i32 {
        match self {
            Self::Succeeded => 0,
            Self::Failed => 1,
        }
    }
}

/// Set up structured logging to stderr
///
/// Called once per process by the command runner. `RUST_LOG` takes
/// precedence over the verbosity flags.
pub fn setup_logging(common: &CommonArgs) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = common.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tool_cbd={}", log_level)));

    let installed = if common.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    // Already installed when several commands run in one process
    if installed.is_ok() {
        debug!("Logging initialized at level: {}", log_level);
    }
}

/// Load configuration using layered approach (defaults -> file -> env -> args)
pub fn load_configuration(common: &CommonArgs) -> Result<Config> {
    let default_config_path = if common.config_file.is_none() {
        Config::default_config_path().ok()
    } else {
        None
    };

    let config_file = match &common.config_file {
        Some(path) => Some(path.as_path()),
        None => default_config_path
            .as_ref()
            .filter(|path| path.exists())
            .map(|path| path.as_path()),
    };

    if let Some(config_path) = config_file {
        info!("Using config file: {}", config_path.display());
    } else {
        debug!("No config file found, using defaults and environment variables");
    }

    let mut config = Config::load_layered(config_file)?;
    apply_cli_overrides(&mut config, common);
    config.validate()?;

    Ok(config)
}

/// Apply CLI argument overrides to configuration
pub fn apply_cli_overrides(config: &mut Config, common: &CommonArgs) {
    if let Some(data_dir) = &common.data_dir {
        config.storage.data_dir = data_dir.clone();
    }
    config.logging.level = common.get_log_level().to_string();
}

/// Open the quotation database, creating the data directory on first use
pub fn open_store(config: &Config) -> Result<QuotationStore> {
    config.ensure_data_directory()?;
    QuotationStore::open(&config.database_path())
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| Error::serialization("Failed to render JSON output", e))?;
    println!("{}", text);
    Ok(())
}

/// Print a success or failure line
pub fn print_status(ok: bool, message: &str) {
    if ok {
        println!("{} {}", "✓".bright_green().bold(), message);
    } else {
        println!("{} {}", "✗".bright_red().bold(), message.bright_red());
    }
}

/// Print a titled list of label/value pairs
pub fn print_pairs<'a, I>(title: &str, pairs: I)
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    println!("\n{}", title.bright_green().bold());
    for (label, value) in pairs {
        println!("  {:<36} {}", label.bright_white(), value);
    }
}

/// Print a titled list of values
pub fn print_values(title: &str, values: &[String]) {
    if values.is_empty() {
        println!("  {:<24} {}", title.bright_white(), "(none)".dimmed());
    } else {
        println!("  {:<24} {}", title.bright_white(), values.join(", "));
    }
}

/// Print section subtotals, their shares and the tool total
pub fn print_breakdown(breakdown: &CostBreakdown) {
    println!("\n{}", "Cost breakdown (RMB)".bright_green().bold());
    for section in &breakdown.sections {
        let share = section
            .percentage
            .map(|p| format!("{:>6.2} %", p))
            .unwrap_or_default();
        println!(
            "  {:<24} {:>14.2}  {}",
            section.section.label().bright_white(),
            section.sum,
            share.dimmed()
        );
    }
    println!(
        "  {:<24} {:>14.2}",
        "Tool total cost".bold(),
        breakdown.tool_total_cost
    );
}
