//! Shared components for CLI commands
//!
//! This module contains common types, utilities, and functions used across
//! multiple CLI command implementations.

use crate::Result;
use crate::cli::args::Args;
use crate::{Diagnostic, Severity};
use colored::*;
use tracing::debug;

/// Outcome of a command, mapped to the process exit code by `main`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    /// Everything the command checked was acceptable
    Success,
    /// The command ran, but at least one input did not pass
    Failed,
}

impl CommandStatus {
    pub fn exit_code(&self) -> i32 {
        match self {
            CommandStatus::Success => 0,
            CommandStatus::Failed => 1,
        }
    }
}

/// Set up structured logging for all commands
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    // Create filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tucson_processor={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
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
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Format a byte count in human-readable form
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.2} {}", size, UNITS[unit_index])
    }
}

/// One diagnostic as a colored terminal line
pub fn render_diagnostic(diagnostic: &Diagnostic) -> String {
    let label = match diagnostic.severity {
        Severity::Warning => "warning".yellow().bold(),
        Severity::Fatal => "error".red().bold(),
    };
    let location = match diagnostic.line_number {
        Some(line) => format!("line {}", line).bright_black().to_string(),
        None => "file".bright_black().to_string(),
    };
    format!(
        "{} [{}] {}: {}",
        label,
        diagnostic.kind.as_str().cyan(),
        location,
        diagnostic.message
    )
}

/// One diagnostic as a tab-separated record
pub fn plain_diagnostic(diagnostic: &Diagnostic) -> String {
    format!(
        "diagnostic\t{}\t{}\t{}\t{}",
        diagnostic.severity,
        diagnostic.kind.as_str(),
        diagnostic
            .line_number
            .map(|line| line.to_string())
            .unwrap_or_default(),
        diagnostic.message
    )
}
