//! Convert command implementation
//!
//! Parses one Tucson file and writes its series as a long-format Parquet or
//! CSV table.

use super::shared::{CommandStatus, format_size, render_diagnostic};
use crate::app::services::series_export::SeriesExporter;
use crate::app::services::tucson_parser::TucsonParser;
use crate::cli::args::ConvertArgs;
use anyhow::Context;
use colored::*;
use indicatif::HumanDuration;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Convert command runner
pub fn run_convert(args: &ConvertArgs, show_progress: bool) -> anyhow::Result<CommandStatus> {
    let start_time = Instant::now();

    args.validate()?;
    debug!("Convert arguments: {:?}", args);

    let parser = TucsonParser::new(args.parse.to_parser_config()?);
    let exporter = SeriesExporter::new(args.export_config())?;
    let output = args.output_path();

    let result = match parser.parse_file(&args.input) {
        Ok(result) => result,
        Err(error) if error.is_parse_error() => {
            eprintln!("{}", render_diagnostic(&error.to_diagnostic()));
            return Ok(CommandStatus::Failed);
        }
        Err(error) => {
            return Err(error)
                .with_context(|| format!("Failed to read {}", args.input.display()));
        }
    };

    if result.has_warnings() {
        warn!(
            "{} warnings while reading {}",
            result.diagnostics.len(),
            args.input.display()
        );
    }

    let stats = exporter
        .export(&result.series, &output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!(
        "Converted {} in {}",
        args.input.display(),
        HumanDuration(start_time.elapsed())
    );

    if show_progress {
        println!(
            "{} {} {} {} ({} series, {} rows, {})",
            "Converted".green().bold(),
            args.input.display(),
            "->".bright_black(),
            output.display().to_string().bright_cyan(),
            stats.series_written,
            stats.rows_written,
            format_size(stats.bytes_written)
        );
        if result.has_warnings() {
            println!(
                "  {} (run `tucson inspect` for details)",
                format!("{} warnings", result.diagnostics.len()).yellow()
            );
        }
    }

    Ok(CommandStatus::Success)
}
