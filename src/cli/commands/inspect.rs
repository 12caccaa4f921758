//! Inspect command implementation
//!
//! Parses a single file and reports the detected dialect, one row per series
//! and every diagnostic raised along the way.

use super::shared::{CommandStatus, plain_diagnostic, render_diagnostic};
use crate::app::models::Series;
use crate::app::services::tucson_parser::{ParseResult, TucsonParser};
use crate::cli::args::{InspectArgs, OutputFormat};
use anyhow::Context;
use colored::*;
use std::path::Path;
use tracing::{debug, info};

/// Inspect command runner
pub fn run_inspect(args: &InspectArgs) -> anyhow::Result<CommandStatus> {
    args.validate()?;
    debug!("Inspect arguments: {:?}", args);

    let parser = TucsonParser::new(args.parse.to_parser_config()?);
    let result = match parser.parse_file(&args.input) {
        Ok(result) => result,
        Err(error) if error.is_parse_error() => {
            let diagnostic = error.to_diagnostic();
            match args.format {
                OutputFormat::Human => {
                    println!("{}", args.input.display().to_string().bold());
                    println!("  {}", render_diagnostic(&diagnostic));
                }
                OutputFormat::Plain => println!("{}", plain_diagnostic(&diagnostic)),
            }
            return Ok(CommandStatus::Failed);
        }
        Err(error) => {
            return Err(error)
                .with_context(|| format!("Failed to read {}", args.input.display()));
        }
    };

    info!(
        "Parsed {} series from {}",
        result.series.len(),
        args.input.display()
    );

    match args.format {
        OutputFormat::Human => print_human(&args.input, &result),
        OutputFormat::Plain => {
            for record in plain_report(&result) {
                println!("{}", record);
            }
        }
    }

    Ok(CommandStatus::Success)
}

fn print_human(path: &Path, result: &ParseResult) {
    println!("{}", path.display().to_string().bold());
    println!(
        "  {} {}  {} {}  {} {}",
        "kind:".bright_black(),
        result.dialect.file_kind.to_string().bright_cyan().bold(),
        "keycode:".bright_black(),
        result.dialect.keycode_width,
        "year field:".bright_black(),
        result.year_marker_chars
    );
    println!(
        "  {} {} total, {} data, {} header, {} blank, {} unrecognized",
        "lines:".bright_black(),
        result.stats.total_lines,
        result.stats.data_lines,
        result.stats.header_lines,
        result.stats.blank_lines,
        result.stats.unclassified_lines
    );
    println!();

    let heading = format!(
        "{:<10} {:>6} {:>6} {:>6}  {:<12} {:<10} {}",
        "SERIES", "FIRST", "LAST", "RINGS", "PRECISION", "TERMINATED", "SITE"
    );
    println!("  {}", heading.bold());
    for series in &result.series {
        let (first, last) = span(series);
        let terminated = if series.terminated {
            format!("{:<10}", "yes").green()
        } else {
            format!("{:<10}", "no").yellow()
        };
        let site = series
            .header
            .as_ref()
            .map(|header| header.site_name.as_str())
            .unwrap_or("-");
        println!(
            "  {} {:>6} {:>6} {:>6}  {:<12} {} {}",
            format!("{:<10}", series.key).bright_cyan(),
            first,
            last,
            series.len(),
            series.precision.as_str(),
            terminated,
            site
        );
    }

    let diagnostics = &result.diagnostics;
    println!();
    if diagnostics.is_empty() {
        println!("  {}", "No warnings".green());
    } else {
        println!(
            "  {} {}",
            diagnostics.len().to_string().yellow().bold(),
            "warnings:".yellow()
        );
        for diagnostic in diagnostics {
            println!("    {}", render_diagnostic(diagnostic));
        }
        if result.stats.suppressed_diagnostics > 0 {
            println!(
                "    {} further warnings not shown",
                result.stats.suppressed_diagnostics
            );
        }
    }
}

/// Tab-separated report: one dialect record, one per series, one per diagnostic
pub fn plain_report(result: &ParseResult) -> Vec<String> {
    let mut records = Vec::with_capacity(1 + result.series.len() + result.diagnostics.len());
    records.push(format!(
        "dialect\t{}\t{}\t{}",
        result.dialect.file_kind, result.dialect.keycode_width, result.year_marker_chars
    ));

    for series in &result.series {
        let (first, last) = span(series);
        records.push(format!(
            "series\t{}\t{}\t{}\t{}\t{}\t{}",
            series.key,
            first,
            last,
            series.len(),
            series.precision,
            series.terminated
        ));
    }

    records.extend(result.diagnostics.iter().map(plain_diagnostic));
    records
}

fn span(series: &Series) -> (String, String) {
    match (series.first_year, series.last_year()) {
        (Some(first), Some(last)) => (first.to_string(), last.to_string()),
        _ => ("-".to_string(), "-".to_string()),
    }
}
