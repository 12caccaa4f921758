//! Validate command implementation
//!
//! Parses every file matched by the given patterns and reports one verdict
//! per file: OK, WARN with the warning count, or FAIL with the fatal error.

use super::shared::CommandStatus;
use crate::app::services::tucson_parser::TucsonParser;
use crate::cli::args::{OutputFormat, ValidateArgs};
use colored::*;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Result of checking one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileVerdict {
    Ok,
    Warn(usize),
    Fail(String),
}

impl FileVerdict {
    /// Whether this verdict should fail the run
    pub fn is_failure(&self, strict: bool) -> bool {
        match self {
            FileVerdict::Ok => false,
            FileVerdict::Warn(_) => strict,
            FileVerdict::Fail(_) => true,
        }
    }

    fn plain(&self) -> String {
        match self {
            FileVerdict::Ok => "OK".to_string(),
            FileVerdict::Warn(count) => format!("WARN({})", count),
            FileVerdict::Fail(message) => format!("FAIL({})", message),
        }
    }

    fn colored(&self) -> String {
        match self {
            FileVerdict::Ok => "OK".green().bold().to_string(),
            FileVerdict::Warn(count) => format!("WARN({})", count).yellow().bold().to_string(),
            FileVerdict::Fail(message) => {
                format!("{}({})", "FAIL".red().bold(), message)
            }
        }
    }
}

/// Parse one file and summarise the outcome
pub fn check_file(parser: &TucsonParser, path: &Path) -> FileVerdict {
    match parser.parse_file(path) {
        Ok(result) if result.has_warnings() => FileVerdict::Warn(result.diagnostics.len()),
        Ok(_) => FileVerdict::Ok,
        Err(error) => FileVerdict::Fail(error.to_string()),
    }
}

/// Validate command runner
pub fn run_validate(args: &ValidateArgs, show_progress: bool) -> anyhow::Result<CommandStatus> {
    let start_time = Instant::now();

    args.validate()?;
    debug!("Validate arguments: {:?}", args);

    let files = args.expand_patterns()?;
    if files.is_empty() {
        anyhow::bail!("No Tucson files matched {}", args.patterns.join(", "));
    }
    info!("Validating {} files", files.len());

    let parser = TucsonParser::new(args.parse.to_parser_config()?);

    let progress_bar = if show_progress && files.len() > 1 {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut verdicts: Vec<(PathBuf, FileVerdict)> = Vec::with_capacity(files.len());
    for path in files {
        if let Some(pb) = &progress_bar {
            pb.set_message(
                path.file_name()
                    .map(|name| name.to_string_lossy().to_string())
                    .unwrap_or_default(),
            );
        }

        let verdict = check_file(&parser, &path);
        debug!("{}: {:?}", path.display(), verdict);
        verdicts.push((path, verdict));

        if let Some(pb) = &progress_bar {
            pb.inc(1);
        }
    }

    if let Some(pb) = &progress_bar {
        pb.finish_and_clear();
    }

    for (path, verdict) in &verdicts {
        match args.format {
            OutputFormat::Human => println!("{:<8} {}", verdict.colored(), path.display()),
            OutputFormat::Plain => println!("{}\t{}", path.display(), verdict.plain()),
        }
    }

    let failures = verdicts
        .iter()
        .filter(|(_, verdict)| verdict.is_failure(args.strict))
        .count();

    if args.format == OutputFormat::Human {
        println!();
        let summary = format!(
            "{} files checked, {} failed in {}",
            verdicts.len(),
            failures,
            HumanDuration(start_time.elapsed())
        );
        if failures == 0 {
            println!("{}", summary.green());
        } else {
            println!("{}", summary.red());
        }
    }

    if failures == 0 {
        Ok(CommandStatus::Success)
    } else {
        Ok(CommandStatus::Failed)
    }
}
