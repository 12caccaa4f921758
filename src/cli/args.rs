//! Command line argument parsing for the Tucson processor
//!
//! This module defines the CLI interface using clap derive macros,
//! providing type-safe argument parsing with validation and help text.

use crate::app::models::{DatingConvention, KeycodeWidth};
use crate::config::{CompressionAlgorithm, ExportConfig, ExportFormat, ParserConfig};
use crate::constants::{DEFAULT_COMPRESSION, TUCSON_EXTENSIONS};
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

/// Tucson Processor - Dendrochronology ring-width file reader
#[derive(Parser, Debug, Clone)]
#[command(
    name = "tucson",
    version,
    about = "Read Tucson RWL/CRN ring-width files and convert them to Parquet or CSV",
    long_about = "Tucson Processor reads dendrochronology measurement (.rwl) and chronology (.crn) \
                  files in the Tucson fixed-column format. The file kind and keycode width are \
                  inferred from the whole file, series are reassembled from their decade blocks, \
                  and recoverable problems are reported as line-numbered warnings."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose logging (can be used multiple times)
    #[arg(
        short,
        long,
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Quiet mode - suppress all output except errors
    #[arg(
        short,
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Suppress log output except errors"
    )]
    pub quiet: bool,
}

/// Available commands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Show the detected dialect, series and warnings for one file
    Inspect(InspectArgs),

    /// Parse a file and write its series as Parquet or CSV
    Convert(ConvertArgs),

    /// Parse many files and report which ones read cleanly
    Validate(ValidateArgs),
}

/// Options shared by every command that parses files
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ParseOptions {
    /// Year numbering used in decade markers
    #[arg(
        long,
        value_enum,
        default_value = "astronomical",
        help = "Dating convention for year markers",
        long_help = "How year markers at or below zero are read. 'astronomical' treats 0 as 1 BC \
                     (the Tucson convention); 'bc-ad' takes negative markers literally."
    )]
    pub dating: DatingArg,

    /// Force the keycode width instead of inferring it
    #[arg(
        long,
        value_name = "CHARS",
        help = "Keycode width in characters (6 or 8), skipping width inference"
    )]
    pub keycode_width: Option<usize>,
}

impl ParseOptions {
    /// Check the options and build the parser configuration
    pub fn to_parser_config(&self) -> Result<ParserConfig> {
        let mut config = ParserConfig::new().with_dating(self.dating.into());

        if let Some(chars) = self.keycode_width {
            let width = KeycodeWidth::from_chars(chars).ok_or_else(|| {
                Error::configuration(format!(
                    "Keycode width must be 6 or 8 characters, got {}",
                    chars
                ))
            })?;
            config = config.with_keycode_width(width);
        }

        Ok(config)
    }
}

/// Arguments for the inspect command
#[derive(clap::Args, Debug, Clone)]
pub struct InspectArgs {
    /// Tucson file to read
    #[arg(value_name = "FILE", help = "Path to an .rwl or .crn file")]
    pub input: PathBuf,

    #[command(flatten)]
    pub parse: ParseOptions,

    /// Output format for the report
    #[arg(
        short,
        long,
        value_enum,
        default_value = "human",
        help = "Report format: human (colored) or plain (tab-separated)"
    )]
    pub format: OutputFormat,
}

impl InspectArgs {
    pub fn validate(&self) -> Result<()> {
        validate_input_file(&self.input)?;
        self.parse.to_parser_config()?;
        Ok(())
    }
}

/// Arguments for the convert command
#[derive(clap::Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Tucson file to read
    #[arg(value_name = "FILE", help = "Path to an .rwl or .crn file")]
    pub input: PathBuf,

    /// Output file path
    #[arg(
        short,
        long,
        value_name = "OUT",
        help = "Output file path",
        long_help = "Where to write the table. When omitted, the input path is reused with the \
                     extension of the chosen format."
    )]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub parse: ParseOptions,

    /// Output table format
    #[arg(
        short,
        long,
        value_name = "FORMAT",
        default_value = "parquet",
        help = "Output format: parquet or csv"
    )]
    pub format: ExportFormat,

    /// Compression algorithm for Parquet output
    #[arg(
        short,
        long,
        value_name = "ALGORITHM",
        default_value = DEFAULT_COMPRESSION,
        help = "Parquet compression: snappy, zstd, lz4 or none"
    )]
    pub compression: CompressionAlgorithm,

    /// Add header metadata columns
    #[arg(
        long,
        help = "Add site_code, site_name and species_code columns from the file header"
    )]
    pub header_columns: bool,

    /// Overwrite an existing output file
    #[arg(long = "force", help = "Overwrite the output file if it already exists")]
    pub force_overwrite: bool,
}

impl ConvertArgs {
    /// Validate the convert arguments for consistency
    pub fn validate(&self) -> Result<()> {
        validate_input_file(&self.input)?;
        self.parse.to_parser_config()?;
        self.export_config().validate()?;

        let output = self.output_path();
        if output == self.input {
            return Err(Error::configuration(format!(
                "Output path is the same as the input: {}",
                output.display()
            )));
        }

        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(Error::configuration(format!(
                    "Output directory does not exist: {}",
                    parent.display()
                )));
            }
        }

        if output.exists() && !self.force_overwrite {
            return Err(Error::configuration(format!(
                "Output file already exists: {} (use --force to overwrite)",
                output.display()
            )));
        }

        Ok(())
    }

    /// Export settings selected on the command line
    pub fn export_config(&self) -> ExportConfig {
        let config = ExportConfig::new()
            .with_format(self.format)
            .with_compression(self.compression);
        if self.header_columns {
            config.with_header_columns()
        } else {
            config
        }
    }

    /// Explicit output path, or the input path with the format's extension
    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => self.input.with_extension(self.format.extension()),
        }
    }
}

/// Arguments for the validate command
#[derive(clap::Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Files or glob patterns to check
    #[arg(
        value_name = "PATTERN",
        required = true,
        help = "Files or glob patterns (e.g. 'data/**/*.rwl')"
    )]
    pub patterns: Vec<String>,

    #[command(flatten)]
    pub parse: ParseOptions,

    /// Treat warnings as failures
    #[arg(long, help = "Exit with an error when any file has warnings")]
    pub strict: bool,

    /// Output format for the report
    #[arg(
        long,
        value_enum,
        default_value = "human",
        help = "Report format: human (colored) or plain (tab-separated)"
    )]
    pub format: OutputFormat,
}

impl ValidateArgs {
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.patterns {
            glob::Pattern::new(pattern).map_err(|e| {
                Error::configuration(format!("Invalid glob pattern '{}': {}", pattern, e))
            })?;
        }
        self.parse.to_parser_config()?;
        Ok(())
    }

    /// Expand the patterns into a sorted, de-duplicated file list
    ///
    /// A pattern that names an existing file is taken as is, whatever its
    /// extension. Glob matches are kept only when they carry a Tucson extension.
    pub fn expand_patterns(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for pattern in &self.patterns {
            let direct = PathBuf::from(pattern);
            if direct.is_file() {
                files.push(direct);
                continue;
            }

            let entries = glob::glob(pattern).map_err(|e| {
                Error::configuration(format!("Invalid glob pattern '{}': {}", pattern, e))
            })?;
            for entry in entries {
                let path =
                    entry.map_err(|e| Error::io(format!("Failed to read {}", pattern), e.into()))?;
                if path.is_file() && has_tucson_extension(&path) {
                    files.push(path);
                }
            }
        }

        files.sort();
        files.dedup();
        Ok(files)
    }
}

impl Args {
    /// Get the command to execute
    pub fn get_command(&self) -> Option<&Commands> {
        self.command.as_ref()
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Report format for inspect and validate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Colored, aligned output for terminals
    #[default]
    Human,
    /// Tab-separated records for scripts
    Plain,
}

/// Dating convention as a command line value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DatingArg {
    #[default]
    Astronomical,
    BcAd,
}

impl From<DatingArg> for DatingConvention {
    fn from(arg: DatingArg) -> Self {
        match arg {
            DatingArg::Astronomical => DatingConvention::Astronomical,
            DatingArg::BcAd => DatingConvention::BcAd,
        }
    }
}

fn validate_input_file(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(Error::configuration(format!(
            "Input file does not exist: {}",
            path.display()
        )));
    }
    if !path.is_file() {
        return Err(Error::configuration(format!(
            "Input path is not a file: {}",
            path.display()
        )));
    }
    Ok(())
}

fn has_tucson_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            TUCSON_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}
