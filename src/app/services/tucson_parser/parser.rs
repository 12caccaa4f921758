//! Core Tucson parser implementation
//!
//! Orchestrates the two passes over a file: the format sniffer fixes the
//! dialect from whole-file statistics, then the series assembler rebuilds the
//! series line by line.

use std::path::Path;
use tracing::{debug, info};

use super::assembler::SeriesAssembler;
use super::diagnostics::{DiagnosticKind, Diagnostics};
use super::format_sniffer::sniff;
use super::stats::ParseResult;
use crate::config::ParserConfig;
use crate::{Error, Result};

/// Reader for Tucson RWL and CRN files
///
/// The parser holds configuration only. Every call owns fresh state, so one
/// parser can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct TucsonParser {
    config: ParserConfig,
}

impl TucsonParser {
    /// Create a parser with the given configuration
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a file from disk
    ///
    /// Input that is not valid UTF-8 is decoded lossily and a warning is recorded.
    pub fn parse_file(&self, file_path: &Path) -> Result<ParseResult> {
        info!("Parsing Tucson file: {}", file_path.display());

        let bytes = std::fs::read(file_path).map_err(|e| {
            Error::io(format!("Failed to read file {}", file_path.display()), e)
        })?;

        let mut diagnostics = Diagnostics::new(self.config.max_diagnostics);
        let content = match String::from_utf8(bytes) {
            Ok(content) => content,
            Err(e) => {
                diagnostics.warn(
                    DiagnosticKind::NonUtf8Input,
                    format!(
                        "File is not valid UTF-8 (first bad byte at offset {}); decoded lossily",
                        e.utf8_error().valid_up_to()
                    ),
                    None,
                );
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };

        let lines: Vec<&str> = content.lines().collect();
        let result = self.parse_with_diagnostics(&lines, diagnostics)?;

        info!(
            "Parsed {} series ({} values) from {}",
            result.series.len(),
            result.total_values(),
            file_path.display()
        );
        Ok(result)
    }

    /// Parse lines that have already been split and decoded
    pub fn parse_lines<S: AsRef<str>>(&self, lines: &[S]) -> Result<ParseResult> {
        let diagnostics = Diagnostics::new(self.config.max_diagnostics);
        self.parse_with_diagnostics(lines, diagnostics)
    }

    fn parse_with_diagnostics<S: AsRef<str>>(
        &self,
        lines: &[S],
        mut diagnostics: Diagnostics,
    ) -> Result<ParseResult> {
        let (dialect, _evidence) = sniff(lines, self.config.keycode_width_hint)?;

        let mut assembler = SeriesAssembler::new(dialect, self.config.dating);
        for (index, line) in lines.iter().enumerate() {
            assembler.process_line(index + 1, line.as_ref(), &mut diagnostics)?;
        }

        let (series, year_marker_chars, stats) = assembler.finish(&mut diagnostics);
        debug!(
            "Assembled {} series from {} data lines with {} warnings",
            series.len(),
            stats.data_lines,
            diagnostics.len()
        );

        Ok(ParseResult {
            dialect,
            year_marker_chars,
            series,
            diagnostics: diagnostics.into_vec(),
            stats,
        })
    }
}
