//! Parse statistics and result structures for Tucson processing

use super::diagnostics::{Diagnostic, Severity};
use crate::app::models::{Dialect, Series};
use serde::{Deserialize, Serialize};

/// Everything produced by a successful parse
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Dialect inferred by the format sniffer
    pub dialect: Dialect,

    /// Year marker width in force at the end of the file (4, or 5 once the
    /// five-character workaround was switched on)
    pub year_marker_chars: usize,

    /// Reconstructed series in file order
    pub series: Vec<Series>,

    /// Non-fatal diagnostics in the order they were raised
    pub diagnostics: Vec<Diagnostic>,

    /// Line and series counts
    pub stats: ParseStats,
}

impl ParseResult {
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    pub fn has_warnings(&self) -> bool {
        self.warnings().next().is_some()
    }

    /// Total ring values across all series
    pub fn total_values(&self) -> usize {
        self.series.iter().map(|s| s.len()).sum()
    }
}

/// Line-level parsing statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Physical lines in the input
    pub total_lines: usize,

    /// Empty or whitespace-only lines
    pub blank_lines: usize,

    /// Lines decoded as decade blocks
    pub data_lines: usize,

    /// Lines with a header shape (accepted or not)
    pub header_lines: usize,

    /// Lines matching no known shape
    pub unclassified_lines: usize,

    /// Series produced
    pub series_count: usize,

    /// Warnings dropped after the diagnostic limit was reached
    pub suppressed_diagnostics: usize,
}

impl ParseStats {
    pub fn new() -> Self {
        Self::default()
    }
}
