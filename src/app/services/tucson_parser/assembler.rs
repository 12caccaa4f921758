//! Series reconstruction
//!
//! The second pass over a file. Lines are fed one at a time, in file order,
//! into a [`SeriesAssembler`] which owns all mutable parse state: the open
//! series, the header cache, the last year marker and the year-marker width.

use super::decade_block::{BlockEnd, DecadeBlockDecoder};
use super::diagnostics::{DiagnosticKind, Diagnostics};
use super::header::{CachedLine, try_extract_header};
use super::line_classifier::{Classification, LineKind, classify, column};
use super::stats::ParseStats;
use crate::app::models::{DatingConvention, Dialect, FileKind, Series, YearMarker};
use crate::constants::{YEAR_MARKER_CHARS, YEAR_MARKER_CHARS_EXTENDED};
use crate::{Error, Result};
use tracing::{debug, trace};

/// Header lines cached before extraction is attempted
const HEADER_BLOCK_LINES: usize = 3;

/// Mutable state threaded through the reconstruction pass
#[derive(Debug)]
pub struct SeriesAssembler {
    dialect: Dialect,
    dating: DatingConvention,
    year_marker_chars: usize,
    last_year_marker: Option<YearMarker>,
    current_series_code: Option<String>,
    header_cache: Vec<CachedLine>,
    current_series: Option<Series>,
    completed: Vec<Series>,
    data_seen: bool,
    stats: ParseStats,
}

impl SeriesAssembler {
    pub fn new(dialect: Dialect, dating: DatingConvention) -> Self {
        Self {
            dialect,
            dating,
            year_marker_chars: YEAR_MARKER_CHARS,
            last_year_marker: None,
            current_series_code: None,
            header_cache: Vec::with_capacity(HEADER_BLOCK_LINES),
            current_series: None,
            completed: Vec::new(),
            data_seen: false,
            stats: ParseStats::new(),
        }
    }

    /// Current year-marker width
    pub fn year_marker_chars(&self) -> usize {
        self.year_marker_chars
    }

    /// Process one physical line; `line_number` is 1-based
    pub fn process_line(
        &mut self,
        line_number: usize,
        line: &str,
        diagnostics: &mut Diagnostics,
    ) -> Result<()> {
        self.stats.total_lines += 1;

        if line.trim().is_empty() {
            self.stats.blank_lines += 1;
            return Ok(());
        }

        let classification = classify(line);
        trace!("Line {}: {:?}", line_number, classification.kind);

        match classification.kind {
            LineKind::HeaderLine1 | LineKind::HeaderLine2 | LineKind::HeaderLine3 => {
                self.on_header_line(line_number, line, diagnostics);
                Ok(())
            }
            LineKind::RwlDataPartial6
            | LineKind::RwlDataComplete6
            | LineKind::RwlDataPartial8
            | LineKind::RwlDataComplete8
            | LineKind::CrnDataComplete6
            | LineKind::CrnDataComplete8 => {
                self.on_data_line(line_number, line, classification, diagnostics)
            }
            LineKind::Unclassified => {
                self.flush_header_cache(diagnostics);
                self.stats.unclassified_lines += 1;
                diagnostics.warn(
                    DiagnosticKind::UnrecognizedLine,
                    format!("Unrecognized line ignored: {}", line.trim_end()),
                    Some(line_number),
                );
                Ok(())
            }
        }
    }

    /// Close any open series and return the results
    pub fn finish(mut self, diagnostics: &mut Diagnostics) -> (Vec<Series>, usize, ParseStats) {
        self.flush_header_cache(diagnostics);
        self.close_current_series();

        self.stats.series_count = self.completed.len();
        self.stats.suppressed_diagnostics = diagnostics.suppressed();
        (self.completed, self.year_marker_chars, self.stats)
    }

    fn on_header_line(&mut self, line_number: usize, line: &str, diagnostics: &mut Diagnostics) {
        self.stats.header_lines += 1;

        if self.dialect.file_kind == FileKind::Crn && self.data_seen {
            diagnostics.warn(
                DiagnosticKind::IgnoredChronologyHeader,
                format!(
                    "Header line inside chronology data ignored: {}",
                    line.trim_end()
                ),
                Some(line_number),
            );
            return;
        }

        self.header_cache.push(CachedLine::new(line_number, line));
        if self.header_cache.len() < HEADER_BLOCK_LINES {
            return;
        }

        let cached = std::mem::take(&mut self.header_cache);
        match try_extract_header(&cached[0], &cached[1], &cached[2], diagnostics) {
            Some(header) => {
                debug!(
                    "Header for site '{}' on lines {}-{}",
                    header.site_code, cached[0].line_number, cached[2].line_number
                );
                self.close_current_series();
                self.current_series = Some(Series::with_header(header, cached[0].line_number));
                self.last_year_marker = None;
                self.current_series_code = None;
            }
            None => self.report_header_lines(cached, diagnostics),
        }
    }

    fn on_data_line(
        &mut self,
        line_number: usize,
        line: &str,
        classification: Classification,
        diagnostics: &mut Diagnostics,
    ) -> Result<()> {
        self.flush_header_cache(diagnostics);
        self.stats.data_lines += 1;
        self.data_seen = true;

        self.check_five_char_years(line_number, line, classification, diagnostics);

        let decoder = DecadeBlockDecoder::new(self.dialect, self.year_marker_chars, self.dating);
        let key = decoder.series_key(line);

        let continues = self.current_series.as_ref().is_some_and(|series| {
            !series.terminated
                && self
                    .current_series_code
                    .as_ref()
                    .is_none_or(|code| *code == key)
        });

        let mut series = match self.current_series.take() {
            Some(series) if continues => series,
            previous => {
                if let Some(previous) = previous {
                    self.completed.push(previous);
                }
                diagnostics.warn_once(
                    DiagnosticKind::MissingHeader,
                    format!("Series '{}' has no standard three-line header", key),
                    Some(line_number),
                );
                self.last_year_marker = None;
                Series::headerless(key, line_number)
            }
        };

        let block = decoder.decode(line, line_number, series.is_empty())?;

        if block.marker.year() <= 0 {
            diagnostics.warn_once(
                DiagnosticKind::NegativeYears,
                format!(
                    "Negative year markers in use (first seen: {}); check the dating convention",
                    block.marker
                ),
                Some(line_number),
            );
        }

        if let Some(previous) = self.last_year_marker {
            if !previous.accepts_successor(&block.marker) {
                return Err(Error::decade_discontinuity(
                    line_number,
                    block.marker,
                    previous,
                ));
            }
        }

        if series.key.is_empty() {
            series.key = block.key.clone();
        }
        if series.first_year.is_none() && !block.values.is_empty() {
            series.first_year = Some(block.marker.add(block.first_value_offset as i32));
        }
        series.ring_widths.extend_from_slice(&block.values);
        series.sample_depths.extend_from_slice(&block.depths);

        match block.end {
            BlockEnd::Open => {}
            BlockEnd::Stop(precision) => {
                series.precision = precision;
                series.terminated = true;
            }
            BlockEnd::MissingValue => {
                diagnostics.warn(
                    DiagnosticKind::MissingValueSentinel,
                    format!(
                        "Missing-value sentinel ends series '{}' after {} values",
                        series.key,
                        series.len()
                    ),
                    Some(line_number),
                );
                series.terminated = true;
            }
        }

        self.last_year_marker = Some(block.marker);
        self.current_series_code = Some(block.key);
        self.current_series = Some(series);
        Ok(())
    }

    /// Switch to five-character year markers when the last keycode column
    /// holds the sign of a year
    fn check_five_char_years(
        &mut self,
        line_number: usize,
        line: &str,
        classification: Classification,
        diagnostics: &mut Diagnostics,
    ) {
        if self.year_marker_chars == YEAR_MARKER_CHARS_EXTENDED
            || !classification.five_char_year_candidate
            || classification.kind.keycode_width() != Some(self.dialect.keycode_width)
        {
            return;
        }

        let sign_column = self.dialect.keycode_width.chars() - 1;
        let window = column(line, sign_column..sign_column + YEAR_MARKER_CHARS_EXTENDED);
        if window.trim().parse::<i32>().is_err() {
            return;
        }

        self.year_marker_chars = YEAR_MARKER_CHARS_EXTENDED;
        diagnostics.warn_once(
            DiagnosticKind::FiveCharacterYears,
            format!(
                "Non-standard five-character year markers detected ('{}'); keycodes shortened to {} characters",
                window,
                self.dialect
                    .keycode_width
                    .effective_chars(YEAR_MARKER_CHARS_EXTENDED)
            ),
            Some(line_number),
        );
    }

    fn flush_header_cache(&mut self, diagnostics: &mut Diagnostics) {
        if !self.header_cache.is_empty() {
            let cached = std::mem::take(&mut self.header_cache);
            self.report_header_lines(cached, diagnostics);
        }
    }

    fn report_header_lines(&self, lines: Vec<CachedLine>, diagnostics: &mut Diagnostics) {
        for cached in lines {
            diagnostics.warn(
                DiagnosticKind::UnrecognizedHeaderLine,
                format!("Unrecognized header-like line: {}", cached.text.trim_end()),
                Some(cached.line_number),
            );
        }
    }

    fn close_current_series(&mut self) {
        if let Some(series) = self.current_series.take() {
            debug!(
                "Closing series '{}' with {} values",
                series.key,
                series.len()
            );
            self.completed.push(series);
        }
    }
}
